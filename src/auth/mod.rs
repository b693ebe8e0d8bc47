// Mock authentication: an in-memory user directory behind simulated latency.
// Nothing here is real security; it stands in for a backend the app does not have.

mod cancel;
mod credentials;
mod directory;
mod error;
mod service;

pub use cancel::*;
pub use credentials::*;
pub use directory::*;
pub use error::*;
pub use service::*;
