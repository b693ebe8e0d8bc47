// Application layer - use cases the front end drives.
// The ledger itself lives in the domain; this layer turns raw form input into
// validated ledger calls and reports field-level errors.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
