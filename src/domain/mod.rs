mod category;
mod clock;
mod expense;
mod ids;
mod ledger;
mod money;
mod sample;
mod summary;
mod validation;

pub use category::*;
pub use clock::*;
pub use expense::*;
pub use ids::*;
pub use ledger::*;
pub use money::*;
pub use sample::*;
pub use summary::*;
pub use validation::*;
