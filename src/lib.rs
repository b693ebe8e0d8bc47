pub mod application;
pub mod auth;
pub mod cli;
pub mod domain;

pub use domain::*;
