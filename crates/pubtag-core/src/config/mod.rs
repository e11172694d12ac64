//! Configuration for a pubtag run

pub mod defaults;
mod types;
pub mod validation;

pub use defaults::*;
pub use types::*;
pub use validation::*;
