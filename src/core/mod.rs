//! Error type, training data, configuration and the traits shared by the
//! solver, the evaluator and the loaders

pub mod error;
pub mod traits;
pub mod types;

pub use self::error::*;
pub use self::traits::*;
pub use self::types::*;
