//! Kernel functions for SVM

pub mod gaussian;
pub mod kind;
pub mod linear;
pub mod polynomial;
pub mod sigmoid;
pub mod traits;

pub use self::gaussian::*;
pub use self::kind::*;
pub use self::linear::*;
pub use self::polynomial::*;
pub use self::sigmoid::*;
pub use self::traits::*;
