//! SVM solver implementations
//!
//! This module implements Platt's Sequential Minimal Optimization (SMO)
//! algorithm from "Fast Training of Support Vector Machines using Sequential
//! Minimal Optimization".

pub mod permutation;
pub mod smo;
pub mod state;

pub use self::permutation::*;
pub use self::smo::*;
pub use self::state::*;
