//! Type aliases and common types.

use nalgebra::DMatrix;

/// Dense real matrix used for channels, gain functions, joint and inner
/// distributions.
///
/// Channels and joint/inner matrices are `secrets × outputs`; gain
/// functions are `actions × secrets`.
pub type Matrix = DMatrix<f64>;
