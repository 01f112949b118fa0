use thiserror::Error;

use crate::fill::FillMode;

/// Errors reported by transform construction and invocation.
///
/// All of these are programmer or integration errors: they are detected
/// eagerly, before any element of an output buffer is written, and the
/// failed call must not be retried with the same arguments.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A padding amount was negative.
    #[error("invalid configuration: negative {side} padding {amount}")]
    InvalidConfiguration { side: &'static str, amount: i64 },

    /// A tensor did not have exactly four axes.
    #[error("invalid rank: expected a 4-axis tensor, got {actual} axes")]
    InvalidRank { actual: usize },

    /// A buffer's shape disagrees with the last prepared shape.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// `apply` or `apply_gradient` was called before any `prepare`.
    #[error("transform is not ready: no input shape has been prepared")]
    NotReady,

    /// The selected fill mode has no fill or gradient policy yet.
    #[error("fill mode {0:?} is not implemented")]
    FeatureNotImplemented(FillMode),
}
