//! Spatial zero-padding for 4-axis tensors, with its adjoint.
//!
//! This crate implements a single transform of a layered computation graph:
//! padding the two trailing (spatial) axes of a dense `(batch, channels,
//! height, width)` tensor with a configurable border, and cropping the
//! upstream gradient back to the input shape during the backward pass.
//!
//! The host graph executor drives a [`PadTransform`] through three calls:
//! [`prepare`](PadTransform::prepare) once per distinct input shape,
//! [`apply`](PadTransform::apply) once per forward pass and
//! [`apply_gradient`](PadTransform::apply_gradient) once per backward pass.
//! Tensors stay owned by the host; the transform only receives views.
//!
//! ```
//! use ndarray::array;
//! use pad2d::{FillMode, PadConfig, PadTransform};
//!
//! let config = PadConfig::new(1, 0, 1, 0, FillMode::Zero)?;
//! let mut pad = PadTransform::new(config);
//!
//! let input = array![[[[1., 2.], [3., 4.]]]].into_dyn();
//! let output_shape = pad.prepare(input.shape())?;
//! let mut output = ndarray::ArrayD::<f32>::zeros(output_shape.to_vec());
//!
//! pad.apply(&input.view(), &mut output.view_mut())?;
//!
//! assert_eq!(
//!     output,
//!     array![[[[0., 0., 0.], [0., 1., 2.], [0., 3., 4.]]]].into_dyn()
//! );
//! # Ok::<(), pad2d::TransformError>(())
//! ```

mod error;
mod fill;
mod pad;
mod registry;

pub use crate::{
    error::TransformError,
    fill::{FillMode, Margins},
    pad::{PadConfig, PadTransform},
    registry::{Builder, Registry, Transform, TransformParams},
};
