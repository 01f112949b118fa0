use ndarray::{ArrayView4, ArrayViewD, ArrayViewMut4, ArrayViewMutD, Ix4};

use crate::{
    error::TransformError,
    fill::{FillMode, Margins},
};

/// Validated padding configuration.
///
/// Amounts arrive from the host parameter block as signed integers and are
/// checked once here; the configuration is immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PadConfig {
    margins: Margins,
    mode: FillMode,
}

impl PadConfig {
    /// Creates a configuration from raw padding amounts.
    ///
    /// # Errors
    ///
    /// [`TransformError::InvalidConfiguration`] if any amount is negative,
    /// [`TransformError::FeatureNotImplemented`] if `mode` has no fill
    /// policy.
    pub fn new(
        left: i64,
        right: i64,
        top: i64,
        bottom: i64,
        mode: FillMode,
    ) -> Result<Self, TransformError> {
        let amount = |side, amount: i64| {
            usize::try_from(amount)
                .map_err(|_| TransformError::InvalidConfiguration { side, amount })
        };

        let margins = Margins {
            left: amount("left", left)?,
            right: amount("right", right)?,
            top: amount("top", top)?,
            bottom: amount("bottom", bottom)?,
        };

        if !mode.is_supported() {
            return Err(TransformError::FeatureNotImplemented(mode));
        }

        Ok(Self { margins, mode })
    }

    /// Padding amounts for the four borders.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Fill mode for the padding region.
    pub fn mode(&self) -> FillMode {
        self.mode
    }
}

/// Shape information cached by [`PadTransform::prepare`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ShapeState {
    batch: usize,
    channels: usize,
    height_in: usize,
    width_in: usize,
    height_out: usize,
    width_out: usize,
}

impl ShapeState {
    fn input_shape(&self) -> [usize; 4] {
        [self.batch, self.channels, self.height_in, self.width_in]
    }

    fn output_shape(&self) -> [usize; 4] {
        [self.batch, self.channels, self.height_out, self.width_out]
    }
}

/// Spatial padding of a `(batch, channels, height, width)` tensor.
///
/// The transform owns only its configuration and the shape state cached by
/// the latest [`prepare`](Self::prepare); the value and gradient buffers it
/// reads and writes belong to the caller for the duration of each call.
///
/// Every `(n, c)` pair addresses a disjoint 2-dimensional slice of the
/// buffers, so the per-sample work is independent and runs sequentially in
/// a single bounded pass.
#[derive(Clone, Debug)]
pub struct PadTransform {
    config: PadConfig,
    shape: Option<ShapeState>,
}

impl PadTransform {
    /// Creates a transform with the given configuration. No shape is known
    /// yet; [`prepare`](Self::prepare) must run before the first
    /// [`apply`](Self::apply).
    pub fn new(config: PadConfig) -> Self {
        Self {
            config,
            shape: None,
        }
    }

    /// The transform's configuration.
    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    /// Derives and caches the output shape for `input_shape`.
    ///
    /// The output keeps the batch and channel extents and grows the spatial
    /// extents by the configured margins. Safe to call repeatedly: an
    /// unchanged shape recomputes the same state, a changed shape replaces
    /// it.
    ///
    /// # Errors
    ///
    /// [`TransformError::InvalidRank`] unless `input_shape` has exactly
    /// four axes.
    pub fn prepare(&mut self, input_shape: &[usize]) -> Result<[usize; 4], TransformError> {
        let &[batch, channels, height_in, width_in] = input_shape else {
            return Err(TransformError::InvalidRank {
                actual: input_shape.len(),
            });
        };

        let margins = self.config.margins();
        let state = ShapeState {
            batch,
            channels,
            height_in,
            width_in,
            height_out: height_in + margins.top + margins.bottom,
            width_out: width_in + margins.left + margins.right,
        };
        self.shape = Some(state);

        Ok(state.output_shape())
    }

    /// Pads `input` into `output`.
    ///
    /// `input` must have the shape last passed to `prepare` and `output`
    /// the shape `prepare` returned. Each element of `output` is written
    /// exactly once: copied from the interior or filled per the mode.
    pub fn apply(
        &self,
        input: &ArrayViewD<f32>,
        output: &mut ArrayViewMutD<f32>,
    ) -> Result<(), TransformError> {
        let state = self.ready()?;

        let input = checked(input.view(), state.input_shape())?;
        let mut output = checked_mut(output.view_mut(), state.output_shape())?;

        let (mode, margins) = (self.config.mode(), self.config.margins());
        for (base_image, mut padded_image) in input.outer_iter().zip(output.outer_iter_mut()) {
            for (base, mut padded) in base_image.outer_iter().zip(padded_image.outer_iter_mut()) {
                mode.pad(&mut padded, &base, margins)?;
            }
        }

        Ok(())
    }

    /// Propagates `output_gradient` back into `input_gradient`.
    ///
    /// The interior rectangle of `output_gradient` overwrites
    /// `input_gradient` entirely; the padding region is handled by the
    /// mode's gradient policy, which for zero fill discards it.
    pub fn apply_gradient(
        &self,
        output_gradient: &ArrayViewD<f32>,
        input_gradient: &mut ArrayViewMutD<f32>,
    ) -> Result<(), TransformError> {
        let state = self.ready()?;

        let output_gradient = checked(output_gradient.view(), state.output_shape())?;
        let mut input_gradient = checked_mut(input_gradient.view_mut(), state.input_shape())?;

        let (mode, margins) = (self.config.mode(), self.config.margins());
        for (padded_image, mut base_image) in output_gradient
            .outer_iter()
            .zip(input_gradient.outer_iter_mut())
        {
            for (padded, mut base) in padded_image.outer_iter().zip(base_image.outer_iter_mut()) {
                mode.pad_gradient(&padded, &mut base, margins)?;
            }
        }

        Ok(())
    }

    fn ready(&self) -> Result<ShapeState, TransformError> {
        self.shape.ok_or(TransformError::NotReady)
    }
}

/// Fixes a view's rank and checks it against the expected shape.
fn checked(view: ArrayViewD<f32>, expected: [usize; 4]) -> Result<ArrayView4<f32>, TransformError> {
    let actual = view.ndim();
    let view = view
        .into_dimensionality::<Ix4>()
        .map_err(|_| TransformError::InvalidRank { actual })?;

    if view.shape() != expected {
        return Err(TransformError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: view.shape().to_vec(),
        });
    }

    Ok(view)
}

fn checked_mut(
    view: ArrayViewMutD<f32>,
    expected: [usize; 4],
) -> Result<ArrayViewMut4<f32>, TransformError> {
    let actual = view.ndim();
    let view = view
        .into_dimensionality::<Ix4>()
        .map_err(|_| TransformError::InvalidRank { actual })?;

    if view.shape() != expected {
        return Err(TransformError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: view.shape().to_vec(),
        });
    }

    Ok(view)
}
