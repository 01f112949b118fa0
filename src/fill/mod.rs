use ndarray::{s, ArrayView2, ArrayViewMut2};

use crate::error::TransformError;

/// Padding amounts for the four spatial borders of a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Margins {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

/// Policy for the padding region of the output.
///
/// A mode always defines a matched pair of behaviors: how the padding
/// region is written during the forward pass and how the corresponding
/// region of the upstream gradient is folded back during the backward
/// pass. Only [`Zero`](FillMode::Zero) is implemented; the other variants
/// are declared so that selecting them is a representable configuration,
/// rejected with [`TransformError::FeatureNotImplemented`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    /// Fill the padding region with zeros.
    #[default]
    Zero,
    /// Mirror the rows and columns closest to each border.
    Reflect,
    /// Repeat the outermost row and column of the sample.
    Replicate,
}

impl FillMode {
    /// Whether the mode has a fill and gradient policy.
    pub fn is_supported(&self) -> bool {
        matches!(self, FillMode::Zero)
    }

    /// Writes one padded sample: the source sample lands in the interior
    /// rectangle, the padding region is filled per the mode.
    ///
    /// Border ownership: the width borders of the data rows are filled
    /// first, then the full top and bottom rows, so the height borders are
    /// authoritative at the four corners. Under `Zero` every corner policy
    /// agrees; future modes must keep this ordering deterministic.
    ///
    /// # Arguments
    ///
    /// * `padded` - destination sample, of shape (H + top + bottom, W + left + right).
    ///
    /// * `base` - source sample, of shape (H, W).
    ///
    /// * `margins` - padding amounts for the four borders.
    pub(crate) fn pad(
        &self,
        padded: &mut ArrayViewMut2<f32>,
        base: &ArrayView2<f32>,
        margins: Margins,
    ) -> Result<(), TransformError> {
        let (height, width) = base.dim();
        let (padded_height, padded_width) = padded.dim();

        match self {
            FillMode::Zero => {
                // The source sample must land before the border fills, as
                // the full-row fills below overwrite the corners.
                padded
                    .slice_mut(s![
                        margins.top..margins.top + height,
                        margins.left..margins.left + width
                    ])
                    .assign(base);

                // Left and right borders of the rows carrying data.
                let data_rows = margins.top..padded_height - margins.bottom;
                padded
                    .slice_mut(s![data_rows.clone(), ..margins.left])
                    .fill(0.);
                padded
                    .slice_mut(s![data_rows, padded_width - margins.right..])
                    .fill(0.);
                // Full top and bottom rows, corners included.
                padded.slice_mut(s![..margins.top, ..]).fill(0.);
                padded
                    .slice_mut(s![padded_height - margins.bottom.., ..])
                    .fill(0.);

                Ok(())
            }
            mode => Err(TransformError::FeatureNotImplemented(*mode)),
        }
    }

    /// Folds one padded sample's gradient back onto the source sample's
    /// gradient.
    ///
    /// A constant fill carries no information, so under `Zero` the padding
    /// region of `padded_gradient` is discarded and the interior rectangle
    /// overwrites `base_gradient` directly: each source element influences
    /// exactly one padded element, hence no accumulation.
    pub(crate) fn pad_gradient(
        &self,
        padded_gradient: &ArrayView2<f32>,
        base_gradient: &mut ArrayViewMut2<f32>,
        margins: Margins,
    ) -> Result<(), TransformError> {
        let (height, width) = base_gradient.dim();

        match self {
            FillMode::Zero => {
                base_gradient.assign(&padded_gradient.slice(s![
                    margins.top..margins.top + height,
                    margins.left..margins.left + width
                ]));

                Ok(())
            }
            mode => Err(TransformError::FeatureNotImplemented(*mode)),
        }
    }
}
