use std::collections::BTreeMap;

use ndarray::{ArrayViewD, ArrayViewMutD};

use crate::{
    error::TransformError,
    fill::FillMode,
    pad::{PadConfig, PadTransform},
};

/// Raw transform parameters as they appear in a host model description.
///
/// Amounts are signed on purpose: validation happens when a transform is
/// built, not when the record is assembled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformParams {
    pub pad_left: i64,
    pub pad_right: i64,
    pub pad_top: i64,
    pub pad_bottom: i64,
    pub fill: FillMode,
}

/// A configured transform of the computation graph.
///
/// Every kind exposes the same surface: derive the output shape with
/// [`prepare`](Self::prepare), evaluate forwards with [`apply`](Self::apply)
/// and propagate gradients with [`apply_gradient`](Self::apply_gradient).
#[derive(Clone, Debug)]
pub enum Transform {
    Pad(PadTransform),
}

impl Transform {
    /// Derives and caches the output shape for `input_shape`.
    pub fn prepare(&mut self, input_shape: &[usize]) -> Result<[usize; 4], TransformError> {
        match self {
            Transform::Pad(pad) => pad.prepare(input_shape),
        }
    }

    /// Evaluates the transform forwards.
    pub fn apply(
        &self,
        input: &ArrayViewD<f32>,
        output: &mut ArrayViewMutD<f32>,
    ) -> Result<(), TransformError> {
        match self {
            Transform::Pad(pad) => pad.apply(input, output),
        }
    }

    /// Propagates the upstream gradient back to the input gradient.
    pub fn apply_gradient(
        &self,
        output_gradient: &ArrayViewD<f32>,
        input_gradient: &mut ArrayViewMutD<f32>,
    ) -> Result<(), TransformError> {
        match self {
            Transform::Pad(pad) => pad.apply_gradient(output_gradient, input_gradient),
        }
    }
}

/// Constructor for one transform kind.
pub type Builder = fn(&TransformParams) -> Result<Transform, TransformError>;

fn build_pad(params: &TransformParams) -> Result<Transform, TransformError> {
    let config = PadConfig::new(
        params.pad_left,
        params.pad_right,
        params.pad_top,
        params.pad_bottom,
        params.fill,
    )?;

    Ok(Transform::Pad(PadTransform::new(config)))
}

/// Name to constructor table, owned by the host.
///
/// The host assembles the table once at startup and resolves the transform
/// names of its model description against it; there is no load-time
/// self-registration. An unknown name is host data gone wrong, not a
/// transform error, and surfaces as [`None`].
#[derive(Clone, Debug)]
pub struct Registry {
    builders: BTreeMap<&'static str, Builder>,
}

impl Registry {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            builders: BTreeMap::new(),
        }
    }

    /// Creates a table holding every transform this crate provides.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("pad", build_pad);
        registry
    }

    /// Registers `builder` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &'static str, builder: Builder) {
        self.builders.insert(name, builder);
    }

    /// Looks up the constructor registered under `name`.
    pub fn get(&self, name: &str) -> Option<Builder> {
        self.builders.get(name).copied()
    }

    /// Builds the transform registered under `name`.
    pub fn build(
        &self,
        name: &str,
        params: &TransformParams,
    ) -> Option<Result<Transform, TransformError>> {
        self.get(name).map(|builder| builder(params))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
