pub mod seed;

use crate::config::seed::Seed;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::{Validate, ValidationError};

/// Configuration for a [NoiseGenerator](crate::NoiseGenerator). Two generators
/// built from the same config will always produce identical height fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NoiseConfig {
    /// Base seed. Layer `i` is seeded with `seed + i`. See [Seed] for the
    /// supported input formats.
    pub seed: Seed,

    /// The function used to blend between lattice values within each layer
    pub interpolation: Interpolation,

    /// The layers (AKA octaves) that get summed into each sample. Order
    /// determines each layer's seed, so reordering layers changes output.
    #[validate(custom = "validate_layers")]
    pub layers: Vec<LayerConfig>,
}

/// A single layer of value noise
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct LayerConfig {
    /// Spatial period of the layer, i.e. the distance between two lattice
    /// points. Bigger zoom means smoother, wider features.
    #[validate(range(min = 0.000001))]
    pub zoom: f64,

    /// Weight of this layer in the composite. Amplitudes are relative, the
    /// composite is always divided by the sum of all amplitudes.
    #[validate(range(min = 0.000001))]
    pub amplitude: f64,
}

/// Blend function used to interpolate between lattice values. All variants
/// return exactly `a` at `t = 0` and exactly `b` at `t = 1`.
#[derive(
    Copy, Clone, Debug, PartialEq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Interpolation {
    /// Straight line between the two values. Has visible creases along the
    /// lattice lines, since the slope jumps at every lattice point.
    Linear,
    /// Half a cosine wave. Zero slope at both ends.
    Cosine,
    /// The cubic `3t² - 2t³`. Zero slope at both ends, cheaper than cosine.
    Smoothstep,
}

impl NoiseConfig {
    /// Build the standard multi-octave config: `count` layers where layer `i`
    /// has zoom and amplitude `2^i`.
    pub fn octaves(seed: impl Into<Seed>, count: u32) -> Self {
        Self {
            seed: seed.into(),
            interpolation: Interpolation::Cosine,
            layers: (0..count)
                .map(|i| {
                    let scale = f64::from(2u32.pow(i));
                    LayerConfig {
                        zoom: scale,
                        amplitude: scale,
                    }
                })
                .collect(),
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self::octaves(0u64, 2)
    }
}

impl Interpolation {
    /// Blend from `a` to `b` by `t`, where `t` is in `[0, 1]`
    pub fn mix(self, a: f64, b: f64, t: f64) -> f64 {
        let weight = match self {
            Self::Linear => t,
            Self::Cosine => (1.0 - (t * std::f64::consts::PI).cos()) * 0.5,
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
        };
        a * (1.0 - weight) + b * weight
    }
}

impl Default for Interpolation {
    fn default() -> Self {
        Self::Cosine
    }
}

// validator can't recurse into a Vec, so the layers get checked by hand
#[allow(clippy::ptr_arg)]
fn validate_layers(layers: &Vec<LayerConfig>) -> Result<(), ValidationError> {
    if layers.is_empty() {
        let mut error = ValidationError::new("empty");
        error.message = Some("at least one noise layer is required".into());
        return Err(error);
    }

    for (i, layer) in layers.iter().enumerate() {
        if layer.validate().is_err() {
            let mut error = ValidationError::new("invalid_layer");
            error.message = Some(
                format!("layer {} needs a positive zoom and amplitude", i)
                    .into(),
            );
            error.add_param("index".into(), &i);
            return Err(error);
        }
    }

    Ok(())
}
