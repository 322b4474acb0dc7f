pub mod lattice;
pub mod layer;

use crate::{noise::layer::NoiseLayer, NoiseConfig};
use anyhow::{bail, Context};
use log::info;
use validator::Validate;

/// Layered value noise. Each sample is the sum of every layer's sample,
/// divided by the sum of the layer amplitudes, so output stays within
/// `[0, 1)` no matter how many layers there are or how they're weighted.
///
/// A generator can be shared between threads. Each layer's lattice cache
/// grows as new areas are sampled and is never trimmed; if memory is a
/// concern, drop the generator and build a new one from the same config.
/// Output doesn't change.
#[derive(Debug)]
pub struct NoiseGenerator {
    layers: Vec<NoiseLayer>,
}

impl NoiseGenerator {
    /// Build a generator from an arbitrary list of layers. Fails if the list
    /// is empty, since there would be nothing to normalize against.
    pub fn new(layers: Vec<NoiseLayer>) -> anyhow::Result<Self> {
        if layers.is_empty() {
            bail!("noise generator needs at least one layer");
        }
        Ok(Self { layers })
    }

    /// Build a generator from config. Returns an error if the config is
    /// invalid. The error wraps a
    /// [ValidationErrors](validator::ValidationErrors) which can be downcast
    /// to see exactly which fields were rejected.
    pub fn from_config(config: &NoiseConfig) -> anyhow::Result<Self> {
        info!("Building noise generator with config {:?}", config);
        config.validate().context("invalid noise config")?;

        let layers = config
            .layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                NoiseLayer::new(
                    config.seed.layer_seed(i),
                    layer.zoom,
                    layer.amplitude,
                    config.interpolation,
                )
            })
            .collect();
        Self::new(layers)
    }

    pub fn layers(&self) -> &[NoiseLayer] {
        &self.layers
    }

    /// Sample the composite height at a point
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let (sum, amplitude_sum) =
            self.layers.iter().fold((0.0, 0.0), |(sum, amps), layer| {
                (sum + layer.sample(x, y), amps + layer.amplitude())
            });
        sum / amplitude_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Interpolation, noise::layer::lattice_value};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_empty_generator() {
        assert!(NoiseGenerator::new(vec![]).is_err());
    }

    #[test]
    fn test_single_layer_is_normalized() {
        let layer = NoiseLayer::new(9, 3.0, 5.0, Interpolation::Cosine);
        let generator = NoiseGenerator::new(vec![layer]).unwrap();
        // One layer divided by its own amplitude is just the raw noise
        assert_approx_eq!(generator.sample(9.0, 6.0), lattice_value(3, 2, 9));
    }

    #[test]
    fn test_weighted_average_of_layers() {
        let generator = NoiseGenerator::new(vec![
            NoiseLayer::new(1, 1.0, 1.0, Interpolation::Linear),
            NoiseLayer::new(2, 2.0, 3.0, Interpolation::Linear),
        ])
        .unwrap();
        // At (4, 8), both layers are exactly on lattice points
        let expected =
            (lattice_value(4, 8, 1) + 3.0 * lattice_value(2, 4, 2)) / 4.0;
        assert_approx_eq!(generator.sample(4.0, 8.0), expected);
    }

    #[test]
    fn test_layer_seeds_follow_config() {
        let config = NoiseConfig::octaves(100u64, 3);
        let generator = NoiseGenerator::from_config(&config).unwrap();
        let seeds: Vec<u64> =
            generator.layers().iter().map(NoiseLayer::seed).collect();
        assert_eq!(seeds, vec![100, 101, 102]);
        assert_eq!(generator.layers()[2].zoom(), 4.0);
    }
}
