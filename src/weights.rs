//! Helpers for sets of weight matrices.
//!
//! A weight set holds one matrix per layer transition `i -> i + 1`, shaped
//! `layers[i + 1] x (layers[i] + 1)`. Column 0 of every matrix holds the bias
//! weights.

use crate::error::{Error, Result};
use crate::matrix::Mat;

use rand::Rng;
use rand_distr::StandardNormal;

/// One weight matrix per layer transition.
pub type Weights = Vec<Mat>;

/// The expected `(rows, cols)` of every weight matrix for `layers`.
pub fn shapes(layers: &[usize]) -> Vec<(usize, usize)> {
    layers.windows(2).map(|w| (w[1], w[0] + 1)).collect()
}

/// Generates weights drawn from a standard normal distribution.
pub fn random_weights(layers: &[usize]) -> Weights {
    random_weights_with(layers, &mut rand::thread_rng())
}

/// Like `random_weights`, drawing from the provided `rng`.
pub fn random_weights_with<R: Rng + ?Sized>(layers: &[usize], rng: &mut R) -> Weights {
    shapes(layers)
        .into_iter()
        .map(|(rows, cols)| Mat::random(&StandardNormal, rng, rows, cols))
        .collect()
}

/// Generates weights where every element is zero.
pub fn zero_weights(layers: &[usize]) -> Weights {
    shapes(layers)
        .into_iter()
        .map(|(rows, cols)| Mat::zeros(rows, cols))
        .collect()
}

/// Checks that `weights` fits the layer sequence `layers`.
pub fn validate(layers: &[usize], weights: &[Mat]) -> Result<()> {
    if layers.len() < 2 || layers.contains(&0) {
        return Err(Error::InvalidLayers(layers.to_vec()));
    }
    let expected = shapes(layers);
    if expected.len() != weights.len() {
        return Err(Error::WeightCount {
            expected: expected.len(),
            actual: weights.len(),
        });
    }
    for (transition, (shape, matrix)) in expected.into_iter().zip(weights).enumerate() {
        if matrix.shape() != shape {
            return Err(Error::DimensionMismatch {
                transition,
                expected: shape,
                actual: matrix.shape(),
            });
        }
    }
    Ok(())
}

/// Converts nested arrays, one 2-D array per matrix, into weights.
pub fn import_weights(weights: &[Vec<Vec<f64>>]) -> Result<Weights> {
    weights.iter().map(|rows| Mat::from_rows(rows.as_slice())).collect()
}

/// Converts weights into nested arrays, one 2-D array per matrix.
pub fn export_weights(weights: &[Mat]) -> Vec<Vec<Vec<f64>>> {
    weights.iter().map(Mat::to_rows).collect()
}

/// Detects whether `weights` include a bias column.
///
/// Needs at least two matrices: the first matrix's row count equals the
/// second matrix's column count only when there is no bias column.
pub fn has_bias(weights: &[Mat]) -> bool {
    match weights {
        [first, second, ..] => first.rows() != second.cols(),
        _ => true,
    }
}

/// Recovers the layer sequence described by `weights`.
pub fn layers_of(weights: &[Mat]) -> Vec<usize> {
    let mut layers = Vec::with_capacity(weights.len() + 1);
    if let Some(first) = weights.first() {
        let bias = if has_bias(weights) { 1 } else { 0 };
        layers.push(first.cols() - bias);
    }
    layers.extend(weights.iter().map(Mat::rows));
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_weights_have_bias_columns() {
        let layers = [3, 5, 2];
        let weights = random_weights(&layers);
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].shape(), (5, 4));
        assert_eq!(weights[1].shape(), (2, 6));
        assert!(validate(&layers, &weights).is_ok());
    }

    #[test]
    fn random_weights_differ_between_calls() {
        let layers = [3, 5, 2];
        assert_ne!(random_weights(&layers), random_weights(&layers));
    }

    #[test]
    fn seeded_weights_are_reproducible() {
        let a = random_weights_with(&[2, 2, 1], &mut StdRng::seed_from_u64(7));
        let b = random_weights_with(&[2, 2, 1], &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_weights_are_zero() {
        let weights = zero_weights(&[2, 3, 1]);
        assert!(weights.iter().all(|m| m.iter().all(|&w| w == 0.0)));
    }

    #[test]
    fn validate_rejects_wrong_shapes() {
        let weights = random_weights(&[3, 2, 3]);
        match validate(&[2, 2, 1], &weights) {
            Err(Error::DimensionMismatch { transition, expected, actual }) => {
                assert_eq!(transition, 0);
                assert_eq!(expected, (2, 3));
                assert_eq!(actual, (2, 4));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_wrong_count() {
        let weights = random_weights(&[2, 2]);
        assert!(matches!(
            validate(&[2, 2, 1], &weights),
            Err(Error::WeightCount { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn validate_rejects_degenerate_layers() {
        for layers in &[vec![], vec![2], vec![2, 0, 1]] {
            match validate(layers, &zero_weights(layers)) {
                Err(Error::InvalidLayers(ref rejected)) => assert_eq!(rejected, layers),
                other => panic!("unexpected result for {:?}: {:?}", layers, other),
            }
        }
    }

    #[test]
    fn import_export() {
        let nested = vec![
            vec![vec![-30.0, 20.0, 20.0], vec![10.0, -20.0, -20.0]],
            vec![vec![-10.0, 20.0, 20.0]],
        ];
        let weights = import_weights(&nested).unwrap();
        assert_eq!(weights[0].get(1, 0), 10.0);
        assert_eq!(export_weights(&weights), nested);
        assert_eq!(import_weights(&export_weights(&weights)).unwrap(), weights);
    }

    #[test]
    fn layers_are_recovered() {
        let weights = zero_weights(&[4, 3, 2]);
        assert!(has_bias(&weights));
        assert_eq!(layers_of(&weights), vec![4, 3, 2]);

        let unbiased = vec![Mat::zeros(3, 4), Mat::zeros(2, 3)];
        assert!(!has_bias(&unbiased));
        assert_eq!(layers_of(&unbiased), vec![4, 3, 2]);
    }
}
