use super::LogisticCost;
use crate::algorithm::{Algorithm, Context, Cost, Derivative};
use crate::error::Result;
use crate::weights::{zero_weights, Weights};

/// Options for `NumericalGradient`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericalGradientOptions {
    /// Distance each weight is moved in either direction.
    pub epsilon: f64,
}

impl Default for NumericalGradientOptions {
    fn default() -> Self {
        NumericalGradientOptions { epsilon: 1e-7 }
    }
}

impl NumericalGradientOptions {
    pub fn merge(&self, patch: &NumericalGradientPatch) -> NumericalGradientOptions {
        NumericalGradientOptions {
            epsilon: patch.epsilon.unwrap_or(self.epsilon),
        }
    }
}

/// Changes to `NumericalGradientOptions`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct NumericalGradientPatch {
    #[serde(alias = "delta")]
    pub epsilon: Option<f64>,
}

/// Estimates the gradient of a cost function with central differences.
///
/// Every weight is moved by `+epsilon` and `-epsilon` in turn, all others
/// held fixed, costing two full cost evaluations per weight. Meant for
/// checking analytic derivatives, not for training.
#[derive(Clone, Debug)]
pub struct NumericalGradient {
    context: Context,
    options: NumericalGradientOptions,
    cost: Box<dyn Cost>,
}

impl Default for NumericalGradient {
    fn default() -> Self {
        NumericalGradient {
            context: Context::default(),
            options: NumericalGradientOptions::default(),
            cost: Box::new(LogisticCost::new()),
        }
    }
}

impl NumericalGradient {
    /// Creates an estimator for the unregularized `LogisticCost`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(patch: &NumericalGradientPatch) -> Self {
        let mut derivative = Self::new();
        derivative.set_options(patch);
        derivative
    }

    pub fn options(&self) -> &NumericalGradientOptions {
        &self.options
    }

    pub fn set_options(&mut self, patch: &NumericalGradientPatch) -> &mut Self {
        self.options = self.options.merge(patch);
        self
    }

    /// Sets the cost function whose gradient is estimated.
    pub fn set_cost(&mut self, cost: Box<dyn Cost>) -> &mut Self {
        self.cost = cost;
        self
    }

    pub fn cost(&self) -> &dyn Cost {
        &*self.cost
    }

    /// Evaluates the cost function with the network's weights replaced by
    /// `weights`.
    pub fn compute_error(&mut self, weights: Weights) -> Result<f64> {
        let mut network = self.context.network()?.clone();
        network.set_weights(weights)?;
        self.cost.set_network(&network);
        self.cost.set_examples(self.context.examples());
        self.cost.run()
    }
}

impl Algorithm for NumericalGradient {
    fn context(&self) -> &Context {
        &self.context
    }

    fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }
}

impl Derivative for NumericalGradient {
    fn run(&mut self) -> Result<Weights> {
        let network = self.context.network()?.clone();
        let epsilon = self.options.epsilon;
        let mut derivatives = zero_weights(network.layers());

        for (i, derivative) in derivatives.iter_mut().enumerate() {
            for row in 0..derivative.rows() {
                for col in 0..derivative.cols() {
                    let mut plus = network.weights().to_vec();
                    let mut minus = network.weights().to_vec();
                    let weight = network.weights()[i].get(row, col);
                    plus[i].set(row, col, weight + epsilon);
                    minus[i].set(row, col, weight - epsilon);

                    let slope = (self.compute_error(plus)? - self.compute_error(minus)?)
                        / (2.0 * epsilon);
                    derivative.set(row, col, slope);
                }
            }
        }
        Ok(derivatives)
    }

    fn box_clone(&self) -> Box<dyn Derivative> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activator::sigmoid;
    use crate::algorithms::{CostPatch, SquaredError};
    use crate::example::Example;
    use crate::feed_forward::tests::{xnor_examples, BAD_XNOR};
    use crate::feed_forward::Network;
    use crate::weights::import_weights;

    use serde_json::json;

    fn single_unit() -> Network {
        let weights = import_weights(&[vec![vec![0.2, 0.3]]]).unwrap();
        Network::with_weights(&[1, 1], weights).unwrap()
    }

    #[test]
    fn logistic_gradient_of_single_unit() {
        let mut numerical = NumericalGradient::new();
        numerical.set_network(&single_unit());
        numerical.set_examples(vec![Example::new(vec![1.0], vec![1.0])].into());
        let gradient = numerical.run().unwrap();

        // d/dw of -ln(sigmoid(w . [1, x])) is (h - y) * [1, x]
        let expected = sigmoid(0.5) - 1.0;
        assert!((gradient[0].get(0, 0) - expected).abs() < 1e-6);
        assert!((gradient[0].get(0, 1) - expected).abs() < 1e-6);
    }

    #[test]
    fn estimates_other_cost_functions() {
        let mut numerical = NumericalGradient::new();
        numerical.set_cost(Box::new(SquaredError::with_options(&CostPatch::default())));
        numerical.set_network(&single_unit());
        numerical.set_examples(vec![Example::new(vec![2.0], vec![0.0])].into());
        let gradient = numerical.run().unwrap();

        // d/dw of (h - y)^2 / 2 is (h - y) * h * (1 - h) * [1, x]
        let h = sigmoid(0.2 + 0.3 * 2.0);
        let slope = h * h * (1.0 - h);
        assert!((gradient[0].get(0, 0) - slope).abs() < 1e-6);
        assert!((gradient[0].get(0, 1) - 2.0 * slope).abs() < 1e-6);
    }

    #[test]
    fn gradient_has_weight_shapes() {
        let network = Network::from_json(BAD_XNOR).unwrap();
        let mut numerical = NumericalGradient::with_options(&NumericalGradientPatch {
            epsilon: Some(0.002),
        });
        numerical.set_network(&network);
        numerical.set_examples(xnor_examples().into());
        let gradient = numerical.run().unwrap();
        assert!(network.validate_weights(&gradient).is_ok());
        assert_ne!(gradient, zero_weights(network.layers()));
    }

    #[test]
    fn leaves_the_network_untouched() {
        let network = Network::from_json(BAD_XNOR).unwrap();
        let mut numerical = NumericalGradient::new();
        numerical.set_network(&network);
        numerical.set_examples(xnor_examples().into());
        numerical.run().unwrap();
        assert_eq!(numerical.context().network().unwrap(), &network);
    }

    #[test]
    fn compute_error_uses_given_weights() {
        let network = Network::from_json(BAD_XNOR).unwrap();
        let mut numerical = NumericalGradient::new();
        numerical.set_network(&network);
        numerical.set_examples(xnor_examples().into());
        let first = numerical.compute_error(crate::weights::random_weights(&[2, 2, 1])).unwrap();
        let second = numerical.compute_error(crate::weights::random_weights(&[2, 2, 1])).unwrap();
        assert!(first > 0.0);
        assert_ne!(first, second);
    }

    #[test]
    fn delta_is_an_alias_for_epsilon() {
        let patch: NumericalGradientPatch =
            serde_json::from_value(json!({ "delta": 0.01 })).unwrap();
        assert_eq!(NumericalGradientOptions::default().merge(&patch).epsilon, 0.01);
        assert_eq!(NumericalGradientOptions::default().epsilon, 1e-7);
    }
}
