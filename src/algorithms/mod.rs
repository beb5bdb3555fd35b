//! Cost functions, derivatives and the gradient descent optimizer.
//!
//! Every algorithm takes its options as a patch: a set of optional values
//! that is merged onto the current options, leaving unset keys alone.
//! Patches deserialize from flat JSON objects such as
//! `{ "regularization": 0.1, "reportFrequency": 10 }`.

mod back_propagation;
mod classification_error;
mod gradient_descent;
mod linear_cost;
mod logistic_cost;
mod numerical_gradient;
mod squared_error;

pub use self::back_propagation::{BackPropagation, BackPropagationOptions, BackPropagationPatch};
pub use self::classification_error::ClassificationError;
pub use self::gradient_descent::{GradientDescent, GradientDescentOptions, GradientDescentPatch};
pub use self::linear_cost::LinearCost;
pub use self::logistic_cost::LogisticCost;
pub use self::numerical_gradient::{
    NumericalGradient, NumericalGradientOptions, NumericalGradientPatch,
};
pub use self::squared_error::SquaredError;

use crate::algorithm::{Context, Cost, Derivative};
use crate::error::{Error, Result};
use crate::feed_forward::Network;
use crate::utils::square;

use itertools::Itertools;

/// Options shared by the cost functions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostOptions {
    /// Weight decay multiplier. Ignored by `SquaredError` and
    /// `ClassificationError`.
    pub regularization: f64,
    /// Report progress after every `n`th example.
    pub report_frequency: Option<usize>,
}

impl Default for CostOptions {
    fn default() -> Self {
        CostOptions {
            regularization: 0.0,
            report_frequency: None,
        }
    }
}

impl CostOptions {
    pub fn merge(&self, patch: &CostPatch) -> CostOptions {
        CostOptions {
            regularization: patch.regularization.unwrap_or(self.regularization),
            report_frequency: patch.report_frequency.or(self.report_frequency),
        }
    }
}

/// Changes to `CostOptions`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostPatch {
    #[serde(alias = "lamda")]
    pub regularization: Option<f64>,
    pub report_frequency: Option<usize>,
}

/// Sums `term(hypothesis, expected)` over every output unit of every example.
///
/// Reports progress through `context` as it goes.
fn sum_terms<F>(context: &Context, report_frequency: Option<usize>, mut term: F) -> Result<f64>
where
    F: FnMut(f64, f64) -> f64,
{
    let network = context.network()?;
    let examples = context.examples();
    let mut sum = 0.0;
    for (i, example) in examples.iter().enumerate() {
        network.validate_output(&example.output)?;
        let hypothesis = network.run(&example.input)?;
        for (&output, &expected) in hypothesis.iter().zip_eq(&example.output) {
            sum += term(output, expected);
        }
        context.report_progress(i, report_frequency);
    }
    context.report_finished(examples.len());
    Ok(sum)
}

/// The weight decay penalty, `lambda / (2N)` times the sum of every squared
/// weight, bias weights included.
fn penalty(network: &Network, regularization: f64, examples: usize) -> f64 {
    let squared: f64 = network
        .weights()
        .iter()
        .map(|weights| weights.map(|w, _, _| square(w)).sum())
        .sum();
    regularization / (2.0 * examples as f64) * squared
}

/// Creates a cost function by name, configured from a flat JSON object.
///
/// Known names are `logistic-cost`, `linear-cost`, `squared-error` and
/// `classification-error`.
pub fn cost(name: &str, options: &serde_json::Value) -> Result<Box<dyn Cost>> {
    let patch: CostPatch = serde_json::from_value(options.clone())?;
    Ok(match name {
        "logistic-cost" => Box::new(LogisticCost::with_options(&patch)),
        "linear-cost" => Box::new(LinearCost::with_options(&patch)),
        "squared-error" => Box::new(SquaredError::with_options(&patch)),
        "classification-error" => Box::new(ClassificationError::with_options(&patch)),
        _ => return Err(Error::UnknownAlgorithm(name.to_string())),
    })
}

/// Creates a derivative by name, configured from a flat JSON object.
///
/// Known names are `back-propagation` and `numerical-gradient`; the latter
/// estimates the gradient of a `LogisticCost`.
pub fn derivative(name: &str, options: &serde_json::Value) -> Result<Box<dyn Derivative>> {
    Ok(match name {
        "back-propagation" => {
            let patch: BackPropagationPatch = serde_json::from_value(options.clone())?;
            Box::new(BackPropagation::with_options(&patch))
        }
        "numerical-gradient" => {
            let patch: NumericalGradientPatch = serde_json::from_value(options.clone())?;
            Box::new(NumericalGradient::with_options(&patch))
        }
        _ => return Err(Error::UnknownAlgorithm(name.to_string())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::example::{Example, ExampleSet};
    use crate::feed_forward::tests::{xnor_examples, XNOR};

    use serde_json::json;

    #[test]
    fn merge_keeps_unset_keys() {
        let options = CostOptions::default().merge(&CostPatch {
            regularization: Some(2.0),
            report_frequency: None,
        });
        let merged = options.merge(&CostPatch {
            regularization: None,
            report_frequency: Some(5),
        });
        assert_eq!(merged.regularization, 2.0);
        assert_eq!(merged.report_frequency, Some(5));
        assert_eq!(options.report_frequency, None);
    }

    #[test]
    fn patch_accepts_historical_alias() {
        let patch: CostPatch = serde_json::from_value(json!({ "lamda": 0.5 })).unwrap();
        assert_eq!(patch.regularization, Some(0.5));
        let patch: CostPatch =
            serde_json::from_value(json!({ "regularization": 1.5, "reportFrequency": 3 }))
                .unwrap();
        assert_eq!(patch.regularization, Some(1.5));
        assert_eq!(patch.report_frequency, Some(3));
    }

    #[test]
    fn registry_builds_known_algorithms() {
        let network = Network::from_json(XNOR).unwrap();
        for name in &["logistic-cost", "linear-cost", "squared-error", "classification-error"] {
            let mut cost = cost(name, &json!({})).unwrap();
            cost.set_network(&network);
            cost.set_examples(xnor_examples().into());
            assert!(cost.run().unwrap().is_finite());
        }
        for name in &["back-propagation", "numerical-gradient"] {
            let mut derivative = derivative(name, &json!({})).unwrap();
            derivative.set_network(&network);
            derivative.set_examples(xnor_examples().into());
            let gradient = derivative.run().unwrap();
            assert!(network.validate_weights(&gradient).is_ok());
        }
    }

    #[test]
    fn registry_rejects_unknown_names() {
        assert!(matches!(
            cost("hinge-loss", &json!({})),
            Err(Error::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            derivative("adam", &json!({})),
            Err(Error::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn registry_rejects_malformed_options() {
        assert!(matches!(
            cost("logistic-cost", &json!({ "regularization": "high" })),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn costs_reject_wrong_output_width() {
        let network = Network::from_json(XNOR).unwrap();
        let examples: ExampleSet = vec![Example::new(vec![0.0, 0.0], vec![1.0, 0.0])].into();
        for name in &["logistic-cost", "linear-cost", "squared-error", "classification-error"] {
            let mut cost = cost(name, &json!({})).unwrap();
            cost.set_network(&network);
            cost.set_examples(examples.clone());
            assert!(
                matches!(cost.run(), Err(Error::OutputLength { expected: 1, actual: 2 })),
                "{} accepted a two-unit output",
                name
            );
        }
    }

    #[test]
    fn running_without_network_fails() {
        let mut cost = LogisticCost::new();
        cost.set_examples(xnor_examples().into());
        assert!(matches!(cost.run(), Err(Error::MissingNetwork)));
    }
}
