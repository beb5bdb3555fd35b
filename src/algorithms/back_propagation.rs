use crate::algorithm::{Algorithm, Context, Derivative};
use crate::error::Result;
use crate::matrix::{element_multiply, subtract, Mat};
use crate::utils::{add_bias_unit, Back};
use crate::weights::{zero_weights, Weights};

use itertools::Itertools;

/// Options for `BackPropagation`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackPropagationOptions {
    /// Weight decay multiplier, applied to every weight but the bias column.
    pub regularization: f64,
    /// Report progress after every `n`th example.
    pub report_frequency: Option<usize>,
    /// Accumulated deltas to start from instead of zero matrices.
    pub delta: Option<Weights>,
}

impl BackPropagationOptions {
    pub fn merge(&self, patch: &BackPropagationPatch) -> BackPropagationOptions {
        BackPropagationOptions {
            regularization: patch.regularization.unwrap_or(self.regularization),
            report_frequency: patch.report_frequency.or(self.report_frequency),
            delta: patch.delta.clone().or_else(|| self.delta.clone()),
        }
    }
}

/// Changes to `BackPropagationOptions`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackPropagationPatch {
    #[serde(alias = "lamda")]
    pub regularization: Option<f64>,
    pub report_frequency: Option<usize>,
    pub delta: Option<Weights>,
}

/// Computes the gradient of the logistic cost by propagating each example's
/// output error backwards through the network.
#[derive(Clone, Debug, Default)]
pub struct BackPropagation {
    context: Context,
    options: BackPropagationOptions,
}

impl BackPropagation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(patch: &BackPropagationPatch) -> Self {
        let mut derivative = Self::new();
        derivative.set_options(patch);
        derivative
    }

    pub fn options(&self) -> &BackPropagationOptions {
        &self.options
    }

    pub fn set_options(&mut self, patch: &BackPropagationPatch) -> &mut Self {
        self.options = self.options.merge(patch);
        self
    }
}

impl Algorithm for BackPropagation {
    fn context(&self) -> &Context {
        &self.context
    }

    fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }
}

impl Derivative for BackPropagation {
    fn run(&mut self) -> Result<Weights> {
        let network = self.context.network()?;
        let examples = self.context.examples();
        let activator = network.activator();

        let mut delta = match self.options.delta {
            Some(ref delta) => {
                network.validate_weights(delta)?;
                delta.clone()
            }
            None => zero_weights(network.layers()),
        };
        // Transposed weights without their bias column, used to pass errors back.
        let backward: Vec<Mat> = network
            .weights()
            .iter()
            .map(|weights| weights.without_first_column().transpose())
            .collect();

        for (i, example) in examples.iter().enumerate() {
            network.validate_output(&example.output)?;
            let trace = network.propagate(&example.input)?;
            let mut errors = Vec::with_capacity(trace.len() - 1);
            errors.push(subtract(&trace.back().values, &example.output));
            for j in (1..trace.len() - 1).rev() {
                let propagated = backward[j].dot(errors.back());
                let slope: Vec<f64> = trace[j].raw.iter().map(|&x| activator.fprime(x)).collect();
                errors.push(element_multiply(&propagated, &slope));
            }
            errors.reverse();

            for (j, error) in errors.iter().enumerate() {
                delta[j] += &Mat::outer(error, &add_bias_unit(&trace[j].values));
            }
            self.context.report_progress(i, self.options.report_frequency);
        }
        self.context.report_finished(examples.len());

        let scale = 1.0 / examples.len() as f64;
        let regularization = self.options.regularization;
        Ok(delta
            .iter()
            .zip_eq(network.weights())
            .map(|(delta, weights)| {
                let mut derivative = delta.scale(scale);
                if regularization != 0.0 {
                    derivative += &weights.map(|w, _, col| {
                        if col == 0 {
                            0.0
                        } else {
                            w * regularization
                        }
                    });
                }
                derivative
            })
            .collect())
    }

    fn box_clone(&self) -> Box<dyn Derivative> {
        Box::new(self.clone())
    }
}
