use super::{BackPropagation, LogisticCost};
use crate::algorithm::{Algorithm, Context, Cost, Derivative, Optimizer};
use crate::error::Result;
use crate::feed_forward::Network;
use crate::matrix::Mat;
use crate::report::{Development, Event, OptimizationReport, Report};
use crate::weights::Weights;

use itertools::Itertools;

/// Options for `GradientDescent`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientDescentOptions {
    /// Factor applied to every derivative before it is subtracted.
    pub learning_rate: f64,
    /// Upper bound on the number of weight updates.
    pub iterations: usize,
    /// Optimization stops once the cost at a report drops to this value.
    pub target_error: f64,
    /// Number of iterations between cost evaluations. Zero disables them.
    pub report_frequency: usize,
    /// Optimization stops if the cost fell by less than this between two
    /// reports.
    pub minimal_speed: f64,
}

impl Default for GradientDescentOptions {
    fn default() -> Self {
        GradientDescentOptions {
            learning_rate: 1.0,
            iterations: 10000,
            target_error: 0.2,
            report_frequency: 1000,
            minimal_speed: 0.0,
        }
    }
}

impl GradientDescentOptions {
    pub fn merge(&self, patch: &GradientDescentPatch) -> GradientDescentOptions {
        GradientDescentOptions {
            learning_rate: patch.learning_rate.unwrap_or(self.learning_rate),
            iterations: patch.iterations.unwrap_or(self.iterations),
            target_error: patch.target_error.unwrap_or(self.target_error),
            report_frequency: patch.report_frequency.unwrap_or(self.report_frequency),
            minimal_speed: patch.minimal_speed.unwrap_or(self.minimal_speed),
        }
    }
}

/// Changes to `GradientDescentOptions`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientDescentPatch {
    pub learning_rate: Option<f64>,
    pub iterations: Option<usize>,
    pub target_error: Option<f64>,
    pub report_frequency: Option<usize>,
    pub minimal_speed: Option<f64>,
}

/// Batch gradient descent.
///
/// Every iteration asks the derivative for the gradient over all examples
/// and moves the weights against it. Every `report_frequency` iterations the
/// cost is evaluated and an `Optimization` report is emitted; the loop stops
/// early once the cost reaches `target_error` or improves by less than
/// `minimal_speed`.
#[derive(Clone, Debug)]
pub struct GradientDescent {
    context: Context,
    options: GradientDescentOptions,
    cost: Box<dyn Cost>,
    derivative: Box<dyn Derivative>,
}

impl Default for GradientDescent {
    fn default() -> Self {
        GradientDescent {
            context: Context::default(),
            options: GradientDescentOptions::default(),
            cost: Box::new(LogisticCost::new()),
            derivative: Box::new(BackPropagation::new()),
        }
    }
}

impl GradientDescent {
    /// Creates an optimizer minimizing `LogisticCost` with `BackPropagation`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(patch: &GradientDescentPatch) -> Self {
        let mut optimizer = Self::new();
        optimizer.set_options(patch);
        optimizer
    }

    pub fn options(&self) -> &GradientDescentOptions {
        &self.options
    }

    pub fn set_options(&mut self, patch: &GradientDescentPatch) -> &mut Self {
        self.options = self.options.merge(patch);
        self
    }

    pub fn set_cost(&mut self, cost: Box<dyn Cost>) -> &mut Self {
        self.cost = cost;
        self
    }

    pub fn set_derivative(&mut self, derivative: Box<dyn Derivative>) -> &mut Self {
        self.derivative = derivative;
        self
    }

    /// The optimizer's working copy of the network. After `run` it holds the
    /// optimized weights.
    pub fn network(&self) -> Result<&Network> {
        self.context.network()
    }

    /// Scales `derivative` by the learning rate.
    pub fn scale_derivative(&self, derivative: &Mat) -> Mat {
        derivative.scale(self.options.learning_rate)
    }

    /// Sets the working network's weights to `weights` and evaluates the
    /// cost function on them.
    pub fn compute_error(&mut self, weights: &[Mat]) -> Result<f64> {
        self.context.network_mut()?.set_weights(weights.to_vec())?;
        self.evaluate()
    }

    fn evaluate(&mut self) -> Result<f64> {
        self.cost.set_network(self.context.network()?);
        self.cost.set_examples(self.context.examples());
        self.cost.run()
    }

    /// Performs a single descent step on the working network.
    fn step(&mut self) -> Result<()> {
        self.derivative.set_network(self.context.network()?);
        self.derivative.set_examples(self.context.examples());
        let derivatives = self.derivative.run()?;

        let network = self.context.network()?;
        network.validate_weights(&derivatives)?;
        let updated: Weights = network
            .weights()
            .iter()
            .zip_eq(&derivatives)
            .map(|(weights, derivative)| weights - &self.scale_derivative(derivative))
            .collect();
        self.context.network_mut()?.set_weights(updated)?;
        Ok(())
    }

    fn report(&self, event: Event, iterations: usize, error: f64, last_error: f64) {
        let report = OptimizationReport {
            iterations,
            error,
            speed: last_error - error,
            development: Development::between(last_error, error),
        };
        self.context.report(event, &Report::Optimization(report));
    }
}

impl Algorithm for GradientDescent {
    fn context(&self) -> &Context {
        &self.context
    }

    fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }
}

impl Optimizer for GradientDescent {
    /// Optimizes the weights of the working network, returning them.
    ///
    /// The example set must not be empty.
    fn run(&mut self) -> Result<Weights> {
        let options = self.options;
        let mut last_error = f64::INFINITY;
        let mut iteration = 0;

        while iteration < options.iterations {
            self.step()?;

            if options.report_frequency > 0 && iteration % options.report_frequency == 0 {
                let error = self.evaluate()?;
                let speed = last_error - error;
                log::debug!("iteration {}: error={}, speed={}", iteration, error, speed);
                self.report(Event::Optimization, iteration, error, last_error);

                if error <= options.target_error || speed < options.minimal_speed {
                    break;
                }
                last_error = error;
            }
            iteration += 1;
        }

        let error = self.evaluate()?;
        log::info!(
            "optimization finished after {} iterations with error {}",
            iteration,
            error
        );
        self.report(Event::FinishedOptimization, iteration, error, last_error);
        Ok(self.context.network()?.weights().to_vec())
    }
}
