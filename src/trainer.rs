//! Utilities for training neural networks.

use crate::algorithm::{Algorithm, Optimizer};
use crate::algorithms::{self, GradientDescent, GradientDescentPatch};
use crate::error::Result;
use crate::example::ExampleSet;
use crate::feed_forward::Network;
use crate::report::{Event, Report, Reporters, Subscription};
use crate::weights::Weights;

use serde_json::Value;
use std::time::Instant;

/// A builder for training a network with gradient descent.
#[derive(Debug)]
pub struct Trainer {
    network: Network,
    cost: String,
    cost_options: Value,
    derivative: String,
    derivative_options: Value,
    optimizer_options: GradientDescentPatch,
    reporters: Reporters,
}

impl Trainer {
    /// Creates a new Trainer instance.
    ///
    /// The trainer is initialized with some default values. These defaults are:
    ///
    /// * Minimizes an unregularized `logistic-cost`.
    /// * Computes gradients with `back-propagation`.
    /// * Uses the default `GradientDescent` options.
    /// * Has no reporters.
    pub fn new(network: &Network) -> Self {
        Trainer {
            network: network.clone(),
            cost: "logistic-cost".to_string(),
            cost_options: Value::Object(Default::default()),
            derivative: "back-propagation".to_string(),
            derivative_options: Value::Object(Default::default()),
            optimizer_options: GradientDescentPatch::default(),
            reporters: Reporters::new(),
        }
    }

    /// Sets the registry name of the cost function to minimize.
    pub fn cost(mut self, name: &str) -> Self {
        self.cost = name.to_string();
        self
    }

    /// Sets the options of the cost function, as a flat JSON object.
    pub fn cost_options(mut self, options: Value) -> Self {
        self.cost_options = options;
        self
    }

    /// Sets the registry name of the derivative to descend along.
    pub fn derivative(mut self, name: &str) -> Self {
        self.derivative = name.to_string();
        self
    }

    /// Sets the options of the derivative, as a flat JSON object.
    pub fn derivative_options(mut self, options: Value) -> Self {
        self.derivative_options = options;
        self
    }

    pub fn optimizer_options(mut self, options: GradientDescentPatch) -> Self {
        self.optimizer_options = options;
        self
    }

    /// Subscribes `reporter` to the optimizer's reports.
    pub fn reporter<S, F>(mut self, subscription: S, reporter: F) -> Self
    where
        S: Into<Subscription>,
        F: FnMut(Event, &Report) + 'static,
    {
        self.reporters.subscribe(subscription, reporter);
        self
    }

    /// Trains a copy of the network on `examples`.
    ///
    /// Returns:
    ///   The optimized weights together with the trained network and its
    ///   cost, or an error if an algorithm name or its options are invalid.
    pub fn train<E: Into<ExampleSet>>(self, examples: E) -> Result<TrainingResult> {
        let examples = examples.into();
        let mut cost = algorithms::cost(&self.cost, &self.cost_options)?;
        let derivative = algorithms::derivative(&self.derivative, &self.derivative_options)?;

        let mut optimizer = GradientDescent::with_options(&self.optimizer_options);
        optimizer.set_cost(cost.clone()).set_derivative(derivative);
        optimizer.set_network(&self.network);
        optimizer.set_examples(examples.clone());
        optimizer.reporters_mut().extend(&self.reporters);

        let start_time = Instant::now();
        let weights = optimizer.run()?;
        let network = optimizer.network()?.clone();

        cost.set_network(&network);
        cost.set_examples(examples);
        let error = cost.run()?;
        log::info!(
            "trained {:?} network in {:.2} seconds, {} = {}",
            network.layers(),
            start_time.elapsed().as_secs_f64(),
            self.cost,
            error
        );

        Ok(TrainingResult {
            weights,
            network,
            error,
        })
    }
}

/// The outcome of a training run.
#[derive(Clone, Debug, Serialize)]
pub struct TrainingResult {
    pub weights: Weights,
    #[serde(skip)]
    pub network: Network,
    /// Cost of the trained network on the training examples.
    pub error: f64,
}

impl TrainingResult {
    /// Serializes the weights and the error as `{ "weights": .., "error": .. }`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
