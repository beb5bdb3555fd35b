//! Capabilities shared by cost functions, derivatives and optimizers.

use crate::error::{Error, Result};
use crate::example::ExampleSet;
use crate::feed_forward::Network;
use crate::report::{Event, Report, Reporters};
use crate::weights::Weights;

use std::fmt;

/// State every algorithm carries: its own copy of the network, the examples
/// to work on and the reporters to notify.
#[derive(Clone, Debug, Default)]
pub struct Context {
    network: Option<Network>,
    examples: Option<ExampleSet>,
    reporters: Reporters,
}

impl Context {
    pub fn network(&self) -> Result<&Network> {
        self.network.as_ref().ok_or(Error::MissingNetwork)
    }

    pub fn network_mut(&mut self) -> Result<&mut Network> {
        self.network.as_mut().ok_or(Error::MissingNetwork)
    }

    pub fn set_network(&mut self, network: &Network) {
        self.network = Some(network.clone());
    }

    /// The configured examples. An algorithm without examples sees an empty
    /// set.
    pub fn examples(&self) -> ExampleSet {
        self.examples.clone().unwrap_or_else(|| Vec::new().into())
    }

    pub fn set_examples(&mut self, examples: ExampleSet) {
        self.examples = Some(examples);
    }

    pub fn reporters(&self) -> &Reporters {
        &self.reporters
    }

    pub fn reporters_mut(&mut self) -> &mut Reporters {
        &mut self.reporters
    }

    pub fn report(&self, event: Event, report: &Report) {
        self.reporters.report(event, report);
    }

    /// Emits the mid-pass report after example `index` if `frequency` asks
    /// for one.
    pub fn report_progress(&self, index: usize, frequency: Option<usize>) {
        if let Some(frequency) = frequency.filter(|&f| f > 0) {
            if index % frequency == 0 {
                self.report(
                    Event::Computation,
                    &Report::Computation {
                        iterations: index + 1,
                    },
                );
            }
        }
    }

    /// Emits the end-of-pass report.
    pub fn report_finished(&self, iterations: usize) {
        self.report(Event::FinishedComputation, &Report::Computation { iterations });
    }
}

/// Something that runs over a network and a set of examples.
///
/// Setting a network stores a deep copy; the caller's network is never
/// modified.
pub trait Algorithm {
    fn context(&self) -> &Context;

    fn context_mut(&mut self) -> &mut Context;

    fn set_network(&mut self, network: &Network) {
        self.context_mut().set_network(network);
    }

    fn set_examples(&mut self, examples: ExampleSet) {
        self.context_mut().set_examples(examples);
    }

    fn reporters_mut(&mut self) -> &mut Reporters {
        self.context_mut().reporters_mut()
    }
}

/// A scalar measure of how well a network fits its examples.
pub trait Cost: Algorithm + fmt::Debug {
    fn run(&mut self) -> Result<f64>;

    fn box_clone(&self) -> Box<dyn Cost>;
}

/// Computes the gradient of a cost with respect to every weight.
///
/// The result has one matrix per weight matrix, shaped alike.
pub trait Derivative: Algorithm + fmt::Debug {
    fn run(&mut self) -> Result<Weights>;

    fn box_clone(&self) -> Box<dyn Derivative>;
}

/// Adjusts the weights of its network to minimize a cost.
pub trait Optimizer: Algorithm + fmt::Debug {
    /// Returns the optimized weights. The optimizer's network holds them
    /// afterwards.
    fn run(&mut self) -> Result<Weights>;
}

impl Clone for Box<dyn Cost> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

impl Clone for Box<dyn Derivative> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}
