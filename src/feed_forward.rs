//! A [Feedforward neural network]
//! (https://en.wikipedia.org/wiki/Feedforward_neural_network).
//!
//! # Example
//!
//! A hand-weighted network that computes XNOR:
//!
//! ```
//! # use neurons::feed_forward::*;
//! let network = Network::from_json(
//!     r#"{
//!         "layers": [2, 2, 1],
//!         "weights": [
//!             [[-30, 20, 20], [10, -20, -20]],
//!             [[-10, 20, 20]]
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! fn classify(out: Vec<f64>) -> bool {
//!     out[0] > 0.5
//! }
//! assert_eq!(classify(network.run(&[0.0, 0.0]).unwrap()), true);
//! assert_eq!(classify(network.run(&[0.0, 1.0]).unwrap()), false);
//! assert_eq!(classify(network.run(&[1.0, 0.0]).unwrap()), false);
//! assert_eq!(classify(network.run(&[1.0, 1.0]).unwrap()), true);
//! ```

pub use crate::activator::Activator;

use crate::error::{Error, Result};
use crate::matrix::Mat;
use crate::utils::{add_bias_unit, Back, Front};
use crate::weights::{self, Weights};

/// The state of one layer after propagating an input.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerOutput {
    /// Weighted sums before activation.
    pub raw: Vec<f64>,
    /// Activated values.
    pub values: Vec<f64>,
}

/// The persisted form of a network: its layer sequence and weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Setup {
    pub layers: Vec<usize>,
    pub weights: Weights,
}

/// A fully connected feedforward network
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    layers: Vec<usize>,
    weights: Weights,
    activator: Activator,
}

impl Network {
    /// Creates a new, untrained network with random weights.
    ///
    /// Arguments:
    ///  * `layers` - the number of units in each layer, input layer first.
    ///
    /// Fails unless there are at least two layers, none of them empty.
    pub fn new(layers: &[usize]) -> Result<Self> {
        Network::with_weights(layers, weights::random_weights(layers))
    }

    /// Creates a network from a layer sequence and matching weights.
    pub fn with_weights(layers: &[usize], weights: Weights) -> Result<Self> {
        weights::validate(layers, &weights)?;
        Ok(Network {
            layers: layers.into(),
            weights,
            activator: Activator::default(),
        })
    }

    pub fn from_setup(setup: Setup) -> Result<Self> {
        Network::with_weights(&setup.layers, setup.weights)
    }

    pub fn to_setup(&self) -> Setup {
        Setup {
            layers: self.layers.clone(),
            weights: self.weights.clone(),
        }
    }

    /// Parses a network from its JSON form,
    /// `{ "layers": [..], "weights": [[[..], ..], ..] }`.
    pub fn from_json(json: &str) -> Result<Self> {
        Network::from_setup(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_setup())?)
    }

    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    pub fn weights(&self) -> &[Mat] {
        &self.weights
    }

    pub fn activator(&self) -> Activator {
        self.activator
    }

    /// Returns the size of the input layer to the network.
    pub fn input_len(&self) -> usize {
        *self.layers.front()
    }

    /// Returns the size of the output layer from the network.
    pub fn output_len(&self) -> usize {
        *self.layers.back()
    }

    /// Replaces the weights of the network.
    ///
    /// Fails without touching the current weights if `weights` does not fit
    /// the layer sequence.
    pub fn set_weights(&mut self, weights: Weights) -> Result<&mut Self> {
        weights::validate(&self.layers, &weights)?;
        self.weights = weights;
        Ok(self)
    }

    /// Sets the activation function to use for every non-input layer.
    pub fn set_activator(&mut self, activator: Activator) -> &mut Self {
        self.activator = activator;
        self
    }

    /// Checks `weights` against the layer sequence of this network.
    pub fn validate_weights(&self, weights: &[Mat]) -> Result<()> {
        weights::validate(&self.layers, weights)
    }

    /// Checks that `output` has the width of the output layer.
    pub fn validate_output(&self, output: &[f64]) -> Result<()> {
        if output.len() != self.output_len() {
            return Err(Error::OutputLength {
                expected: self.output_len(),
                actual: output.len(),
            });
        }
        Ok(())
    }

    /// Feeds the provided `input` through the network, returning the output
    /// layer.
    pub fn run(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut trace = self.propagate(input)?;
        Ok(trace.pop().map(|layer| layer.values).unwrap_or_default())
    }

    /// Feeds the provided `input` through the network, returning the raw and
    /// activated values of every layer, the input layer included.
    pub fn propagate(&self, input: &[f64]) -> Result<Vec<LayerOutput>> {
        if input.len() != self.input_len() {
            return Err(Error::InputLength {
                expected: self.input_len(),
                actual: input.len(),
            });
        }
        let mut trace = Vec::with_capacity(self.layers.len());
        trace.push(LayerOutput {
            raw: input.to_vec(),
            values: input.to_vec(),
        });
        for weights in &self.weights {
            let raw = weights.dot(&add_bias_unit(&trace.back().values));
            let values = raw.iter().map(|&x| self.activator.f(x)).collect();
            trace.push(LayerOutput { raw, values });
        }
        Ok(trace)
    }
}
