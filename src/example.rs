//! Labelled training data.

use crate::error::Result;

use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::rc::Rc;

/// A single labelled example.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: Vec<f64>,
    pub output: Vec<f64>,
}

impl Example {
    pub fn new<I, O>(input: I, output: O) -> Self
    where
        I: Into<Vec<f64>>,
        O: Into<Vec<f64>>,
    {
        Example {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// An ordered, immutable set of examples shared between algorithms.
pub type ExampleSet = Rc<[Example]>;

/// Parses examples from a JSON array of `{ "input": [..], "output": [..] }`.
pub fn import_examples(json: &str) -> Result<ExampleSet> {
    let examples: Vec<Example> = serde_json::from_str(json)?;
    Ok(examples.into())
}

/// Writes examples as a JSON array of `{ "input": [..], "output": [..] }`.
pub fn export_examples(examples: &[Example]) -> Result<String> {
    Ok(serde_json::to_string(examples)?)
}

/// Splits a pool of examples into disjoint, named subsets.
///
/// Every subset is drawn at random from the examples no earlier subset has
/// used. Asking for the same name twice returns the cached subset.
#[derive(Debug)]
pub struct Examples {
    examples: Vec<Example>,
    unused: Vec<Example>,
    sets: HashMap<String, ExampleSet>,
}

impl Examples {
    pub fn new(examples: Vec<Example>) -> Self {
        Examples {
            unused: examples.clone(),
            examples,
            sets: HashMap::new(),
        }
    }

    /// Returns the subset called `name`, creating it on first use.
    ///
    /// An `amount` below 1 is read as a fraction of the whole pool, anything
    /// else as an absolute count. The subset is smaller than requested if the
    /// pool runs dry.
    pub fn get_set(&mut self, name: &str, amount: f64) -> ExampleSet {
        if let Some(set) = self.sets.get(name) {
            return set.clone();
        }
        let wanted = if amount < 1.0 {
            (self.examples.len() as f64 * amount).floor() as usize
        } else {
            amount as usize
        };
        self.unused.shuffle(&mut rand::thread_rng());
        let keep = self.unused.len().saturating_sub(wanted);
        let set: ExampleSet = self.unused.split_off(keep).into();
        self.sets.insert(name.to_string(), set.clone());
        set
    }

    /// Number of examples not yet assigned to a subset.
    pub fn unused_len(&self) -> usize {
        self.unused.len()
    }

    pub fn to_vec(&self) -> Vec<Example> {
        self.examples.clone()
    }
}
