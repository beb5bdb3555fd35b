use super::{CostOptions, CostPatch};
use crate::algorithm::{Algorithm, Context, Cost};
use crate::error::Result;
use crate::utils::round;

/// The fraction of examples a network misclassifies.
///
/// An example counts as classified when its rounded output equals the
/// expected output exactly.
#[derive(Clone, Debug, Default)]
pub struct ClassificationError {
    context: Context,
    options: CostOptions,
}

impl ClassificationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(patch: &CostPatch) -> Self {
        let mut cost = Self::new();
        cost.set_options(patch);
        cost
    }

    pub fn options(&self) -> &CostOptions {
        &self.options
    }

    pub fn set_options(&mut self, patch: &CostPatch) -> &mut Self {
        self.options = self.options.merge(patch);
        self
    }
}

impl Algorithm for ClassificationError {
    fn context(&self) -> &Context {
        &self.context
    }

    fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }
}

impl Cost for ClassificationError {
    fn run(&mut self) -> Result<f64> {
        let network = self.context.network()?;
        let examples = self.context.examples();
        let mut errors = 0;
        for (i, example) in examples.iter().enumerate() {
            network.validate_output(&example.output)?;
            if round(&network.run(&example.input)?) != example.output {
                errors += 1;
            }
            self.context.report_progress(i, self.options.report_frequency);
        }
        self.context.report_finished(examples.len());
        Ok(errors as f64 / examples.len() as f64)
    }

    fn box_clone(&self) -> Box<dyn Cost> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::Example;
    use crate::feed_forward::tests::{xnor_examples, XNOR};
    use crate::feed_forward::Network;

    fn error_of(examples: Vec<Example>) -> f64 {
        let mut cost = ClassificationError::new();
        cost.set_network(&Network::from_json(XNOR).unwrap());
        cost.set_examples(examples.into());
        cost.run().unwrap()
    }

    #[test]
    fn perfect_classification() {
        assert_eq!(error_of(xnor_examples()), 0.0);
    }

    #[test]
    fn complete_misclassification() {
        let inverted = xnor_examples()
            .into_iter()
            .map(|e| Example::new(e.input, vec![1.0 - e.output[0]]))
            .collect();
        assert_eq!(error_of(inverted), 1.0);
    }

    #[test]
    fn partial_misclassification() {
        let mut examples = xnor_examples();
        examples[0].output = vec![0.0];
        assert_eq!(error_of(examples), 0.25);
    }
}
