use super::{penalty, sum_terms, CostOptions, CostPatch};
use crate::algorithm::{Algorithm, Context, Cost};
use crate::error::Result;

/// The logistic (cross-entropy) cost of a network's predictions.
///
/// `-1/N * sum(y ln(h) + (1 - y) ln(1 - h))` over every output unit of every
/// example, plus the weight decay penalty.
#[derive(Clone, Debug, Default)]
pub struct LogisticCost {
    context: Context,
    options: CostOptions,
}

impl LogisticCost {
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

impl Algorithm for LogisticCost {
    fn context(&self) -> &Context {
        &self.context
    }

    fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }
}

impl Cost for LogisticCost {
    fn run(&mut self) -> Result<f64> {
        let cost = sum_terms(&self.context, self.options.report_frequency, |h, y| {
            y * h.ln() + (1.0 - y) * (1.0 - h).ln()
        })?;
        let examples = self.context.examples().len();
        let network = self.context.network()?;
        Ok(-cost / examples as f64 + penalty(network, self.options.regularization, examples))
    }

    fn box_clone(&self) -> Box<dyn Cost> {
        Box::new(self.clone())
    }
}
