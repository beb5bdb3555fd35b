use super::{penalty, sum_terms, CostOptions, CostPatch};
use crate::algorithm::{Algorithm, Context, Cost};
use crate::error::Result;
use crate::utils::square;

/// A regularized squared error cost.
///
/// Reported as `-1/N * sum((h - y)^2)` plus the weight decay penalty. The sum
/// is negated, the penalty is not.
#[derive(Clone, Debug, Default)]
pub struct LinearCost {
    context: Context,
    options: CostOptions,
}

impl LinearCost {
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

impl Algorithm for LinearCost {
    fn context(&self) -> &Context {
        &self.context
    }

    fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }
}

impl Cost for LinearCost {
    fn run(&mut self) -> Result<f64> {
        let cost = sum_terms(&self.context, self.options.report_frequency, |h, y| square(h - y))?;
        let examples = self.context.examples().len();
        let network = self.context.network()?;
        Ok(-cost / examples as f64 + penalty(network, self.options.regularization, examples))
    }

    fn box_clone(&self) -> Box<dyn Cost> {
        Box::new(self.clone())
    }
}
