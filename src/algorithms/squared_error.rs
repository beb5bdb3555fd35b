use super::{sum_terms, CostOptions, CostPatch};
use crate::algorithm::{Algorithm, Context, Cost};
use crate::error::Result;
use crate::utils::square;

/// The plain squared error, `1/(2N) * sum((h - y)^2)`.
///
/// Unlike `LinearCost` the sum is not negated and no penalty is added;
/// `regularization` is ignored.
#[derive(Clone, Debug, Default)]
pub struct SquaredError {
    context: Context,
    options: CostOptions,
}

impl SquaredError {
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

impl Algorithm for SquaredError {
    fn context(&self) -> &Context {
        &self.context
    }

    fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }
}

impl Cost for SquaredError {
    fn run(&mut self) -> Result<f64> {
        let cost = sum_terms(&self.context, self.options.report_frequency, |h, y| square(h - y))?;
        Ok(cost / (2.0 * self.context.examples().len() as f64))
    }

    fn box_clone(&self) -> Box<dyn Cost> {
        Box::new(self.clone())
    }
}
