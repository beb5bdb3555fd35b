//! Activation function types.

/// [Activation function](https://en.wikipedia.org/wiki/Activation_function)
/// types.
///
/// A network applies one activator to every non-input layer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Activator {
    /// Logistic sigmoid, `1 / (1 + e^-x)`
    Sigmoid,
    /// Hyperbolic tan function
    TanH,
    /// Rectified Linear Unit
    ReLU,
    /// Leaky Rectified Linear Unit
    ///
    /// Takes an `alpha` value to use for negative inputs.
    LeakyReLU(f64),
    /// Passes values through unchanged
    Identity,
}

impl Default for Activator {
    fn default() -> Self {
        Activator::Sigmoid
    }
}

impl Activator {
    /// Evaluates `f(x)` for the selected the activation function.
    pub fn f(&self, x: f64) -> f64 {
        match *self {
            Activator::Sigmoid => sigmoid(x),
            Activator::TanH => x.tanh(),
            Activator::ReLU => if x > 0.0 { x } else { 0.0 },
            Activator::LeakyReLU(alpha) => if x > 0.0 { x } else { alpha * x },
            Activator::Identity => x,
        }
    }

    /// Evaluates the derivative `f'(x)` at the raw, pre-activation value `x`.
    pub fn fprime(&self, x: f64) -> f64 {
        match *self {
            Activator::Sigmoid => {
                let y = sigmoid(x);
                y * (1.0 - y)
            }
            Activator::TanH => 1.0 - x.tanh().powi(2),
            Activator::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            Activator::LeakyReLU(alpha) => if x > 0.0 { 1.0 } else { alpha },
            Activator::Identity => 1.0,
        }
    }
}

/// The logistic sigmoid function.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
