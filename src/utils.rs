/// A trait that provides easy access to the first element of a slice.
pub trait Front<T> {
    fn front(&self) -> &T;
}

/// A trait that provides easy access to the last element of a slice.
pub trait Back<T> {
    fn back(&self) -> &T;
}

impl<T> Front<T> for [T] {
    #[inline(always)]
    fn front(&self) -> &T {
        &self[0]
    }
}

impl<T> Back<T> for [T] {
    #[inline(always)]
    fn back(&self) -> &T {
        &self[self.len() - 1]
    }
}

/// Returns a copy of `values` with a constant bias unit of 1 in front.
pub fn add_bias_unit(values: &[f64]) -> Vec<f64> {
    let mut biased = Vec::with_capacity(values.len() + 1);
    biased.push(1.0);
    biased.extend_from_slice(values);
    biased
}

pub fn square(x: f64) -> f64 {
    x * x
}

/// Rounds every element to the nearest integer.
pub fn round(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.round()).collect()
}

/// The range of a set of values, used to map data into `[-1, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
    /// The larger of `|min|` and `|max|`.
    pub abs: f64,
    pub avg: f64,
}

impl Scale {
    /// Measures the scale of `values`.
    ///
    /// An empty slice yields infinite bounds and a NaN average.
    pub fn find(values: &[f64]) -> Self {
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let avg = values.iter().sum::<f64>() / values.len() as f64;
        Scale {
            min,
            max,
            abs: min.abs().max(max.abs()),
            avg,
        }
    }

    /// Maps `value` from `[min, max]` onto `[-1, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        2.0 * (value - self.min) / (self.max - self.min) - 1.0
    }

    /// Inverse of `normalize`.
    pub fn denormalize(&self, value: f64) -> f64 {
        (value + 1.0) * (self.max - self.min) / 2.0 + self.min
    }
}
