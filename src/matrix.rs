//! A thin dense matrix wrapper used for weights and gradients.

use crate::error::{Error, Result};

use ndarray::{s, Array2, ArrayView1, Axis};
use rand::Rng;
use rand_distr::Distribution;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A dense, row-major matrix of `f64` values.
///
/// Row `i` of a weight matrix holds the incoming weights of unit `i` in the
/// next layer. Cloning always copies the backing storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Mat {
    data: Array2<f64>,
}

impl Mat {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Mat {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Creates a matrix with every element drawn from `distribution`.
    pub fn random<D, R>(distribution: &D, rng: &mut R, rows: usize, cols: usize) -> Self
    where
        D: Distribution<f64>,
        R: Rng + ?Sized,
    {
        Mat {
            data: Array2::from_shape_fn((rows, cols), |_| distribution.sample(rng)),
        }
    }

    /// Builds a matrix from a list of rows.
    ///
    /// An empty list produces a `0 x 0` matrix. Fails if the rows differ in
    /// length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut flat = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::RaggedMatrix);
            }
            flat.extend_from_slice(row);
        }
        let data = Array2::from_shape_vec((rows.len(), cols), flat)
            .map_err(|_| Error::RaggedMatrix)?;
        Ok(Mat { data })
    }

    /// Exports the matrix as a nested list of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.outer_iter().map(|row| row.to_vec()).collect()
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[[row, col]] = value;
    }

    /// Multiplies the matrix with the column vector `vector`.
    pub fn dot(&self, vector: &[f64]) -> Vec<f64> {
        assert_eq!(vector.len(), self.cols());
        self.data.dot(&ArrayView1::from(vector)).to_vec()
    }

    pub fn transpose(&self) -> Mat {
        Mat {
            data: self.data.t().to_owned(),
        }
    }

    /// Applies `f(value, row, col)` to every element.
    pub fn map<F>(&self, mut f: F) -> Mat
    where
        F: FnMut(f64, usize, usize) -> f64,
    {
        let mut data = self.data.clone();
        for ((row, col), value) in data.indexed_iter_mut() {
            *value = f(*value, row, col);
        }
        Mat { data }
    }

    /// Returns a copy with column 0 (the bias weights) removed.
    pub fn without_first_column(&self) -> Mat {
        Mat {
            data: self.data.slice(s![.., 1..]).to_owned(),
        }
    }

    /// Computes the outer product `column * row^T`.
    pub fn outer(column: &[f64], row: &[f64]) -> Mat {
        let column = ArrayView1::from(column).insert_axis(Axis(1));
        let row = ArrayView1::from(row).insert_axis(Axis(0));
        Mat {
            data: column.dot(&row),
        }
    }

    /// Returns every element multiplied by `factor`.
    pub fn scale(&self, factor: f64) -> Mat {
        Mat {
            data: &self.data * factor,
        }
    }

    pub fn sum(&self) -> f64 {
        self.data.sum()
    }

    /// Returns true if both matrices share a shape and every pair of
    /// elements differs by at most `tolerance`.
    pub fn approx_eq(&self, other: &Mat, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Iterates over all elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }
}

impl<'a> AddAssign<&'a Mat> for Mat {
    fn add_assign(&mut self, other: &Mat) {
        self.data += &other.data;
    }
}

impl<'a> SubAssign<&'a Mat> for Mat {
    fn sub_assign(&mut self, other: &Mat) {
        self.data -= &other.data;
    }
}

impl<'a, 'b> Add<&'b Mat> for &'a Mat {
    type Output = Mat;

    fn add(self, other: &Mat) -> Mat {
        Mat {
            data: &self.data + &other.data,
        }
    }
}

impl<'a, 'b> Sub<&'b Mat> for &'a Mat {
    type Output = Mat;

    fn sub(self, other: &Mat) -> Mat {
        Mat {
            data: &self.data - &other.data,
        }
    }
}

impl From<Array2<f64>> for Mat {
    fn from(data: Array2<f64>) -> Self {
        Mat { data }
    }
}

impl std::convert::TryFrom<Vec<Vec<f64>>> for Mat {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Mat::from_rows(&rows)
    }
}

impl From<Mat> for Vec<Vec<f64>> {
    fn from(mat: Mat) -> Self {
        mat.to_rows()
    }
}

/// Elementwise product of two equally sized vectors.
pub fn element_multiply(a: &[f64], b: &[f64]) -> Vec<f64> {
    assert_eq!(a.len(), b.len());
    (&ArrayView1::from(a) * &ArrayView1::from(b)).to_vec()
}

/// Elementwise difference `a - b` of two equally sized vectors.
pub fn subtract(a: &[f64], b: &[f64]) -> Vec<f64> {
    assert_eq!(a.len(), b.len());
    (&ArrayView1::from(a) - &ArrayView1::from(b)).to_vec()
}
