//! Error types shared by the network and its training algorithms.

use thiserror::Error;

/// A convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building or training a network.
#[derive(Debug, Error)]
pub enum Error {
    /// A weight matrix does not fit the layer transition it is used for.
    ///
    /// Shapes are reported as `(rows, cols)`.
    #[error(
        "dimension mismatch of given weights: transition {transition} expects \
         {expected:?}, got {actual:?}"
    )]
    DimensionMismatch {
        transition: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// The number of weight matrices does not match the number of layer
    /// transitions.
    #[error("expected {expected} weight matrices, got {actual}")]
    WeightCount { expected: usize, actual: usize },

    /// An input vector was fed to a network with a different input width.
    #[error("input has {actual} values, network expects {expected}")]
    InputLength { expected: usize, actual: usize },

    /// An example's expected output has a different width than the network's
    /// output layer.
    #[error("expected output has {actual} values, network produces {expected}")]
    OutputLength { expected: usize, actual: usize },

    /// A layer sequence with fewer than two layers, or with an empty layer.
    #[error("a network needs at least two layers, none of them empty; got {0:?}")]
    InvalidLayers(Vec<usize>),

    /// A nested array could not be turned into a matrix.
    #[error("matrix rows have differing lengths")]
    RaggedMatrix,

    /// An algorithm was run before a network was configured.
    #[error("no network has been set for the algorithm")]
    MissingNetwork,

    /// The algorithm registry has no entry for the given name.
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
