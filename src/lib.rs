//! A small library for training feedforward neural networks.
//!
//! A [`Network`](feed_forward::Network) is trained by letting
//! [`GradientDescent`](algorithms::GradientDescent) follow a
//! [`Derivative`](algorithm::Derivative) of a [`Cost`](algorithm::Cost)
//! over a set of [`Example`](example::Example)s. The
//! [`Trainer`](trainer::Trainer) wires these together.

#[macro_use]
extern crate serde_derive;

pub mod activator;
pub mod algorithm;
pub mod algorithms;
pub mod error;
pub mod example;
pub mod feed_forward;
pub mod matrix;
pub mod report;
pub mod trainer;
pub mod utils;
pub mod weights;

pub use crate::error::{Error, Result};
