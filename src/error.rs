//! # Error Types
//!
//! This module defines the error type shared by every part of the engine.
//! Only invariant violations and invalid configuration surface here; a run
//! without a population is reported through the run's boolean result, and
//! out-of-range bitset access degrades to `None`/`false` instead.
//!
//! ## Examples
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genbits::error::{GeneticError, OptionExt};
//!
//! fn first_fitness(fitness: &[f64]) -> genbits::error::Result<f64> {
//!     fitness.first().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(first_fitness(&[]).is_err());
//! ```
//!
//! Using the `ResultExt` trait to add context to a foreign error:
//!
//! ```rust
//! use genbits::error::{Result, ResultExt};
//!
//! fn parse_size(raw: &str) -> Result<usize> {
//!     raw.parse::<usize>().context("invalid population size")
//! }
//!
//! assert!(parse_size("ten").is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while configuring or running the engine.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: genome array contains no elements")]
    EmptyPopulation,

    /// Error that occurs when a selector cannot produce a member of the population.
    #[error("Selection error: {0}")]
    Selection(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for engine operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// Converts any standard error into `GeneticError::Other`, prefixed with
/// the supplied context.
pub trait ResultExt<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
