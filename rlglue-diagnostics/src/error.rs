//! Errors of diagnostics.
use thiserror::Error;

/// Errors of diagnostics.
#[derive(Error, Debug, PartialEq)]
pub enum DiagnosticsError {
    /// A policy table row does not have one probability per action.
    #[error("Policy table must have 4 columns (up, left, down, right), got {0}")]
    PolicyColumns(usize),

    /// More states than cells in the grid.
    #[error("{n_states} states do not fit in a grid of {size} cells")]
    TooManyStates {
        /// Number of states.
        n_states: usize,
        /// Number of cells.
        size: usize,
    },

    /// True values do not have the shape of the grid.
    #[error("True values have shape {got:?}, expected {expected:?}")]
    TrueValuesShape {
        /// Shape of the grid.
        expected: [usize; 2],
        /// Shape of the true values.
        got: [usize; 2],
    },

    /// The operation compares against true values, but none were given.
    #[error("True values are required, set them with ValueDiagnostics::with_true_values")]
    NoTrueValues,

    /// Predicted values are too far from the true values.
    #[error("Predicted values do not match true values, RMSVE = {rmsve} (threshold {threshold})")]
    ValuesMismatch {
        /// The RMSVE of the predicted values.
        rmsve: f64,
        /// The RMSVE threshold of the check.
        threshold: f64,
    },
}
