//! Value table, policy arrows and value error of a grid world.
use crate::{DiagnosticsError, GridAction, GridShape, PolicyTable};
use anyhow::Result;
use log::{info, warn};
use ndarray::{Array2, Array3};
use rlglue_core::{
    record::{Record, RecordValue},
    Config,
};

const ARROW_SCALE: f64 = 0.5;

// np.allclose defaults
const RTOL: f64 = 1e-5;
const ATOL: f64 = 1e-8;

fn to_array2(a: &Array2<f64>) -> RecordValue {
    RecordValue::Array2(a.iter().copied().collect(), [a.nrows(), a.ncols()])
}

/// Diagnostics of the value estimates of an agent on a grid world.
///
/// States are numbered row by row. The value table has `NaN` in the cells
/// of states without an estimate; such cells are ignored by error measures.
pub struct ValueDiagnostics {
    shape: GridShape,
    policy: PolicyTable,
    true_values: Option<Array2<f64>>,
    experiment_name: Option<String>,
    values_table: Array2<f64>,
    rmsve_log: Vec<(usize, f64)>,
}

impl ValueDiagnostics {
    /// Constructs diagnostics for the grid described by the config of the
    /// environment (`grid_height`, `grid_width`) and the given policy.
    pub fn new(env_config: &Config, policy: PolicyTable) -> Result<Self> {
        Self::with_shape(GridShape::from_config(env_config)?, policy)
    }

    /// Constructs diagnostics for a grid of the given shape.
    pub fn with_shape(shape: GridShape, policy: PolicyTable) -> Result<Self> {
        if policy.n_states() > shape.size() {
            return Err(DiagnosticsError::TooManyStates {
                n_states: policy.n_states(),
                size: shape.size(),
            }
            .into());
        }

        Ok(Self {
            shape,
            policy,
            true_values: None,
            experiment_name: None,
            values_table: Array2::from_elem((shape.height, shape.width), f64::NAN),
            rmsve_log: Vec::new(),
        })
    }

    /// Sets the true values of the states, as a table of the grid shape.
    pub fn with_true_values(mut self, true_values: Array2<f64>) -> Result<Self> {
        let got = [true_values.nrows(), true_values.ncols()];
        if got != self.shape.dims() {
            return Err(DiagnosticsError::TrueValuesShape {
                expected: self.shape.dims(),
                got,
            }
            .into());
        }
        self.true_values = Some(true_values);
        Ok(self)
    }

    /// Sets the name of the experiment, shown in titles.
    pub fn with_experiment_name(mut self, name: impl Into<String>) -> Self {
        self.experiment_name = Some(name.into());
        self
    }

    /// Shape of the grid.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// The value table computed last.
    pub fn values_table(&self) -> &Array2<f64> {
        &self.values_table
    }

    /// `(episode, RMSVE)` of each call of [`ValueDiagnostics::visualize`].
    pub fn rmsve_log(&self) -> &[(usize, f64)] {
        &self.rmsve_log
    }

    /// Places `values[s]` in the cell of state `s`.
    ///
    /// Cells of states beyond `values.len()` are `NaN`.
    pub fn compute_values_table(&mut self, values: &[f64]) -> Result<()> {
        let mut table = Array2::from_elem((self.shape.height, self.shape.width), f64::NAN);
        for (state, v) in values.iter().enumerate() {
            let (row, col) = self.shape.unravel(state)?;
            table[[row, col]] = *v;
        }
        self.values_table = table;
        Ok(())
    }

    fn true_values(&self) -> Result<&Array2<f64>> {
        self.true_values
            .as_ref()
            .ok_or_else(|| DiagnosticsError::NoTrueValues.into())
    }

    /// Squared error `(v(s) - v_hat(s))^2` of each cell.
    pub fn squared_error(&self) -> Result<Array2<f64>> {
        let true_values = self.true_values()?;
        Ok((&self.values_table - true_values).mapv(|e| e * e))
    }

    /// Root mean squared value error over the cells where neither the value
    /// table nor the true values are `NaN`.
    ///
    /// `NaN` if there is no such cell.
    pub fn compute_rmsve(&self) -> Result<f64> {
        let se = self.squared_error()?;
        let (sum, n) = se
            .iter()
            .filter(|e| !e.is_nan())
            .fold((0.0, 0usize), |(sum, n), e| (sum + e, n + 1));

        if n == 0 {
            warn!("No cell to compute RMSVE with");
            return Ok(f64::NAN);
        }
        Ok((sum / n as f64).sqrt())
    }

    /// Arrows of the policy, with shape `[height, width, 4]`.
    ///
    /// Element `[row, col, a]` is the length of the arrow of action `a`
    /// drawn from the centre of the cell, `0.5 * pi(a|s)`.
    pub fn arrows(&self) -> Result<Array3<f64>> {
        let mut arrows = Array3::zeros((self.shape.height, self.shape.width, 4));
        for state in 0..self.policy.n_states() {
            let (row, col) = self.shape.unravel(state)?;
            for action in GridAction::ALL {
                arrows[[row, col, action.index()]] =
                    ARROW_SCALE * self.policy.prob(state, action);
            }
        }
        Ok(arrows)
    }

    fn title(&self, episode: usize) -> String {
        let name = match &self.experiment_name {
            Some(name) => format!("{}\n", name),
            None => String::new(),
        };
        format!("{}Predicted Values, Episode: {}", name, episode)
    }

    /// Computes the diagnostics of the given values after `episode` episodes.
    ///
    /// The returned record holds `title`, `episode`, `values` and
    /// `policy_arrows`. With true values, it also holds `squared_error`,
    /// `rmsve` and `rmsve_log`, and the RMSVE is appended to the log.
    pub fn visualize(&mut self, values: &[f64], episode: usize) -> Result<Record> {
        self.compute_values_table(values)?;

        let arrows = self.arrows()?;
        let mut record = Record::from_slice(&[
            ("title", RecordValue::String(self.title(episode))),
            ("episode", RecordValue::Scalar(episode as f64)),
            ("values", to_array2(&self.values_table)),
            (
                "policy_arrows",
                RecordValue::Array3(
                    arrows.iter().copied().collect(),
                    [self.shape.height, self.shape.width, 4],
                ),
            ),
        ]);

        if self.true_values.is_some() {
            let rmsve = self.compute_rmsve()?;
            info!("Episode {}: RMSVE = {}", episode, rmsve);
            self.rmsve_log.push((episode, rmsve));

            record.insert("squared_error", to_array2(&self.squared_error()?));
            record.insert("rmsve", RecordValue::Scalar(rmsve));
            record.insert(
                "rmsve_log",
                RecordValue::Array2(
                    self.rmsve_log
                        .iter()
                        .flat_map(|(e, r)| [*e as f64, *r])
                        .collect(),
                    [self.rmsve_log.len(), 2],
                ),
            );
        }

        Ok(record)
    }

    /// Renders the most probable action of each state as a grid of arrows.
    ///
    /// States without a positive probability are `·`, cells beyond the
    /// states of the policy are blank.
    pub fn render_arrows(&self) -> String {
        let mut out = String::new();
        for row in 0..self.shape.height {
            let line: String = (0..self.shape.width)
                .map(|col| {
                    let state = row * self.shape.width + col;
                    if state >= self.policy.n_states() {
                        ' '
                    } else {
                        self.policy.greedy(state).map_or('·', GridAction::symbol)
                    }
                })
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    /// Checks the given values against the true values.
    ///
    /// Passes if the RMSVE is below `threshold` and every cell where neither
    /// side is `NaN` is close to its true value.
    pub fn run_tests(&mut self, values: &[f64], threshold: f64) -> Result<()> {
        let true_values = self.true_values()?.clone();
        self.compute_values_table(values)?;

        let rmsve = self.compute_rmsve()?;
        let all_close = self
            .values_table
            .iter()
            .zip(true_values.iter())
            .filter(|(v, t)| !v.is_nan() && !t.is_nan())
            .all(|(v, t)| (t - v).abs() <= ATOL + RTOL * v.abs());

        if rmsve < threshold && all_close {
            Ok(())
        } else {
            Err(DiagnosticsError::ValuesMismatch { rmsve, threshold }.into())
        }
    }
}
