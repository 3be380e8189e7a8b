//! Policies on grid worlds.
use crate::DiagnosticsError;
use anyhow::Result;
use ndarray::Array2;
use rlglue_core::Config;

/// Actions of a grid world, in the column order of a [`PolicyTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    /// Row - 1.
    Up,

    /// Column - 1.
    Left,

    /// Row + 1.
    Down,

    /// Column + 1.
    Right,
}

impl GridAction {
    /// All actions in column order.
    pub const ALL: [GridAction; 4] = [
        GridAction::Up,
        GridAction::Left,
        GridAction::Down,
        GridAction::Right,
    ];

    /// Column of the action in a [`PolicyTable`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit vector `(dx, dy)` of the action with `y` growing downwards.
    pub fn direction(self) -> (f64, f64) {
        match self {
            GridAction::Up => (0.0, -1.0),
            GridAction::Left => (-1.0, 0.0),
            GridAction::Down => (0.0, 1.0),
            GridAction::Right => (1.0, 0.0),
        }
    }

    /// Arrow symbol of the action.
    pub fn symbol(self) -> char {
        match self {
            GridAction::Up => '↑',
            GridAction::Left => '←',
            GridAction::Down => '↓',
            GridAction::Right => '→',
        }
    }
}

/// Probabilities `pi(a|s)` of a policy, one row per state and one column
/// per [`GridAction`].
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable(Array2<f64>);

impl PolicyTable {
    /// Constructs a table from an `n_states x 4` array.
    pub fn new(probs: Array2<f64>) -> Result<Self> {
        if probs.ncols() != GridAction::ALL.len() {
            return Err(DiagnosticsError::PolicyColumns(probs.ncols()).into());
        }
        Ok(Self(probs))
    }

    /// Constructs a table from rows of probabilities.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_states = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != GridAction::ALL.len()) {
            return Err(DiagnosticsError::PolicyColumns(row.len()).into());
        }
        let probs = Array2::from_shape_vec(
            (n_states, GridAction::ALL.len()),
            rows.into_iter().flatten().collect(),
        )?;
        Ok(Self(probs))
    }

    /// Reads the table from the `"policy"` key of the config of an agent.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_rows(config.get("policy")?)
    }

    /// The equiprobable random policy.
    pub fn uniform(n_states: usize) -> Self {
        Self(Array2::from_elem((n_states, GridAction::ALL.len()), 0.25))
    }

    /// Number of states.
    pub fn n_states(&self) -> usize {
        self.0.nrows()
    }

    /// `pi(a|s)`.
    ///
    /// # Panics
    ///
    /// Panics if `state >= self.n_states()`.
    pub fn prob(&self, state: usize, action: GridAction) -> f64 {
        self.0[[state, action.index()]]
    }

    /// The most probable action of a state, the first one on ties.
    ///
    /// `None` if no action has a positive probability.
    ///
    /// # Panics
    ///
    /// Panics if `state >= self.n_states()`.
    pub fn greedy(&self, state: usize) -> Option<GridAction> {
        GridAction::ALL
            .iter()
            .copied()
            .filter(|a| self.prob(state, *a) > 0.0)
            .fold(None, |best: Option<GridAction>, a| match best {
                Some(b) if self.prob(state, b) >= self.prob(state, a) => Some(b),
                _ => Some(a),
            })
    }

    /// The underlying array.
    pub fn probs(&self) -> &Array2<f64> {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_directions() {
        let directions = GridAction::ALL.map(GridAction::direction);
        assert_eq!(
            directions,
            [(0.0, -1.0), (-1.0, 0.0), (0.0, 1.0), (1.0, 0.0)]
        );
        // Opposite actions cancel out.
        assert_eq!(directions[0].1 + directions[2].1, 0.0);
        assert_eq!(directions[1].0 + directions[3].0, 0.0);

        let symbols = GridAction::ALL.map(GridAction::symbol);
        assert_eq!(symbols, ['↑', '←', '↓', '→']);
    }

    #[test]
    #[should_panic]
    fn test_prob_out_of_range() {
        PolicyTable::uniform(2).prob(2, GridAction::Up);
    }

    #[test]
    #[should_panic]
    fn test_greedy_out_of_range() {
        PolicyTable::uniform(2).greedy(5);
    }

    #[test]
    fn test_from_rows() -> Result<()> {
        let policy = PolicyTable::from_rows(vec![
            vec![0.0, 0.0, 0.0, 1.0],
            vec![0.5, 0.0, 0.5, 0.0],
        ])?;
        assert_eq!(policy.n_states(), 2);
        assert_eq!(policy.prob(0, GridAction::Right), 1.0);
        assert_eq!(policy.prob(1, GridAction::Down), 0.5);

        let err = PolicyTable::from_rows(vec![vec![1.0, 0.0, 0.0]]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DiagnosticsError>(),
            Some(&DiagnosticsError::PolicyColumns(3))
        );
        Ok(())
    }

    #[test]
    fn test_greedy() -> Result<()> {
        let policy = PolicyTable::from_rows(vec![
            vec![0.1, 0.2, 0.6, 0.1],
            vec![0.0, 0.5, 0.0, 0.5],
            vec![0.0, 0.0, 0.0, 0.0],
        ])?;
        assert_eq!(policy.greedy(0), Some(GridAction::Down));
        assert_eq!(policy.greedy(1), Some(GridAction::Left));
        assert_eq!(policy.greedy(2), None);
        assert_eq!(PolicyTable::uniform(1).greedy(0), Some(GridAction::Up));
        Ok(())
    }

    #[test]
    fn test_from_config() -> Result<()> {
        let config = Config::default().with("policy", vec![vec![0.25; 4]; 6])?;
        assert_eq!(PolicyTable::from_config(&config)?, PolicyTable::uniform(6));
        Ok(())
    }
}
