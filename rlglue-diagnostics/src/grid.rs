//! Shape of a grid world.
use crate::DiagnosticsError;
use anyhow::Result;
use rlglue_core::Config;

/// Height and width of a grid world whose states are numbered row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Number of rows.
    pub height: usize,

    /// Number of columns.
    pub width: usize,
}

impl GridShape {
    /// Constructs a shape.
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Reads `grid_height` and `grid_width` from the config of an environment.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.get("grid_height")?,
            config.get("grid_width")?,
        ))
    }

    /// Number of cells.
    pub fn size(&self) -> usize {
        self.height * self.width
    }

    /// `(row, col)` of a state, with states numbered in row-major order.
    pub fn unravel(&self, state: usize) -> Result<(usize, usize)> {
        if state >= self.size() {
            return Err(DiagnosticsError::TooManyStates {
                n_states: state + 1,
                size: self.size(),
            }
            .into());
        }
        Ok((state / self.width, state % self.width))
    }

    /// The shape as `[rows, cols]`.
    pub fn dims(&self) -> [usize; 2] {
        [self.height, self.width]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_unravel_row_major() -> Result<()> {
        let shape = GridShape::new(3, 4);
        assert_eq!(shape.unravel(0)?, (0, 0));
        assert_eq!(shape.unravel(3)?, (0, 3));
        assert_eq!(shape.unravel(4)?, (1, 0));
        assert_eq!(shape.unravel(11)?, (2, 3));
        assert!(shape.unravel(12).is_err());
        Ok(())
    }

    #[test]
    fn test_from_config() -> Result<()> {
        let config = Config::default()
            .with("grid_height", 5)?
            .with("grid_width", 10)?;
        assert_eq!(GridShape::from_config(&config)?, GridShape::new(5, 10));
        assert!(GridShape::from_config(&Config::default()).is_err());
        Ok(())
    }
}
