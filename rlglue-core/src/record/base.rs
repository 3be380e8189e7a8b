//! Record and its values.
//!
//! A [`Record`] is what one observation point of an experiment leaves
//! behind: the statistics of a [`Glue`](crate::Glue) after an episode, or the
//! diagnostics of the value estimates of an agent. Keys are free-form strings
//! chosen by the producer; a recorder decides which values it can display.
//!
//! Numbers are `f64` throughout, so returns and value estimates are kept
//! exactly as agents and environments report them.
use crate::error::GlueError;
use std::collections::{
    hash_map::{Iter, Keys},
    HashMap,
};

/// Represents possible types of values in a [`Record`].
///
/// * `Scalar(f64)` - a single number, e.g., the return after an episode
/// * `Array2(Vec<f64>, [usize; 2])` - a table in row-major order
/// * `Array3(Vec<f64>, [usize; 3])` - a table of vectors in row-major order
/// * `String(String)` - a text
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A scalar, e.g., the return of an episode or the RMSVE.
    Scalar(f64),

    /// A 2-dimensional array in row-major order with its shape `[rows, cols]`.
    ///
    /// The value table of a grid world is stored in this form: element
    /// `row * cols + col` is the value of the state in that cell, `NaN` for
    /// cells having no value, e.g., walls or states not yet visited.
    /// A log of pairs, like `(episode, rmsve)`, is stored with shape `[n, 2]`.
    Array2(Vec<f64>, [usize; 2]),

    /// A 3-dimensional array in row-major order with its shape.
    ///
    /// Holds one vector per grid cell, e.g., the arrow lengths of the four
    /// actions of a policy with shape `[rows, cols, 4]`.
    Array3(Vec<f64>, [usize; 3]),

    /// A text, e.g., a title.
    String(String),
}

/// A set of named [`RecordValue`]s.
///
/// # Examples
///
/// ```rust
/// use rlglue_core::record::{Record, RecordValue};
///
/// // A 2 x 2 grid where the bottom-right cell is a wall.
/// let values = vec![0.5, 0.25, -1.0, f64::NAN];
///
/// let mut record = Record::from_scalar("rmsve", 0.5);
/// record.insert("values", RecordValue::Array2(values, [2, 2]));
///
/// assert_eq!(record.get_scalar("rmsve").unwrap(), 0.5);
/// let (table, shape) = record.get_array2("values").unwrap();
/// assert_eq!(shape, [2, 2]);
/// assert!(table[3].is_nan());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f64) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair, replacing the previous value of the key.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs, in no particular order.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value of the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records. Values of `record` win on duplicated keys.
    ///
    /// Useful to put the statistics of a [`Glue`](crate::Glue) and the
    /// diagnostics of the same episode into one record.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges `record` into this one. Values of `record` win on duplicated keys.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    fn lookup(&self, k: &str) -> Result<&RecordValue, GlueError> {
        self.0
            .get(k)
            .ok_or_else(|| GlueError::RecordKeyError(k.to_string()))
    }

    /// Gets a scalar value.
    ///
    /// # Errors
    ///
    /// [`GlueError::RecordKeyError`] if the key does not exist,
    /// [`GlueError::RecordValueTypeError`] if the value is not a scalar.
    pub fn get_scalar(&self, k: &str) -> Result<f64, GlueError> {
        match self.lookup(k)? {
            RecordValue::Scalar(v) => Ok(*v),
            _ => Err(GlueError::RecordValueTypeError("Scalar".to_string())),
        }
    }

    /// Gets a 2-dimensional array in row-major order and its shape
    /// `[rows, cols]`, e.g., a value table.
    pub fn get_array2(&self, k: &str) -> Result<(Vec<f64>, [usize; 2]), GlueError> {
        match self.lookup(k)? {
            RecordValue::Array2(v, s) => Ok((v.clone(), *s)),
            _ => Err(GlueError::RecordValueTypeError("Array2".to_string())),
        }
    }

    /// Gets a 3-dimensional array and its shape.
    pub fn get_array3(&self, k: &str) -> Result<(Vec<f64>, [usize; 3]), GlueError> {
        match self.lookup(k)? {
            RecordValue::Array3(v, s) => Ok((v.clone(), *s)),
            _ => Err(GlueError::RecordValueTypeError("Array3".to_string())),
        }
    }

    /// Gets a string.
    pub fn get_string(&self, k: &str) -> Result<String, GlueError> {
        match self.lookup(k)? {
            RecordValue::String(s) => Ok(s.clone()),
            _ => Err(GlueError::RecordValueTypeError("String".to_string())),
        }
    }

    /// Returns `true` if the record has no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
