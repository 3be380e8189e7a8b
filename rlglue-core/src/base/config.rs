//! Configuration passed to [`Env::init`](super::Env::init) and [`Agent::init`](super::Agent::init).
use crate::error::GlueError;
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_yaml::Value;
use std::{
    collections::{btree_map::Iter, BTreeMap},
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Opaque string-keyed configuration.
///
/// The coordinator forwards configurations without looking at them.
/// Agents and environments read their own keys with [`Config::get`].
///
/// ```
/// use rlglue_core::Config;
///
/// let config = Config::default()
///     .with("grid_height", 5)?
///     .with("grid_width", 10)?;
/// let height: usize = config.get("grid_height")?;
/// assert_eq!(height, 5);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(BTreeMap<String, Value>);

impl Config {
    /// Inserts a value, replacing the previous one for the same key.
    pub fn insert<T: Serialize>(&mut self, k: impl Into<String>, v: T) -> Result<()> {
        self.0.insert(k.into(), serde_yaml::to_value(v)?);
        Ok(())
    }

    /// Inserts a value and returns the config, for chaining.
    pub fn with<T: Serialize>(mut self, k: impl Into<String>, v: T) -> Result<Self> {
        self.insert(k, v)?;
        Ok(self)
    }

    /// Gets the value of the given key deserialized as `T`.
    pub fn get<T: DeserializeOwned>(&self, k: &str) -> Result<T> {
        match self.0.get(k) {
            Some(v) => Ok(serde_yaml::from_value(v.clone())?),
            None => Err(GlueError::ConfigKeyError(k.to_string()).into()),
        }
    }

    /// Gets the value of the given key, or `default` if the key is absent.
    pub fn get_or<T: DeserializeOwned>(&self, k: &str, default: T) -> Result<T> {
        if self.contains_key(k) {
            self.get(k)
        } else {
            Ok(default)
        }
    }

    /// Gets the raw value of the given key.
    pub fn get_value(&self, k: &str) -> Option<&Value> {
        self.0.get(k)
    }

    /// Returns `true` if the config has the key.
    pub fn contains_key(&self, k: &str) -> bool {
        self.0.contains_key(k)
    }

    /// Returns an iterator over the key-value pairs, ordered by key.
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the config has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Constructs [`Config`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves [`Config`] as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
