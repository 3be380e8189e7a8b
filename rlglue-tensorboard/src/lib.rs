#![warn(missing_docs)]
//! TensorBoard recorder for RL-Glue experiments.
use log::warn;
use rlglue_core::record::{Record, RecordValue, Recorder};
use std::path::Path;
use tensorboard_rs::summary_writer::SummaryWriter;

/// Step key used when a record has no scalar under the configured one.
///
/// [`Glue::record`](rlglue_core::Glue::record) counts episodes under this key.
pub const FALLBACK_STEP_KEY: &str = "num_episodes";

/// Scales a row-major table to gray levels and stacks it into 3 channels,
/// the layout of `SummaryWriter::add_image`.
///
/// `NaN` cells, e.g. walls of a grid world, are black; the smallest finite
/// value is the darkest gray.
fn to_image(data: &[f64]) -> Vec<u8> {
    let finite = data.iter().filter(|v| v.is_finite());
    let min = finite.clone().fold(f64::MAX, |m, v| v.min(m));
    let max = finite.fold(f64::MIN, |m, v| v.max(m));
    let scale = if max > min { max - min } else { 1.0 };

    let gray = data
        .iter()
        .map(|&v| {
            if v.is_finite() {
                (32.0 + (v - min) / scale * 223.0) as u8
            } else {
                0
            }
        })
        .collect::<Vec<_>>();

    gray.iter().chain(gray.iter()).chain(gray.iter()).copied().collect()
}

/// Write records to TFRecord.
///
/// Scalars are written as scalars and 2-dimensional arrays, like value
/// tables, as images. The step of a record is taken from its scalar under
/// the step key, `"episode"` by default, or else under [`FALLBACK_STEP_KEY`].
pub struct TensorboardRecorder {
    writer: SummaryWriter,
    step_key: String,
    ignore_unsupported_value: bool,
}

impl TensorboardRecorder {
    /// Construct a [`TensorboardRecorder`].
    ///
    /// TFRecord will be stored in `logdir`.
    pub fn new<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            writer: SummaryWriter::new(logdir),
            step_key: "episode".to_string(),
            ignore_unsupported_value: true,
        }
    }

    /// Construct a [`TensorboardRecorder`] logging values it cannot write.
    pub fn new_with_check_unsupported_value<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            ignore_unsupported_value: false,
            ..Self::new(logdir)
        }
    }

    /// Sets the key of the scalar used as the step.
    pub fn with_step_key(mut self, step_key: impl Into<String>) -> Self {
        self.step_key = step_key.into();
        self
    }

    /// Returns the key and value of the scalar used as the step of `record`.
    fn step_of<'a>(&'a self, record: &Record) -> Option<(&'a str, usize)> {
        [self.step_key.as_str(), FALLBACK_STEP_KEY]
            .into_iter()
            .find_map(|k| record.get_scalar(k).ok().map(|v| (k, v as usize)))
    }
}

impl Recorder for TensorboardRecorder {
    /// Write a given [`Record`] into a TFRecord.
    ///
    /// Records without a scalar under the step key or [`FALLBACK_STEP_KEY`]
    /// are skipped.
    fn write(&mut self, record: Record) {
        let (step_key, step) = match self.step_of(&record) {
            Some((k, v)) => (k.to_string(), v),
            None => {
                warn!(
                    "Skipped a record without a step: neither {:?} nor {:?}",
                    self.step_key, FALLBACK_STEP_KEY
                );
                return;
            }
        };

        for (k, v) in record.iter() {
            if *k == step_key {
                continue;
            }
            match v {
                RecordValue::Scalar(v) => self.writer.add_scalar(k, *v as f32, step),
                RecordValue::Array2(data, shape) => {
                    let image = to_image(data);
                    self.writer
                        .add_image(k, image.as_slice(), &[3, shape[0], shape[1]], step)
                }
                _ => {
                    if !self.ignore_unsupported_value {
                        warn!("Unsupported value: {:?}", (k, v));
                    }
                }
            };
        }
    }

    fn flush(&mut self) {
        self.writer.flush();
    }
}
