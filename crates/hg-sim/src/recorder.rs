//! Recorders sample one attribute of a set of elements after reset and after
//! every step.

use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;

use crate::error::{SimError, SimResult};

/// Sink for observed values.
///
/// The driver calls `on_reset` once with the subject names, then for every
/// sample `on_step` followed by one `on_value` per subject, in subject order.
pub trait Recorder: Any {
    /// Attribute this recorder observes.
    fn attribute(&self) -> &str;

    fn on_reset(&mut self, subjects: &[String]);

    fn on_step(&mut self, time: f64);

    /// `value` is `None` while the attribute is undefined (e.g. power before
    /// the first step).
    fn on_value(&mut self, subject: &str, time: f64, value: Option<f64>);

    fn as_any(&self) -> &dyn Any;
}

/// Typed handle returned when a recorder is registered.
#[derive(Debug)]
pub struct RecorderHandle<R> {
    pub(crate) index: usize,
    _marker: PhantomData<fn() -> R>,
}

impl<R> RecorderHandle<R> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }
}

impl<R> Clone for RecorderHandle<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for RecorderHandle<R> {}

/// Time series per subject, for plotting after the run.
#[derive(Debug, Clone)]
pub struct PlotRecorder {
    attribute: String,
    x: Vec<f64>,
    subjects: Vec<String>,
    y: HashMap<String, Vec<f64>>,
}

impl PlotRecorder {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            x: Vec::new(),
            subjects: Vec::new(),
            y: HashMap::new(),
        }
    }

    /// Sample times (s).
    pub fn x_values(&self) -> &[f64] {
        &self.x
    }

    /// Samples of one subject; undefined values are NaN.
    pub fn y_values(&self, subject: &str) -> Option<&[f64]> {
        self.y.get(subject).map(Vec::as_slice)
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }
}

impl Recorder for PlotRecorder {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn on_reset(&mut self, subjects: &[String]) {
        self.x.clear();
        self.subjects = subjects.to_vec();
        self.y = subjects.iter().map(|s| (s.clone(), Vec::new())).collect();
    }

    fn on_step(&mut self, time: f64) {
        self.x.push(time);
    }

    fn on_value(&mut self, subject: &str, _time: f64, value: Option<f64>) {
        if let Some(series) = self.y.get_mut(subject) {
            series.push(value.unwrap_or(f64::NAN));
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Value distribution per subject.
///
/// Bin 0 counts values below `x_min`, the last bin values at or above
/// `x_max`; the `nb_bins - 2` bins in between split `[x_min, x_max)` evenly.
#[derive(Debug, Clone)]
pub struct HistogramRecorder {
    attribute: String,
    x_min: f64,
    x_max: f64,
    nb_bins: usize,
    bins: HashMap<String, Vec<u64>>,
}

impl HistogramRecorder {
    pub fn new(
        attribute: impl Into<String>,
        x_min: f64,
        x_max: f64,
        nb_bins: usize,
    ) -> SimResult<Self> {
        if !(x_min.is_finite() && x_max.is_finite() && x_max > x_min) {
            return Err(SimError::InvalidArg {
                what: "x_max must be larger than x_min",
            });
        }
        if nb_bins < 3 {
            return Err(SimError::InvalidArg {
                what: "nb_bins must be at least 3",
            });
        }
        Ok(Self {
            attribute: attribute.into(),
            x_min,
            x_max,
            nb_bins,
            bins: HashMap::new(),
        })
    }

    pub fn bin_width(&self) -> f64 {
        (self.x_max - self.x_min) / (self.nb_bins - 2) as f64
    }

    /// Bin index for `value`.
    pub fn bin_of(&self, value: f64) -> usize {
        if value < self.x_min {
            0
        } else if value >= self.x_max {
            self.nb_bins - 1
        } else {
            let inner = ((value - self.x_min) / self.bin_width()).floor() as usize;
            1 + inner.min(self.nb_bins - 3)
        }
    }

    pub fn counts(&self, subject: &str) -> Option<&[u64]> {
        self.bins.get(subject).map(Vec::as_slice)
    }
}

impl Recorder for HistogramRecorder {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn on_reset(&mut self, subjects: &[String]) {
        self.bins = subjects
            .iter()
            .map(|s| (s.clone(), vec![0; self.nb_bins]))
            .collect();
    }

    fn on_step(&mut self, _time: f64) {}

    fn on_value(&mut self, subject: &str, _time: f64, value: Option<f64>) {
        let Some(value) = value.filter(|v| !v.is_nan()) else {
            return;
        };
        let bin = self.bin_of(value);
        if let Some(counts) = self.bins.get_mut(subject) {
            counts[bin] += 1;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
