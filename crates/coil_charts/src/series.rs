use std::fmt;
use std::sync::{Arc, Mutex};

/// An immutable label identifying one slot in a series.
///
/// The ordered category sequence is fixed when a data source is built and
/// defines the cardinality and index-correspondence of its data points.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Category(Arc<str>);

impl Category {
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn shared(&self) -> Arc<str> {
        Arc::clone(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One mutable value slot in a series.
#[derive(Clone, Debug)]
pub struct DataPoint {
    pub category: Category,
    pub value: f32,
}

impl DataPoint {
    pub fn new(category: Category, value: f32) -> Self {
        Self { category, value }
    }
}

/// The concrete chart kind a series renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesKind {
    Bar,
    Line,
    Area,
}

/// A named, ordered collection of data points rendered as one trace.
#[derive(Clone, Debug)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    points: Vec<DataPoint>,
}

impl Series {
    /// A fresh, empty series.
    pub fn new(name: impl Into<String>, kind: SeriesKind) -> Self {
        Self {
            name: name.into(),
            kind,
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, point: DataPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [DataPoint] {
        &mut self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Shared handle to a series.
///
/// The data source mutates point values through the handle; the rendering
/// surface keeps a clone and reads through it when redrawing.
#[derive(Clone)]
pub struct SeriesHandle(pub Arc<Mutex<Series>>);

impl SeriesHandle {
    pub fn new(series: Series) -> Self {
        Self(Arc::new(Mutex::new(series)))
    }

    /// Run `f` against the series under its lock.
    pub fn with<R>(&self, f: impl FnOnce(&Series) -> R) -> R {
        f(&self.0.lock().unwrap())
    }

    /// Snapshot of the current point values, in category order.
    pub fn values(&self) -> Vec<f32> {
        self.with(|s| s.points().iter().map(|p| p.value).collect())
    }
}
