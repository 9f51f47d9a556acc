//! Series/point creation strategies
//!
//! Decouples the data source from concrete series construction so the same
//! core drives different chart kinds. Two configuration forms exist, echoing
//! how chart construction is usually wired: naming a [`SeriesKind`] (the
//! "concrete type" form) or supplying creator closures (the fully pluggable
//! form). Creator closures take precedence when both are configured.

use crate::series::{Category, DataPoint, Series, SeriesKind};

/// Strategy for producing the series and data points a data source owns.
///
/// `create_series` must return a fresh, empty series on every call — never a
/// shared or pre-populated instance.
pub trait SeriesFactory {
    fn create_series(&self) -> Series;

    fn create_data_point(&self, category: &Category, initial: f32) -> DataPoint {
        DataPoint::new(category.clone(), initial)
    }
}

/// Factory selecting a concrete [`SeriesKind`] with standard data points.
pub struct KindSeriesFactory {
    kind: SeriesKind,
    name: String,
}

impl KindSeriesFactory {
    pub fn new(kind: SeriesKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl SeriesFactory for KindSeriesFactory {
    fn create_series(&self) -> Series {
        Series::new(self.name.clone(), self.kind)
    }
}

pub type SeriesCreator = Box<dyn Fn() -> Series>;
pub type PointCreator = Box<dyn Fn(&Category, f32) -> DataPoint>;

/// Factory backed by creator closures.
pub struct FnSeriesFactory {
    series: SeriesCreator,
    point: Option<PointCreator>,
}

impl FnSeriesFactory {
    pub fn new(series: SeriesCreator, point: Option<PointCreator>) -> Self {
        Self { series, point }
    }
}

impl SeriesFactory for FnSeriesFactory {
    fn create_series(&self) -> Series {
        (self.series)()
    }

    fn create_data_point(&self, category: &Category, initial: f32) -> DataPoint {
        match &self.point {
            Some(create) => create(category, initial),
            None => DataPoint::new(category.clone(), initial),
        }
    }
}
