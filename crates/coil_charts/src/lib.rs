//! coil_charts
//!
//! Spring-animated chart data sources.
//!
//! The core type is [`AnimatingDataSource`]: it owns one series with one
//! data point per category and, given a new array of target values, drives
//! each point's displayed value to its target with spring physics instead
//! of linear interpolation. Series construction, point construction, and
//! animation construction are all pluggable strategies, so the same core
//! serves different chart kinds.
//!
//! ```
//! use coil_charts::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let surface: SharedSurface = Arc::new(Mutex::new(HeadlessSurface::new()));
//! let mut source = AnimatingDataSource::builder()
//!     .series_kind(SeriesKind::Bar)
//!     .build(surface, ["2010", "2011", "2012"])
//!     .unwrap();
//!
//! source.animate_to_values(&[5.0, 10.0, 15.0]).unwrap();
//! while source.tick(1.0 / 60.0) {}
//! assert_eq!(source.values(), vec![5.0, 10.0, 15.0]);
//! ```

mod data_source;
mod error;
mod factory;
mod series;
mod surface;

pub use data_source::{AnimatingDataSource, AnimationCreator, AnimationRequest, DataSourceBuilder};
pub use error::Error;
pub use factory::{FnSeriesFactory, KindSeriesFactory, SeriesFactory};
pub use series::{Category, DataPoint, Series, SeriesHandle, SeriesKind};
pub use surface::{HeadlessSurface, RenderSurface, SharedSurface};

/// Common imports for data source users.
pub mod prelude {
    pub use crate::data_source::{AnimatingDataSource, AnimationRequest, DataSourceBuilder};
    pub use crate::error::Error;
    pub use crate::factory::SeriesFactory;
    pub use crate::series::{Category, DataPoint, Series, SeriesHandle, SeriesKind};
    pub use crate::surface::{HeadlessSurface, RenderSurface, SharedSurface};
}
