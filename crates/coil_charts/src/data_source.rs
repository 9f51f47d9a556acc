//! Spring-animated chart data source
//!
//! Owns one series with one data point per category and drives each point's
//! displayed value toward its target with spring physics. Targets are set
//! with [`AnimatingDataSource::animate_to_values`]; progression happens when
//! the owner ticks the source once per frame with an explicit timestep.

use std::sync::Arc;

use coil_animation::{AnimationScheduler, Spring, SpringConfig, SpringId};
use rustc_hash::FxHashMap;

use crate::error::Error;
use crate::factory::{FnSeriesFactory, KindSeriesFactory, PointCreator, SeriesCreator, SeriesFactory};
use crate::series::{Category, Series, SeriesHandle, SeriesKind};
use crate::surface::SharedSurface;

/// Everything an animation creator needs to build one spring.
///
/// The creator reads the current spring parameters from here itself; the
/// data source only hands them over.
pub struct AnimationRequest<'a> {
    pub category: &'a Category,
    /// The point's currently displayed value (animation start).
    pub current: f32,
    /// Velocity inherited from a superseded animation, 0.0 if none.
    pub velocity: f32,
    pub target: f32,
    pub bounciness: f32,
    pub speed: f32,
}

/// Pluggable constructor for the per-point animation object.
pub type AnimationCreator = Box<dyn Fn(&AnimationRequest<'_>) -> Spring>;

#[derive(Clone, Copy)]
struct ActiveAnimation {
    id: SpringId,
    target: f32,
}

/// Configures and builds an [`AnimatingDataSource`].
///
/// Exactly one series-construction form must be set: a [`SeriesKind`], a
/// [`SeriesFactory`] object, or a series-creator closure. A creator closure
/// wins over a factory object, which wins over a kind.
pub struct DataSourceBuilder {
    series_kind: Option<SeriesKind>,
    series_name: Option<String>,
    factory: Option<Box<dyn SeriesFactory>>,
    series_creator: Option<SeriesCreator>,
    point_creator: Option<PointCreator>,
    animation_creator: Option<AnimationCreator>,
    initial_value: f32,
    bounciness: f32,
    speed: f32,
}

impl DataSourceBuilder {
    fn new() -> Self {
        Self {
            series_kind: None,
            series_name: None,
            factory: None,
            series_creator: None,
            point_creator: None,
            animation_creator: None,
            initial_value: 0.0,
            bounciness: coil_animation::spring::DEFAULT_BOUNCINESS,
            speed: coil_animation::spring::DEFAULT_SPEED,
        }
    }

    /// Build a standard series of the given kind.
    pub fn series_kind(mut self, kind: SeriesKind) -> Self {
        self.series_kind = Some(kind);
        self
    }

    /// Name for the series when built from a kind. Defaults to "series".
    pub fn series_name(mut self, name: impl Into<String>) -> Self {
        self.series_name = Some(name.into());
        self
    }

    /// Inject a full series/point construction strategy.
    pub fn series_factory(mut self, factory: impl SeriesFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Construct the series through a closure. Takes precedence over
    /// [`series_factory`](Self::series_factory) and
    /// [`series_kind`](Self::series_kind).
    pub fn series_creator(mut self, create: impl Fn() -> Series + 'static) -> Self {
        self.series_creator = Some(Box::new(create));
        self
    }

    /// Construct data points through a closure (used with `series_creator`).
    pub fn point_creator(
        mut self,
        create: impl Fn(&Category, f32) -> crate::series::DataPoint + 'static,
    ) -> Self {
        self.point_creator = Some(Box::new(create));
        self
    }

    /// Take over animation construction entirely. The creator is invoked
    /// once per animated point on every `animate_to_values` call and is
    /// responsible for reading the spring parameters from the request.
    pub fn animation_creator(
        mut self,
        create: impl Fn(&AnimationRequest<'_>) -> Spring + 'static,
    ) -> Self {
        self.animation_creator = Some(Box::new(create));
        self
    }

    /// Initial value for every data point. Defaults to 0.0.
    pub fn initial_value(mut self, value: f32) -> Self {
        self.initial_value = value;
        self
    }

    pub fn spring_bounciness(mut self, bounciness: f32) -> Self {
        self.bounciness = bounciness;
        self
    }

    pub fn spring_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Build the data source, create its series and points, and register
    /// the series with `surface`.
    pub fn build<C>(
        self,
        surface: SharedSurface,
        categories: impl IntoIterator<Item = C>,
    ) -> Result<AnimatingDataSource, Error>
    where
        C: Into<Category>,
    {
        let categories: Vec<Category> = categories.into_iter().map(Into::into).collect();
        if categories.is_empty() {
            return Err(Error::Initialization {
                reason: "category list is empty".into(),
            });
        }

        let factory: Box<dyn SeriesFactory> = if let Some(create) = self.series_creator {
            Box::new(FnSeriesFactory::new(create, self.point_creator))
        } else if let Some(factory) = self.factory {
            factory
        } else if let Some(kind) = self.series_kind {
            let name = self.series_name.unwrap_or_else(|| "series".into());
            Box::new(KindSeriesFactory::new(kind, name))
        } else {
            return Err(Error::Configuration);
        };

        let mut series = factory.create_series();
        if !series.is_empty() {
            return Err(Error::Initialization {
                reason: "series factory returned a non-empty series".into(),
            });
        }
        for category in &categories {
            series.push(factory.create_data_point(category, self.initial_value));
        }

        let mut index = FxHashMap::default();
        for (i, category) in categories.iter().enumerate() {
            index.insert(category.shared(), i);
        }

        let series = SeriesHandle::new(series);
        surface.lock().unwrap().add_series(series.clone());

        let active = vec![None; categories.len()];
        Ok(AnimatingDataSource {
            surface,
            series,
            categories,
            index,
            scheduler: AnimationScheduler::new(),
            active,
            bounciness: self.bounciness.max(0.0),
            speed: self.speed.max(0.0),
            animation_creator: self.animation_creator,
        })
    }
}

pub struct AnimatingDataSource {
    surface: SharedSurface,
    series: SeriesHandle,
    categories: Vec<Category>,
    index: FxHashMap<Arc<str>, usize>,
    scheduler: AnimationScheduler,
    active: Vec<Option<ActiveAnimation>>,
    bounciness: f32,
    speed: f32,
    animation_creator: Option<AnimationCreator>,
}

impl AnimatingDataSource {
    pub fn builder() -> DataSourceBuilder {
        DataSourceBuilder::new()
    }

    /// Spring overshoot magnitude for animations started from now on.
    /// Negative input is clamped to 0.
    pub fn set_spring_bounciness(&mut self, bounciness: f32) {
        if bounciness < 0.0 {
            tracing::warn!(bounciness, "negative spring bounciness clamped to 0");
        }
        self.bounciness = bounciness.max(0.0);
    }

    /// Spring settle rate for animations started from now on.
    /// Negative input is clamped to 0.
    pub fn set_spring_speed(&mut self, speed: f32) {
        if speed < 0.0 {
            tracing::warn!(speed, "negative spring speed clamped to 0");
        }
        self.speed = speed.max(0.0);
    }

    pub fn spring_bounciness(&self) -> f32 {
        self.bounciness
    }

    pub fn spring_speed(&self) -> f32 {
        self.speed
    }

    /// Start one spring animation per data point toward the new targets.
    ///
    /// `values` must have exactly one entry per category; on a mismatch no
    /// point is touched. A point with an animation already in flight has it
    /// superseded: the old spring is removed first and its velocity carries
    /// into the replacement, so no two animations ever write to the same
    /// point. Idle points already at their target are skipped.
    ///
    /// Returns immediately; values move on subsequent [`tick`](Self::tick)
    /// calls.
    pub fn animate_to_values(&mut self, values: &[f32]) -> Result<(), Error> {
        if values.len() != self.categories.len() {
            return Err(Error::ArityMismatch {
                expected: self.categories.len(),
                actual: values.len(),
            });
        }

        let current = self.series.values();
        for (i, (&target, &from)) in values.iter().zip(current.iter()).enumerate() {
            let superseded = self.active[i]
                .take()
                .and_then(|animation| self.scheduler.remove(animation.id));

            if superseded.is_none() && from == target {
                tracing::trace!(category = %self.categories[i], target, "already at target");
                continue;
            }

            let was_superseded = superseded.is_some();
            let velocity = superseded.map(|s| s.velocity()).unwrap_or(0.0);
            let spring = match &self.animation_creator {
                Some(create) => create(&AnimationRequest {
                    category: &self.categories[i],
                    current: from,
                    velocity,
                    target,
                    bounciness: self.bounciness,
                    speed: self.speed,
                }),
                None => {
                    let config = SpringConfig::from_dynamics(self.bounciness, self.speed);
                    let mut spring = Spring::new(config, from).with_velocity(velocity);
                    spring.set_target(target);
                    spring
                }
            };

            let target = spring.target();
            let id = self.scheduler.add(spring);
            self.active[i] = Some(ActiveAnimation { id, target });
            tracing::debug!(
                category = %self.categories[i],
                from,
                target,
                superseded = was_superseded,
                "spring started"
            );
        }
        Ok(())
    }

    /// Advance all in-flight animations by `dt` seconds and publish the new
    /// values into the series. Settled springs snap their point exactly to
    /// the target and are released. Requests a surface redraw whenever
    /// values were written.
    ///
    /// Returns whether any animation is still in flight.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_animating() {
            return false;
        }

        self.scheduler.advance(dt);

        let mut wrote = false;
        {
            let mut series = self.series.0.lock().unwrap();
            let points = series.points_mut();
            for (i, slot) in self.active.iter_mut().enumerate() {
                let Some(ActiveAnimation { id, target }) = *slot else {
                    continue;
                };
                if self.scheduler.is_settled(id) {
                    points[i].value = target;
                    self.scheduler.remove(id);
                    *slot = None;
                    tracing::debug!(category = %points[i].category, target, "spring settled");
                } else if let Some(spring) = self.scheduler.get(id) {
                    points[i].value = spring.value();
                }
                wrote = true;
            }
        }

        if wrote {
            self.surface.lock().unwrap().request_redraw();
        }
        self.is_animating()
    }

    /// Drop every in-flight animation, leaving points at their currently
    /// displayed values. Used when discarding the data source mid-flight.
    pub fn cancel_animations(&mut self) {
        for slot in &mut self.active {
            if let Some(animation) = slot.take() {
                self.scheduler.remove(animation.id);
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.active.iter().any(Option::is_some)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn series(&self) -> &SeriesHandle {
        &self.series
    }

    /// Snapshot of displayed values, in category order.
    pub fn values(&self) -> Vec<f32> {
        self.series.values()
    }

    /// Displayed value for a category label.
    pub fn value_of(&self, category: &str) -> Option<f32> {
        let &i = self.index.get(category)?;
        Some(self.series.with(|s| s.points()[i].value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{HeadlessSurface, RenderSurface};
    use std::sync::Mutex;

    fn surface() -> SharedSurface {
        Arc::new(Mutex::new(HeadlessSurface::new()))
    }

    #[test]
    fn build_requires_a_factory_form() {
        let result = AnimatingDataSource::builder().build(surface(), ["2010"]);
        assert!(matches!(result, Err(Error::Configuration)));
    }

    #[test]
    fn build_rejects_empty_categories() {
        let result = AnimatingDataSource::builder()
            .series_kind(SeriesKind::Bar)
            .build(surface(), Vec::<&str>::new());
        assert!(matches!(result, Err(Error::Initialization { .. })));
    }

    #[test]
    fn build_rejects_prepopulated_series() {
        let result = AnimatingDataSource::builder()
            .series_creator(|| {
                let mut series = Series::new("bad", SeriesKind::Bar);
                series.push(crate::series::DataPoint::new("x".into(), 1.0));
                series
            })
            .build(surface(), ["2010"]);
        assert!(matches!(result, Err(Error::Initialization { .. })));
    }

    #[test]
    fn creator_takes_precedence_over_kind() {
        let source = AnimatingDataSource::builder()
            .series_kind(SeriesKind::Bar)
            .series_creator(|| Series::new("from-creator", SeriesKind::Line))
            .build(surface(), ["2010"])
            .unwrap();
        assert_eq!(source.series().with(|s| s.name.clone()), "from-creator");
    }

    #[test]
    fn arity_mismatch_is_rejected_before_mutation() {
        let mut source = AnimatingDataSource::builder()
            .series_kind(SeriesKind::Bar)
            .build(surface(), ["2010", "2011"])
            .unwrap();

        let err = source.animate_to_values(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::ArityMismatch {
                expected: 2,
                actual: 1
            }
        ));
        assert_eq!(source.values(), vec![0.0, 0.0]);
        assert!(!source.is_animating());
    }

    #[test]
    fn idle_points_at_target_are_skipped() {
        let mut source = AnimatingDataSource::builder()
            .series_kind(SeriesKind::Bar)
            .build(surface(), ["2010", "2011"])
            .unwrap();

        source.animate_to_values(&[0.0, 5.0]).unwrap();
        assert!(source.is_animating());
        // Only the second point animates; the first stays untouched.
        assert!(source.value_of("2010") == Some(0.0));
        source.tick(1.0 / 60.0);
        assert_eq!(source.value_of("2010"), Some(0.0));
        assert!(source.value_of("2011").unwrap() > 0.0);
    }

    #[test]
    fn negative_parameters_are_clamped() {
        let mut source = AnimatingDataSource::builder()
            .series_kind(SeriesKind::Bar)
            .build(surface(), ["2010"])
            .unwrap();

        source.set_spring_bounciness(-3.0);
        source.set_spring_speed(-1.0);
        assert_eq!(source.spring_bounciness(), 0.0);
        assert_eq!(source.spring_speed(), 0.0);
    }

    #[test]
    fn cancel_leaves_values_in_place() {
        let mut source = AnimatingDataSource::builder()
            .series_kind(SeriesKind::Bar)
            .build(surface(), ["2010"])
            .unwrap();

        source.animate_to_values(&[10.0]).unwrap();
        for _ in 0..5 {
            source.tick(1.0 / 60.0);
        }
        let mid = source.value_of("2010").unwrap();
        assert!(mid > 0.0 && mid < 10.0);

        source.cancel_animations();
        assert!(!source.is_animating());
        assert_eq!(source.value_of("2010"), Some(mid));
        assert!(!source.tick(1.0 / 60.0));
    }

    #[test]
    fn animation_creator_is_consulted() {
        let calls = Arc::new(Mutex::new(0usize));
        let seen = calls.clone();
        let mut source = AnimatingDataSource::builder()
            .series_kind(SeriesKind::Bar)
            .animation_creator(move |request| {
                *seen.lock().unwrap() += 1;
                let config = SpringConfig::from_dynamics(request.bounciness, request.speed);
                let mut spring = Spring::new(config, request.current).with_velocity(request.velocity);
                spring.set_target(request.target);
                spring
            })
            .build(surface(), ["2010", "2011"])
            .unwrap();

        source.animate_to_values(&[3.0, 4.0]).unwrap();
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[test]
    fn surface_is_asked_to_redraw_on_movement() {
        let headless = Arc::new(Mutex::new(HeadlessSurface::new()));
        let shared: SharedSurface = headless.clone();
        let mut source = AnimatingDataSource::builder()
            .series_kind(SeriesKind::Bar)
            .build(shared, ["2010"])
            .unwrap();

        assert_eq!(headless.lock().unwrap().series().len(), 1);
        assert_eq!(headless.lock().unwrap().redraw_count(), 0);

        source.animate_to_values(&[2.0]).unwrap();
        source.tick(1.0 / 60.0);
        assert_eq!(headless.lock().unwrap().redraw_count(), 1);

        // Idle source does not spam redraws.
        source.cancel_animations();
        source.tick(1.0 / 60.0);
        assert_eq!(headless.lock().unwrap().redraw_count(), 1);
    }

    // Surface trait stays object-safe for user impls.
    struct CountingSurface(usize);
    impl RenderSurface for CountingSurface {
        fn add_series(&mut self, _series: SeriesHandle) {
            self.0 += 1;
        }
        fn request_redraw(&mut self) {}
    }

    #[test]
    fn custom_surfaces_receive_the_series() {
        let custom = Arc::new(Mutex::new(CountingSurface(0)));
        let shared: SharedSurface = custom.clone();
        let _source = AnimatingDataSource::builder()
            .series_kind(SeriesKind::Line)
            .build(shared, ["a", "b"])
            .unwrap();
        assert_eq!(custom.lock().unwrap().0, 1);
    }
}
