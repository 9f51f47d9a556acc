//! Animation scheduler
//!
//! Owns every in-flight spring and advances them when the caller ticks.
//! Registration returns an explicit [`SpringId`] handle, so superseding or
//! canceling an animation is an auditable remove-by-key operation. The
//! scheduler never consults a wall clock: the owner supplies the timestep,
//! which keeps progression deterministic and testable with simulated time.

use crate::spring::Spring;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a registered spring animation.
    pub struct SpringId;
}

/// Frame-stepped registry of active springs.
///
/// Single-threaded by design: the thread that mutates springs is the thread
/// that ticks, so there is nothing to lock.
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
        }
    }

    /// Register a spring and return its handle.
    pub fn add(&mut self, spring: Spring) -> SpringId {
        self.springs.insert(spring)
    }

    /// Remove a spring, canceling its animation. Returns the spring so the
    /// caller can inspect its last value or hand its velocity onward.
    pub fn remove(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    pub fn get(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    /// Apply a function to a spring if it is still registered.
    pub fn with_spring_mut<F, R>(&mut self, id: SpringId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Spring) -> R,
    {
        self.springs.get_mut(id).map(f)
    }

    /// Advance every registered spring by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
    }

    /// Whether a spring has converged. A removed spring counts as settled,
    /// since nothing is animating anymore.
    pub fn is_settled(&self, id: SpringId) -> bool {
        self.springs.get(id).map(|s| s.is_settled()).unwrap_or(true)
    }

    /// Ids of springs that have converged, ready to be released.
    pub fn settled_ids(&self) -> SmallVec<[SpringId; 8]> {
        self.springs
            .iter()
            .filter(|(_, s)| s.is_settled())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn has_active(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    /// Drop every registered spring.
    pub fn clear(&mut self) {
        if !self.springs.is_empty() {
            tracing::debug!(count = self.springs.len(), "clearing scheduler");
        }
        self.springs.clear();
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
