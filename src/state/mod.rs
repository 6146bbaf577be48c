pub mod clock;
pub mod match_clock;
pub mod match_state;
pub mod overlay;
pub mod schedule;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::dao::store::{HealthCheck, MatchStore, OverlayStore, ScheduleStore};

use self::clock::Clock;

/// Storage check shared by every panel's `/healthcheck` route.
#[derive(Clone)]
pub struct HealthState {
    store: Arc<dyn HealthCheck>,
}

impl HealthState {
    pub fn new(store: Arc<dyn HealthCheck>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn HealthCheck {
        self.store.as_ref()
    }
}

/// Shared state of the scoreboard panel.
#[derive(Clone)]
pub struct ScoreboardState {
    store: Arc<dyn MatchStore>,
    clock: Arc<dyn Clock>,
    health: HealthState,
}

impl ScoreboardState {
    /// Build the scoreboard state around an explicitly constructed store and time source.
    pub fn new<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Self
    where
        S: MatchStore + 'static,
    {
        let health = HealthState::new(store.clone());
        Self {
            store,
            clock,
            health,
        }
    }

    pub fn store(&self) -> &dyn MatchStore {
        self.store.as_ref()
    }

    /// Handle to the time source, cloneable into storage transactions.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}

/// Shared state of the program overlay panel.
#[derive(Clone)]
pub struct OverlayState {
    store: Arc<dyn OverlayStore>,
    health: HealthState,
}

impl OverlayState {
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: OverlayStore + 'static,
    {
        let health = HealthState::new(store.clone());
        Self { store, health }
    }

    pub fn store(&self) -> &dyn OverlayStore {
        self.store.as_ref()
    }
}

/// Shared state of the schedule editor panel.
#[derive(Clone)]
pub struct ScheduleState {
    store: Arc<dyn ScheduleStore>,
    health: HealthState,
}

impl ScheduleState {
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: ScheduleStore + 'static,
    {
        let health = HealthState::new(store.clone());
        Self { store, health }
    }

    pub fn store(&self) -> &dyn ScheduleStore {
        self.store.as_ref()
    }
}

impl FromRef<ScoreboardState> for HealthState {
    fn from_ref(state: &ScoreboardState) -> Self {
        state.health.clone()
    }
}

impl FromRef<OverlayState> for HealthState {
    fn from_ref(state: &OverlayState) -> Self {
        state.health.clone()
    }
}

impl FromRef<ScheduleState> for HealthState {
    fn from_ref(state: &ScheduleState) -> Self {
        state.health.clone()
    }
}
