//! Persistence seams for the three panels.
//!
//! Services only see these traits; the SQLite implementations live under
//! [`crate::dao::sqlite`]. Every mutating method is one logical operation and
//! commits atomically.

use futures::future::BoxFuture;

use crate::{
    dao::storage::StorageResult,
    state::{
        match_state::{MatchState, NewPenalty, Penalty},
        overlay::{OverlayEntry, OverlayEntryInput, OverlayEntryPatch},
        schedule::{ScheduleEntry, ScheduleEntryInput},
    },
};

/// In-place edit applied to the match aggregate inside a write transaction.
pub type MatchEdit = Box<dyn FnOnce(&mut MatchState) + Send>;

/// Liveness check shared by every store.
pub trait HealthCheck: Send + Sync {
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Storage for the scoreboard: the singleton match row and the penalty list.
pub trait MatchStore: HealthCheck {
    /// Read the match and all penalties (insertion order) from one consistent snapshot.
    fn load_match(&self) -> BoxFuture<'static, StorageResult<(MatchState, Vec<Penalty>)>>;
    /// Read-modify-write the match row atomically, returning the stored result.
    fn modify_match(&self, edit: MatchEdit) -> BoxFuture<'static, StorageResult<MatchState>>;
    fn add_penalty(&self, penalty: NewPenalty) -> BoxFuture<'static, StorageResult<i64>>;
    /// Delete every penalty, returning how many were removed.
    fn clear_penalties(&self) -> BoxFuture<'static, StorageResult<usize>>;
}

/// Storage for the program overlay entries.
pub trait OverlayStore: HealthCheck {
    /// All entries, newest first.
    fn list_entries(&self) -> BoxFuture<'static, StorageResult<Vec<OverlayEntry>>>;
    fn find_entry(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<OverlayEntry>>>;
    fn find_active(&self) -> BoxFuture<'static, StorageResult<Option<OverlayEntry>>>;
    /// Insert an inactive, visible entry and return its id.
    fn insert_entry(&self, input: OverlayEntryInput) -> BoxFuture<'static, StorageResult<i64>>;
    /// Returns `false` when no entry has this id.
    fn update_entry(
        &self,
        id: i64,
        patch: OverlayEntryPatch,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    fn delete_entry(&self, id: i64) -> BoxFuture<'static, StorageResult<bool>>;
    /// Make `id` the only active entry. Unknown ids leave no entry active; returns
    /// whether the target existed.
    fn select_active(&self, id: i64) -> BoxFuture<'static, StorageResult<bool>>;
    /// Flip the active entry's visibility, returning the new flag (`None` when nothing is active).
    fn toggle_visibility(&self) -> BoxFuture<'static, StorageResult<Option<bool>>>;
}

/// Storage for the weekly schedule grid.
pub trait ScheduleStore: HealthCheck {
    fn list_entries(&self) -> BoxFuture<'static, StorageResult<Vec<ScheduleEntry>>>;
    fn insert_entry(&self, input: ScheduleEntryInput) -> BoxFuture<'static, StorageResult<i64>>;
    fn update_entry(
        &self,
        id: i64,
        input: ScheduleEntryInput,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    fn delete_entry(&self, id: i64) -> BoxFuture<'static, StorageResult<bool>>;
    /// Replace the whole grid in one transaction, returning the number of rows written.
    fn replace_all(
        &self,
        entries: Vec<ScheduleEntryInput>,
    ) -> BoxFuture<'static, StorageResult<usize>>;
}
