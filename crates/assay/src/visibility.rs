//! Per-node expansion state with optional snapshot persistence.
//!
//! A [`VisibilityStore`] maps node ids to an explicit expanded (`true`) or
//! collapsed (`false`) flag. Nodes without an entry use the configured
//! default. The store never hides or removes graph nodes itself; the
//! rendering pass reads it to decide what to show.
//!
//! When a snapshot key is configured, the whole map is written to a
//! [`SnapshotStore`] after every change and read back on construction.
//! Persistence is best-effort: failures are logged and the in-memory state
//! stays authoritative.
//!
//! Bulk operations can also be deferred through [`VisibilityStore::schedule`],
//! which keeps a single pending [`BulkOp`] and applies it once the quiet
//! period has elapsed. A new call within the window replaces the pending one.

mod debounce;
mod snapshot;

pub use debounce::Debouncer;
pub use snapshot::{FileStore, MemoryStore, SnapshotStore, StoreError};

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use log::{debug, info, warn};

use assay_core::identifier::Id;

use crate::traversal::Adjacency;

/// Construction options of a [`VisibilityStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityOptions {
    default_expanded: bool,
    snapshot_key: Option<String>,
    debounce: Duration,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self::new(false)
    }
}

impl VisibilityOptions {
    /// Options with the given default state, no persistence and a 150 ms debounce window.
    pub fn new(default_expanded: bool) -> Self {
        Self {
            default_expanded,
            snapshot_key: None,
            debounce: Duration::from_millis(150),
        }
    }

    /// Sets the snapshot key (builder style). `None` disables persistence.
    pub fn with_snapshot_key(mut self, key: Option<String>) -> Self {
        self.snapshot_key = key;
        self
    }

    /// Sets the debounce quiet period (builder style).
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn default_expanded(&self) -> bool {
        self.default_expanded
    }

    pub fn snapshot_key(&self) -> Option<&str> {
        self.snapshot_key.as_deref()
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }
}

/// A bulk operation that can be deferred with [`VisibilityStore::schedule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOp {
    ExpandMany(Vec<Id>),
    CollapseMany(Vec<Id>),
    /// Expand the given ids, or every id with an entry when `None`.
    ExpandAll(Option<Vec<Id>>),
    /// Collapse the given ids, or every id with an entry when `None`.
    CollapseAll(Option<Vec<Id>>),
    FocusMode { focus: Vec<Id>, all: Vec<Id> },
}

/// Expansion state of the nodes of one diagram session.
#[derive(Debug)]
pub struct VisibilityStore<S = MemoryStore> {
    options: VisibilityOptions,
    state: IndexMap<Id, bool>,
    snapshots: S,
    pending: Debouncer<BulkOp>,
}

impl<S: SnapshotStore> VisibilityStore<S> {
    /// Creates a store, restoring the snapshot under the configured key if there is one.
    ///
    /// A missing, unreadable or corrupt snapshot yields an empty state.
    pub fn new(options: VisibilityOptions, snapshots: S) -> Self {
        let state = match options.snapshot_key() {
            Some(key) => load_snapshot(&snapshots, key),
            None => IndexMap::new(),
        };
        let pending = Debouncer::new(options.debounce());
        Self {
            options,
            state,
            snapshots,
            pending,
        }
    }

    pub fn options(&self) -> &VisibilityOptions {
        &self.options
    }

    /// Returns the snapshot storage.
    pub fn store(&self) -> &S {
        &self.snapshots
    }

    /// Consumes the visibility store, returning its snapshot storage.
    pub fn into_store(self) -> S {
        self.snapshots
    }

    /// Returns whether `id` is expanded, resolving absent entries to the default.
    pub fn is_expanded(&self, id: Id) -> bool {
        self.explicit(id).unwrap_or(self.options.default_expanded)
    }

    /// Returns the explicit state of `id`, if it has one.
    pub fn explicit(&self, id: Id) -> Option<bool> {
        self.state.get(&id).copied()
    }

    /// Iterates over the explicit entries in the order they were first set.
    pub fn entries(&self) -> impl Iterator<Item = (Id, bool)> + '_ {
        self.state.iter().map(|(id, expanded)| (*id, *expanded))
    }

    /// Returns the explicit entries as they would be persisted.
    pub fn snapshot(&self) -> &IndexMap<Id, bool> {
        &self.state
    }

    /// Flips the state of `id` and returns the new state.
    pub fn toggle(&mut self, id: Id) -> bool {
        let expanded = !self.is_expanded(id);
        self.state.insert(id, expanded);
        self.persist();
        expanded
    }

    pub fn expand(&mut self, id: Id) {
        self.set_many([id], true);
    }

    pub fn collapse(&mut self, id: Id) {
        self.set_many([id], false);
    }

    pub fn expand_many(&mut self, ids: impl IntoIterator<Item = Id>) {
        self.set_many(ids, true);
    }

    pub fn collapse_many(&mut self, ids: impl IntoIterator<Item = Id>) {
        self.set_many(ids, false);
    }

    /// Expands `ids`, or every node that already has an entry when `ids` is `None`.
    ///
    /// Nodes that were never touched keep resolving to the default.
    pub fn expand_all(&mut self, ids: Option<&[Id]>) {
        self.set_all(ids, true);
    }

    /// Collapses `ids`, or every node that already has an entry when `ids` is `None`.
    pub fn collapse_all(&mut self, ids: Option<&[Id]>) {
        self.set_all(ids, false);
    }

    /// Collapses every id in `all`, then expands every id in `focus`.
    pub fn focus_mode(&mut self, focus: &[Id], all: &[Id]) {
        for id in all {
            self.state.insert(*id, false);
        }
        for id in focus {
            self.state.insert(*id, true);
        }
        debug!(focus = focus.len(), all = all.len(); "Applied focus mode");
        self.persist();
    }

    /// Expands `id` and all of its ancestors.
    pub fn expand_path_to_node(&mut self, id: Id, adjacency: &Adjacency) {
        self.set_many(adjacency.ancestors_of(id), true);
    }

    /// Expands `id` and all of its descendants.
    pub fn expand_subtree(&mut self, id: Id, adjacency: &Adjacency) {
        self.set_many(adjacency.descendants_of(id), true);
    }

    /// Clears every explicit entry and drops any pending bulk operation.
    pub fn reset(&mut self) {
        self.pending.cancel();
        self.state.clear();
        self.persist();
    }

    /// Applies a bulk operation immediately.
    pub fn apply(&mut self, op: BulkOp) {
        match op {
            BulkOp::ExpandMany(ids) => self.expand_many(ids),
            BulkOp::CollapseMany(ids) => self.collapse_many(ids),
            BulkOp::ExpandAll(ids) => self.expand_all(ids.as_deref()),
            BulkOp::CollapseAll(ids) => self.collapse_all(ids.as_deref()),
            BulkOp::FocusMode { focus, all } => self.focus_mode(&focus, &all),
        }
    }

    /// Defers `op` until the quiet period has elapsed, replacing any pending operation.
    ///
    /// Returns true if a pending operation was replaced.
    pub fn schedule(&mut self, op: BulkOp, now: Instant) -> bool {
        let replaced = self.pending.schedule(op, now).is_some();
        if replaced {
            debug!("Replaced pending bulk visibility operation");
        }
        replaced
    }

    /// Applies the pending operation if it is due at `now`. Returns true if one was applied.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending.poll(now) {
            Some(op) => {
                self.apply(op);
                true
            }
            None => false,
        }
    }

    /// Applies the pending operation now, regardless of its deadline.
    pub fn flush_pending(&mut self) -> bool {
        match self.pending.flush() {
            Some(op) => {
                self.apply(op);
                true
            }
            None => false,
        }
    }

    /// Drops the pending operation without applying it.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.cancel()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_pending()
    }

    fn set_many(&mut self, ids: impl IntoIterator<Item = Id>, expanded: bool) {
        for id in ids {
            self.state.insert(id, expanded);
        }
        self.persist();
    }

    fn set_all(&mut self, ids: Option<&[Id]>, expanded: bool) {
        match ids {
            Some(ids) => self.set_many(ids.iter().copied(), expanded),
            None => {
                self.state.values_mut().for_each(|value| *value = expanded);
                self.persist();
            }
        }
    }

    /// Writes the whole state under the snapshot key, if one is configured.
    fn persist(&mut self) {
        let Some(key) = self.options.snapshot_key.as_deref() else {
            return;
        };

        let result = serde_json::to_string(&self.state)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
            .and_then(|json| self.snapshots.save(key, &json));

        if let Err(err) = result {
            warn!(key, err:% = err; "Failed to save visibility snapshot");
        }
    }
}

fn load_snapshot<S: SnapshotStore>(snapshots: &S, key: &str) -> IndexMap<Id, bool> {
    let loaded = snapshots.load(key).and_then(|raw| {
        raw.map(|raw| {
            serde_json::from_str::<IndexMap<Id, bool>>(&raw).map_err(|source| {
                StoreError::Corrupt {
                    key: key.to_string(),
                    source,
                }
            })
        })
        .transpose()
    });

    match loaded {
        Ok(Some(state)) => {
            info!(key, entries = state.len(); "Restored visibility snapshot");
            state
        }
        Ok(None) => IndexMap::new(),
        Err(err) => {
            warn!(key, err:% = err; "Ignoring unreadable visibility snapshot");
            IndexMap::new()
        }
    }
}
