//! Loadout - the durable record of an agent's augments
//!
//! Entries outlive the agent: when it is removed every attached runtime
//! captures its state into its entry, and on respawn fresh runtimes are
//! initialized from those entries.

use crate::augment::{variants, AugmentDefinition, AugmentRuntime, BehaviorBuilder, PersistentState};
use crate::types::{AugmentId, EntityId, Round};
use std::fmt;
use std::sync::Arc;

/// One held augment
pub struct LoadoutEntry {
    definition: Arc<AugmentDefinition>,
    round_acquired: Round,
    persistent_state: Option<PersistentState>,
    builder: BehaviorBuilder,
    runtime: Option<AugmentRuntime>,
}

impl LoadoutEntry {
    pub fn new(definition: Arc<AugmentDefinition>, round_acquired: Round) -> Self {
        Self::with_builder(definition, round_acquired, variants::build)
    }

    /// Entry whose runtime behavior comes from `builder` instead of the
    /// definition's built-in kind
    pub fn with_builder(definition: Arc<AugmentDefinition>, round_acquired: Round, builder: BehaviorBuilder) -> Self {
        LoadoutEntry {
            definition,
            round_acquired,
            persistent_state: None,
            builder,
            runtime: None,
        }
    }

    pub fn definition(&self) -> &Arc<AugmentDefinition> {
        &self.definition
    }

    pub fn id(&self) -> &AugmentId {
        &self.definition.id
    }

    pub fn round_acquired(&self) -> Round {
        self.round_acquired
    }

    pub fn persistent_state(&self) -> Option<&PersistentState> {
        self.persistent_state.as_ref()
    }

    /// Seed state for the next attach (e.g., restored from a save)
    pub fn set_persistent_state(&mut self, state: Option<PersistentState>) {
        self.persistent_state = state;
    }

    pub fn runtime(&self) -> Option<&AugmentRuntime> {
        self.runtime.as_ref()
    }

    pub(crate) fn runtime_mut(&mut self) -> Option<&mut AugmentRuntime> {
        self.runtime.as_mut()
    }

    pub(crate) fn take_runtime(&mut self) -> Option<AugmentRuntime> {
        self.runtime.take()
    }

    pub fn is_attached(&self) -> bool {
        self.runtime.is_some()
    }

    /// Whether the duration window has fully elapsed
    pub fn has_expired(&self, current_round: Round) -> bool {
        self.definition
            .max_active_rounds
            .has_elapsed(self.round_acquired, current_round)
    }

    fn attach(&mut self, owner: EntityId, current_round: Round) {
        if self.runtime.is_some() {
            return;
        }
        let mut runtime = AugmentRuntime::initialize_with(
            Arc::clone(&self.definition),
            owner,
            self.round_acquired,
            self.persistent_state.as_ref(),
            self.builder,
        );
        runtime.set_current_round(current_round);
        self.runtime = Some(runtime);
    }

    fn capture_and_detach(&mut self) {
        if let Some(mut runtime) = self.runtime.take() {
            self.persistent_state = runtime.capture_persistent_state();
            runtime.detach();
        }
    }
}

impl fmt::Debug for LoadoutEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadoutEntry")
            .field("id", self.id())
            .field("round_acquired", &self.round_acquired)
            .field("persistent_state", &self.persistent_state)
            .field("runtime", &self.runtime)
            .finish()
    }
}

/// Ordered augments held by one agent, at most one per augment id
#[derive(Debug, Default)]
pub struct Loadout {
    entries: Vec<LoadoutEntry>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in acquisition order
    pub fn iter(&self) -> impl Iterator<Item = &LoadoutEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: &AugmentId) -> Option<&LoadoutEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: &AugmentId) -> Option<&mut LoadoutEntry> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &AugmentId) -> bool {
        self.get(id).is_some()
    }

    /// Add an entry, replacing (in place) any entry with the same id.
    /// Returns the replaced entry.
    pub fn insert(&mut self, entry: LoadoutEntry) -> Option<LoadoutEntry> {
        match self.entries.iter().position(|e| e.id() == entry.id()) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index], entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Acquire an augment at a round (replace, never duplicate).
    /// Returns true if an existing entry was replaced.
    pub fn acquire(&mut self, definition: Arc<AugmentDefinition>, round_acquired: Round) -> bool {
        self.insert(LoadoutEntry::new(definition, round_acquired)).is_some()
    }

    /// Remove an entry permanently
    pub fn remove(&mut self, id: &AugmentId) -> Option<LoadoutEntry> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(index))
    }

    /// Remove and return every entry whose window has fully elapsed
    pub fn prune_expired(&mut self, current_round: Round) -> Vec<LoadoutEntry> {
        let (expired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.has_expired(current_round));
        self.entries = kept;
        expired
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut LoadoutEntry> {
        self.entries.iter_mut()
    }

    /// Create runtimes for every detached entry
    pub(crate) fn attach_all(&mut self, owner: EntityId, current_round: Round) {
        for entry in &mut self.entries {
            entry.attach(owner, current_round);
        }
    }

    /// Attach a single entry by id
    pub(crate) fn attach(&mut self, id: &AugmentId, owner: EntityId, current_round: Round) {
        if let Some(entry) = self.get_mut(id) {
            entry.attach(owner, current_round);
        }
    }

    /// Capture every runtime's state into its entry and discard the runtime
    pub(crate) fn capture_and_detach(&mut self) {
        for entry in &mut self.entries {
            entry.capture_and_detach();
        }
    }

    pub(crate) fn set_current_round(&mut self, round: Round) {
        for runtime in self.entries.iter_mut().filter_map(LoadoutEntry::runtime_mut) {
            runtime.set_current_round(round);
        }
    }
}
