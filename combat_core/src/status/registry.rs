//! StatusEffectRegistry - Per-entity status tracking

use super::{StatusEffect, StatusKind};
use crate::scheduler::{DeferredTask, DeferredTaskQueue};
use crate::types::{EntityId, Tick};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone)]
struct StatusEntry {
    effect: StatusEffect,
    /// Matches exactly one scheduled expiry; older expiries are ignored
    generation: u64,
}

/// Status effects of every entity, keyed by entity then kind
#[derive(Debug, Clone, Default)]
pub struct StatusEffectRegistry {
    entries: HashMap<EntityId, BTreeMap<StatusKind, StatusEntry>>,
    next_generation: u64,
}

impl StatusEffectRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add stacks of a status, restarting its timer
    ///
    /// Stacks accumulate; the expiry becomes `now + duration` regardless of
    /// how much time the previous application had left. A fresh expiry task
    /// is queued each time. Zero stacks or a zero duration is a no-op.
    pub fn add_stacks(
        &mut self,
        entity: EntityId,
        kind: StatusKind,
        count: u32,
        duration: Tick,
        now: Tick,
        queue: &mut DeferredTaskQueue,
    ) -> Option<StatusEffect> {
        if count == 0 || duration == 0 {
            debug!(%entity, ?kind, count, duration, "ignoring empty status application");
            return None;
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        let expires_at = now + duration;

        let entry = self
            .entries
            .entry(entity)
            .or_default()
            .entry(kind)
            .and_modify(|e| {
                e.effect.stacks = e.effect.stacks.saturating_add(count);
                e.effect.applied_at = now;
                e.effect.expires_at = expires_at;
                e.generation = generation;
            })
            .or_insert(StatusEntry {
                effect: StatusEffect {
                    entity,
                    kind,
                    stacks: count,
                    applied_at: now,
                    expires_at,
                },
                generation,
            });
        let effect = entry.effect;

        queue.schedule_after(
            now,
            duration,
            DeferredTask::ExpireStatus {
                entity,
                kind,
                generation,
            },
        );

        debug!(%entity, ?kind, stacks = effect.stacks, expires_at, "status applied");
        Some(effect)
    }

    /// Handle a scheduled expiry; returns true if the entry was removed
    ///
    /// Expiries from superseded applications carry an old generation and
    /// leave the entry alone.
    pub fn expire(&mut self, entity: EntityId, kind: StatusKind, generation: u64) -> bool {
        let Some(statuses) = self.entries.get_mut(&entity) else {
            return false;
        };
        let current = statuses.get(&kind).map(|e| e.generation);
        if current != Some(generation) {
            return false;
        }

        statuses.remove(&kind);
        if statuses.is_empty() {
            self.entries.remove(&entity);
        }
        debug!(%entity, ?kind, "status expired");
        true
    }

    /// Snapshot of an entity's statuses
    pub fn get(&self, entity: EntityId) -> BTreeMap<StatusKind, StatusEffect> {
        self.entries
            .get(&entity)
            .map(|statuses| statuses.iter().map(|(k, e)| (*k, e.effect)).collect())
            .unwrap_or_default()
    }

    /// Stack count of one status, 0 when absent
    pub fn stacks(&self, entity: EntityId, kind: StatusKind) -> u32 {
        self.entries
            .get(&entity)
            .and_then(|statuses| statuses.get(&kind))
            .map(|e| e.effect.stacks)
            .unwrap_or(0)
    }

    pub fn has(&self, entity: EntityId, kind: StatusKind) -> bool {
        self.stacks(entity, kind) > 0
    }

    /// Remove one status immediately
    pub fn remove(&mut self, entity: EntityId, kind: StatusKind) -> Option<StatusEffect> {
        let statuses = self.entries.get_mut(&entity)?;
        let removed = statuses.remove(&kind).map(|e| e.effect);
        if statuses.is_empty() {
            self.entries.remove(&entity);
        }
        removed
    }

    /// Remove every status of an entity (death); returns how many were removed
    pub fn clear(&mut self, entity: EntityId) -> usize {
        let removed = self.entries.remove(&entity).map(|s| s.len()).unwrap_or(0);
        if removed > 0 {
            debug!(%entity, removed, "statuses cleared");
        }
        removed
    }

    /// Number of entities with at least one status
    pub fn tracked_entities(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn insert_raw(
        &mut self,
        entity: EntityId,
        kind: StatusKind,
        stacks: u32,
        applied_at: Tick,
        expires_at: Tick,
    ) {
        self.next_generation += 1;
        self.entries.entry(entity).or_default().insert(
            kind,
            StatusEntry {
                effect: StatusEffect {
                    entity,
                    kind,
                    stacks,
                    applied_at,
                    expires_at,
                },
                generation: self.next_generation,
            },
        );
    }
}
