//! Deferred task queue
//!
//! Follow-up work that must observe state after the triggering action has
//! fully applied is queued here and run by `CombatContext::tick`. Tasks are
//! ordered by fire tick, then by insertion order. A queued task cannot be
//! cancelled; tasks whose target no longer exists do nothing when they run.

use crate::ability::AbilityKey;
use crate::status::StatusKind;
use crate::types::{EntityId, EquipmentSlot, Tick};
use std::collections::BTreeMap;

/// Work scheduled to run on a later tick
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredTask {
    /// Remove a status if it still belongs to the same application
    ExpireStatus {
        entity: EntityId,
        kind: StatusKind,
        generation: u64,
    },
    /// Return an ability binding to READY
    ClearCooldown {
        entity: EntityId,
        slot: EquipmentSlot,
        key: AbilityKey,
    },
    /// Re-read equipment after it changed and publish the new attributes
    SyncAttributes { entity: EntityId },
    /// Chain damage from a passive ability landing on one victim
    ChainHit {
        source: EntityId,
        victim: EntityId,
        amount: f64,
    },
}

/// FIFO-per-tick queue of deferred tasks
#[derive(Debug, Clone, Default)]
pub struct DeferredTaskQueue {
    tasks: BTreeMap<(Tick, u64), DeferredTask>,
    next_seq: u64,
}

impl DeferredTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task to run `delay` ticks after `now`; returns the fire tick
    pub fn schedule_after(&mut self, now: Tick, delay: Tick, task: DeferredTask) -> Tick {
        let fire_at = now + delay;
        self.tasks.insert((fire_at, self.next_seq), task);
        self.next_seq += 1;
        fire_at
    }

    /// Take the earliest task due at or before `now`
    pub fn pop_due(&mut self, now: Tick) -> Option<(Tick, DeferredTask)> {
        let (&(fire_at, seq), _) = self.tasks.iter().next()?;
        if fire_at > now {
            return None;
        }
        self.tasks.remove(&(fire_at, seq)).map(|task| (fire_at, task))
    }

    /// Fire tick of the earliest pending task
    pub fn next_due(&self) -> Option<Tick> {
        self.tasks.keys().next().map(|(tick, _)| *tick)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pending tasks in fire order
    pub fn pending(&self) -> impl Iterator<Item = (Tick, &DeferredTask)> {
        self.tasks.iter().map(|((tick, _), task)| (*tick, task))
    }
}
