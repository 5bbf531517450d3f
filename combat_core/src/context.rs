//! CombatContext - State shared by every resolution on one server
//!
//! Owns the status registry, the deferred task queue, the tunable constants
//! and the current tick. The host drives it: `resolve` for each damage signal
//! and `tick` once per game tick.

use crate::ability;
use crate::attributes::{self, AttributeSet};
use crate::combat::{self, CombatResult, CombatSignal};
use crate::config::CombatConstants;
use crate::host::{Equipment, Feedback, Host};
use crate::scheduler::{DeferredTask, DeferredTaskQueue};
use crate::status::{StatusEffect, StatusEffectRegistry, StatusKind};
use crate::types::{DamageCause, EntityId, Tick};
use rand::Rng;
use tracing::{debug, trace};

/// What one call to `tick` did
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub tick: Tick,
    /// Statuses removed by their expiry
    pub expired: Vec<(EntityId, StatusKind)>,
    pub cooldowns_released: usize,
    /// Entities whose attributes were pushed to the display
    pub synced: Vec<EntityId>,
    /// Deferred chain damage resolved this tick
    pub chain_hits: Vec<CombatResult>,
}

impl TickReport {
    pub fn new(tick: Tick) -> Self {
        TickReport {
            tick,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expired.is_empty()
            && self.cooldowns_released == 0
            && self.synced.is_empty()
            && self.chain_hits.is_empty()
    }
}

/// Explicit engine state passed to every operation
#[derive(Debug, Clone, Default)]
pub struct CombatContext {
    statuses: StatusEffectRegistry,
    queue: DeferredTaskQueue,
    constants: CombatConstants,
    now: Tick,
}

impl CombatContext {
    pub fn new(constants: CombatConstants) -> Self {
        CombatContext {
            constants,
            ..Default::default()
        }
    }

    /// Current tick
    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn constants(&self) -> &CombatConstants {
        &self.constants
    }

    pub fn statuses(&self) -> &StatusEffectRegistry {
        &self.statuses
    }

    /// Pending deferred tasks in fire order
    pub fn pending_tasks(&self) -> impl Iterator<Item = (Tick, &DeferredTask)> {
        self.queue.pending()
    }

    /// Queue a task `delay` ticks from now
    pub fn schedule(&mut self, delay: Tick, task: DeferredTask) -> Tick {
        self.queue.schedule_after(self.now, delay, task)
    }

    /// Effective attributes of an entity right now
    pub fn attributes<E: Equipment + ?Sized>(&self, equipment: &E, entity: EntityId) -> AttributeSet {
        attributes::effective(entity, equipment, &self.statuses, &self.constants.mitigation)
    }

    /// Add stacks of a status starting now
    pub fn add_status(
        &mut self,
        entity: EntityId,
        kind: StatusKind,
        stacks: u32,
        duration: Tick,
    ) -> Option<StatusEffect> {
        self.statuses
            .add_stacks(entity, kind, stacks, duration, self.now, &mut self.queue)
    }

    /// Resolve a damage signal
    pub fn resolve<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        signal: &CombatSignal,
        rng: &mut impl Rng,
    ) -> CombatResult {
        combat::resolve_with_rng(self, host, signal, rng)
    }

    /// Death cleanup: every status of the entity goes away
    pub fn entity_died(&mut self, entity: EntityId) {
        let cleared = self.statuses.clear(entity);
        debug!(%entity, cleared, "entity died");
    }

    /// The host changed an entity's equipment
    ///
    /// Attributes are re-read on the next sync so the slots have settled.
    pub fn equipment_changed(&mut self, entity: EntityId) {
        let delay = self.constants.scheduling.attribute_sync_delay;
        self.schedule(delay, DeferredTask::SyncAttributes { entity });
    }

    /// Advance one tick and run every task that became due
    pub fn tick<H: Host + ?Sized>(&mut self, host: &mut H, rng: &mut impl Rng) -> TickReport {
        self.now += 1;
        let mut report = TickReport::new(self.now);

        while let Some((_, task)) = self.queue.pop_due(self.now) {
            trace!(tick = self.now, ?task, "running deferred task");
            self.run_task(host, task, rng, &mut report);
        }

        report
    }

    /// Advance several ticks, collecting one report per tick
    pub fn advance<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        ticks: Tick,
        rng: &mut impl Rng,
    ) -> Vec<TickReport> {
        (0..ticks).map(|_| self.tick(host, rng)).collect()
    }

    fn run_task<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        task: DeferredTask,
        rng: &mut impl Rng,
        report: &mut TickReport,
    ) {
        match task {
            DeferredTask::ExpireStatus {
                entity,
                kind,
                generation,
            } => {
                if self.statuses.expire(entity, kind, generation) {
                    report.expired.push((entity, kind));
                }
            }
            DeferredTask::ClearCooldown { entity, slot, key } => {
                if ability::release_cooldown(host, entity, slot, key, self.now) {
                    report.cooldowns_released += 1;
                }
            }
            DeferredTask::SyncAttributes { entity } => {
                if host.exists(entity) {
                    let attributes = self.attributes(&*host, entity);
                    host.feedback(entity, Feedback::AttributesSynced { attributes });
                    report.synced.push(entity);
                }
            }
            DeferredTask::ChainHit {
                source,
                victim,
                amount,
            } => {
                if host.is_alive(victim) {
                    let signal =
                        CombatSignal::new(DamageCause::Ability, victim, amount).with_attacker(source);
                    let result = combat::resolve_with_rng(self, host, &signal, rng);
                    report.chain_hits.push(result);
                }
            }
        }
    }
}
