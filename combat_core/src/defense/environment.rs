//! Environment - Cause-specific protection enchantments

use crate::attributes::{AttributeKind, AttributeSet};
use crate::config::MitigationConstants;
use crate::types::DamageCause;

/// Verdict of the environmental step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvironmentMitigation {
    /// No protection applies to this cause
    Unaffected,
    /// Remove this fraction of the damage (1.0 cancels the hit)
    Reduce(f64),
    /// Blast immunity: negate the hit and heal the defender instead
    Absorb,
}

/// Pick the protection matching the cause and compute its reduction
pub fn environment_mitigation(
    cause: DamageCause,
    defender: &AttributeSet,
    constants: &MitigationConstants,
) -> EnvironmentMitigation {
    let level = |kind: AttributeKind| defender.level(kind) as f64;
    let capped = |kind: AttributeKind| {
        (level(kind) * constants.environment_per_level).min(constants.environment_cap)
    };

    let reduction = if cause.is_fire() {
        (level(AttributeKind::FireProtection) * constants.fire_per_level).min(1.0)
    } else if cause == DamageCause::Fall {
        capped(AttributeKind::FeatherFalling)
    } else if cause.is_magic() {
        capped(AttributeKind::Protection)
    } else if cause == DamageCause::Projectile {
        capped(AttributeKind::ProjectileProtection)
    } else if cause.is_explosion() {
        if defender.level(AttributeKind::BlastProtection) >= constants.blast_immunity_level {
            return EnvironmentMitigation::Absorb;
        }
        (level(AttributeKind::BlastProtection) * constants.blast_per_level).min(constants.blast_cap)
    } else {
        return EnvironmentMitigation::Unaffected;
    };

    EnvironmentMitigation::Reduce(reduction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(kind: AttributeKind, value: f64) -> AttributeSet {
        let mut set = AttributeSet::new();
        set.set_base(kind, value);
        set
    }

    fn reduction(m: EnvironmentMitigation) -> f64 {
        match m {
            EnvironmentMitigation::Reduce(r) => r,
            other => panic!("expected a reduction, got {:?}", other),
        }
    }

    #[test]
    fn test_fire_protection() {
        let c = MitigationConstants::default();
        let set = with(AttributeKind::FireProtection, 4.0);
        let m = environment_mitigation(DamageCause::Lava, &set, &c);
        assert!((reduction(m) - 0.4).abs() < 1e-9);

        // Ten levels grant full immunity
        let set = with(AttributeKind::FireProtection, 12.0);
        let m = environment_mitigation(DamageCause::FireTick, &set, &c);
        assert!((reduction(m) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_feather_falling_capped() {
        let c = MitigationConstants::default();
        let set = with(AttributeKind::FeatherFalling, 30.0);
        let m = environment_mitigation(DamageCause::Fall, &set, &c);
        assert!((reduction(m) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_magic_uses_protection() {
        let c = MitigationConstants::default();
        let set = with(AttributeKind::Protection, 5.0);
        let m = environment_mitigation(DamageCause::Poison, &set, &c);
        assert!((reduction(m) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_projectile_protection() {
        let c = MitigationConstants::default();
        let set = with(AttributeKind::ProjectileProtection, 3.0);
        let m = environment_mitigation(DamageCause::Projectile, &set, &c);
        assert!((reduction(m) - 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_blast_immunity() {
        let c = MitigationConstants::default();
        let set = with(AttributeKind::BlastProtection, 9.0);
        let m = environment_mitigation(DamageCause::EntityExplosion, &set, &c);
        assert!((reduction(m) - 0.9).abs() < 1e-9);

        let set = with(AttributeKind::BlastProtection, 10.0);
        assert_eq!(
            environment_mitigation(DamageCause::BlockExplosion, &set, &c),
            EnvironmentMitigation::Absorb
        );
    }

    #[test]
    fn test_melee_unaffected() {
        let c = MitigationConstants::default();
        let set = with(AttributeKind::Protection, 4.0);
        assert_eq!(
            environment_mitigation(DamageCause::EntityAttack, &set, &c),
            EnvironmentMitigation::Unaffected
        );
    }
}
