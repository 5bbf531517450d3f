//! Avoidance - Percent rolls for critical hits, counters and dodges

use crate::config::CriticalConstants;
use rand::Rng;

/// Roll a percent chance: succeeds when `chance > uniform(0, 100)`
///
/// 0 never succeeds, 100 or more always does.
pub fn roll_chance(chance: f64, rng: &mut impl Rng) -> bool {
    chance > rng.gen_range(0.0..100.0)
}

/// Damage multiplier of a critical hit
pub fn critical_multiplier(constants: &CriticalConstants, critical_damage: f64) -> f64 {
    constants.base_multiplier + critical_damage / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(roll_chance(100.0, &mut rng));
            assert!(!roll_chance(0.0, &mut rng));
        }
    }

    #[test]
    fn test_roll_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let hits = (0..10_000).filter(|_| roll_chance(30.0, &mut rng)).count();
        assert!((2_700..3_300).contains(&hits), "hits = {}", hits);
    }

    #[test]
    fn test_critical_multiplier() {
        let c = CriticalConstants::default();
        assert!((critical_multiplier(&c, 0.0) - 1.25).abs() < f64::EPSILON);
        assert!((critical_multiplier(&c, 50.0) - 1.75).abs() < f64::EPSILON);
    }
}
