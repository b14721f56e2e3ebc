//! Persona selection for a newly-engaged session.
//!
//! The first candidate in a category's candidate list plays deterministically
//! for the first two turns; after that a random candidate keeps repeat
//! engagements with the same category from sounding identical.

use rand::seq::SliceRandom;
use rand::Rng;

use scam_honeypot_config::category::CategoryConfig;
use scam_honeypot_core::PersonaType;

pub fn select_persona(cfg: &CategoryConfig, turn_count: u32, rng: &mut impl Rng) -> PersonaType {
    let candidates = cfg.persona_candidates;
    if candidates.is_empty() {
        return PersonaType::default();
    }

    if turn_count <= 2 {
        candidates[0]
    } else {
        *candidates.choose(rng).unwrap_or(&candidates[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use scam_honeypot_config::category::category_config;
    use scam_honeypot_core::ScamCategory;

    #[test]
    fn early_turns_are_deterministic() {
        let cfg = category_config(ScamCategory::DigitalArrest);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(select_persona(cfg, 1, &mut rng), cfg.persona_candidates[0]);
            assert_eq!(select_persona(cfg, 2, &mut rng), cfg.persona_candidates[0]);
        }
    }

    #[test]
    fn later_turns_pick_from_candidate_list() {
        let cfg = category_config(ScamCategory::DigitalArrest);
        let mut rng = StdRng::seed_from_u64(1);
        let persona = select_persona(cfg, 5, &mut rng);
        assert!(cfg.persona_candidates.contains(&persona));
    }

    #[test]
    fn same_seed_picks_the_same_later_turn_persona() {
        let cfg = category_config(ScamCategory::DigitalArrest);
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        assert_eq!(
            select_persona(cfg, 5, &mut rng_a),
            select_persona(cfg, 5, &mut rng_b)
        );
    }
}
