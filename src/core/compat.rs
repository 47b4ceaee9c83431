use crate::models::{Sign, SignTriad};

/// Relative weight of each sign comparison in the pairwise score.
///
/// The defaults sum to exactly 100; configuration rejects triples that
/// sum past that, and the scorer clamps as a second line of defense.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub sun: u8,
    pub moon: u8,
    pub rising: u8,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            sun: 45,
            moon: 35,
            rising: 20,
        }
    }
}

/// Signs considered compatible with the given sign, itself included.
///
/// The table is symmetric by construction: every entry here has a matching
/// reverse entry (`test_table_symmetry` enforces this), which is what makes
/// the pairwise score order-independent.
pub fn compatible_signs(sign: Sign) -> &'static [Sign] {
    use Sign::*;
    match sign {
        Aries => &[Aries, Leo, Sagittarius, Aquarius, Gemini],
        Taurus => &[Taurus, Virgo, Capricorn, Pisces, Cancer],
        Gemini => &[Gemini, Libra, Aquarius, Aries, Leo],
        Cancer => &[Cancer, Pisces, Scorpio, Taurus, Virgo],
        Leo => &[Leo, Aries, Sagittarius, Gemini, Libra],
        Virgo => &[Virgo, Taurus, Capricorn, Cancer, Scorpio],
        Libra => &[Libra, Gemini, Aquarius, Leo, Sagittarius],
        Scorpio => &[Scorpio, Cancer, Pisces, Virgo, Capricorn],
        Sagittarius => &[Sagittarius, Aries, Leo, Libra, Aquarius],
        Capricorn => &[Capricorn, Taurus, Virgo, Scorpio, Pisces],
        Aquarius => &[Aquarius, Gemini, Libra, Aries, Sagittarius],
        Pisces => &[Pisces, Cancer, Scorpio, Taurus, Capricorn],
        Unknown => &[],
    }
}

/// Whether two signs are mutually compatible. `Unknown` matches nothing.
#[inline]
pub fn is_compatible(a: Sign, b: Sign) -> bool {
    compatible_signs(a).contains(&b)
}

/// Pairwise compatibility score in [0, 100].
///
/// Weighted sum of three independent binary checks; each comparison
/// contributes its full weight or nothing. Symmetric in its arguments
/// because the underlying table is symmetric. Weights come from operator
/// config, so the sum is accumulated wide and clamped to keep the score
/// in range even for a misconfigured triple.
pub fn compatibility_score(a: &SignTriad, b: &SignTriad, weights: &ScoreWeights) -> u8 {
    let sun = if is_compatible(a.sun, b.sun) { weights.sun } else { 0 };
    let moon = if is_compatible(a.moon, b.moon) { weights.moon } else { 0 };
    let rising = if is_compatible(a.rising, b.rising) { weights.rising } else { 0 };
    (sun as u16 + moon as u16 + rising as u16).min(100) as u8
}

/// Human-readable tier for a compatibility score, used in match results.
pub fn tier_label(score: u8) -> &'static str {
    match score {
        80..=100 => "Soulmates",
        55..=79 => "Kindred spirits",
        35..=54 => "Worth exploring",
        _ => "Challenging",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::signs::ZODIAC;

    #[test]
    fn test_table_symmetry() {
        for &a in &ZODIAC {
            for &b in compatible_signs(a) {
                assert!(
                    compatible_signs(b).contains(&a),
                    "{} lists {} but not the reverse",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_every_sign_compatible_with_itself() {
        for &sign in &ZODIAC {
            assert!(is_compatible(sign, sign), "{} not self-compatible", sign);
        }
    }

    #[test]
    fn test_unknown_matches_nothing() {
        for &sign in &ZODIAC {
            assert!(!is_compatible(Sign::Unknown, sign));
            assert!(!is_compatible(sign, Sign::Unknown));
        }
        assert!(!is_compatible(Sign::Unknown, Sign::Unknown));
    }

    #[test]
    fn test_score_symmetry() {
        let weights = ScoreWeights::default();
        for &sun_a in &ZODIAC {
            for &sun_b in &ZODIAC {
                let a = SignTriad { sun: sun_a, moon: Sign::Leo, rising: Sign::Gemini };
                let b = SignTriad { sun: sun_b, moon: Sign::Aries, rising: Sign::Cancer };
                assert_eq!(
                    compatibility_score(&a, &b, &weights),
                    compatibility_score(&b, &a, &weights)
                );
            }
        }
    }

    #[test]
    fn test_score_attainable_values() {
        let attainable = [0u8, 20, 35, 45, 55, 65, 80, 100];
        let weights = ScoreWeights::default();
        for &sun in &[Sign::Aries, Sign::Taurus] {
            for &moon in &[Sign::Leo, Sign::Virgo] {
                for &rising in &[Sign::Gemini, Sign::Cancer] {
                    let a = SignTriad { sun, moon, rising };
                    for &sun_b in &ZODIAC {
                        for &moon_b in &ZODIAC {
                            let b = SignTriad { sun: sun_b, moon: moon_b, rising: Sign::Libra };
                            let score = compatibility_score(&a, &b, &weights);
                            assert!(attainable.contains(&score), "unexpected score {}", score);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_reference_pair_scores_80() {
        // Aries/Leo/Gemini vs Leo/Aries/Cancer: sun and moon compatible,
        // rising not (Gemini does not list Cancer)
        let a = SignTriad { sun: Sign::Aries, moon: Sign::Leo, rising: Sign::Gemini };
        let b = SignTriad { sun: Sign::Leo, moon: Sign::Aries, rising: Sign::Cancer };
        let score = compatibility_score(&a, &b, &ScoreWeights::default());
        assert_eq!(score, 80);
        assert_eq!(tier_label(score), "Soulmates");
    }

    #[test]
    fn test_oversized_weights_clamp_instead_of_overflowing() {
        let weights = ScoreWeights { sun: 100, moon: 100, rising: 100 };
        let a = SignTriad { sun: Sign::Aries, moon: Sign::Aries, rising: Sign::Aries };
        assert_eq!(compatibility_score(&a, &a, &weights), 100);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(tier_label(100), "Soulmates");
        assert_eq!(tier_label(80), "Soulmates");
        assert_eq!(tier_label(65), "Kindred spirits");
        assert_eq!(tier_label(45), "Worth exploring");
        assert_eq!(tier_label(20), "Challenging");
        assert_eq!(tier_label(0), "Challenging");
    }
}
