// Unit tests for Astro Match

use astro_match::core::compat::{compatibility_score, compatible_signs, is_compatible, tier_label, ScoreWeights};
use astro_match::core::selection::{RankedCandidate, TopSelection};
use astro_match::core::signs::{julian_day, sign_from_longitude, sun_sign, ZODIAC};
use astro_match::models::{Sign, SignTriad};
use chrono::{NaiveDate, NaiveTime};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_sun_sign_full_boundary_table() {
    let expected = [
        (1, 19, Sign::Capricorn),
        (1, 20, Sign::Aquarius),
        (2, 18, Sign::Aquarius),
        (2, 19, Sign::Pisces),
        (3, 20, Sign::Pisces),
        (3, 21, Sign::Aries),
        (4, 19, Sign::Aries),
        (4, 20, Sign::Taurus),
        (5, 20, Sign::Taurus),
        (5, 21, Sign::Gemini),
        (6, 20, Sign::Gemini),
        (6, 21, Sign::Cancer),
        (7, 22, Sign::Cancer),
        (7, 23, Sign::Leo),
        (8, 22, Sign::Leo),
        (8, 23, Sign::Virgo),
        (9, 22, Sign::Virgo),
        (9, 23, Sign::Libra),
        (10, 22, Sign::Libra),
        (10, 23, Sign::Scorpio),
        (11, 21, Sign::Scorpio),
        (11, 22, Sign::Sagittarius),
        (12, 21, Sign::Sagittarius),
        (12, 22, Sign::Capricorn),
    ];

    for (month, day, sign) in expected {
        assert_eq!(sun_sign(date(1995, month, day)), sign, "{}-{}", month, day);
    }
}

#[test]
fn test_sun_sign_never_unknown_across_leap_year() {
    let mut current = date(2020, 1, 1);
    let end = date(2020, 12, 31);
    while current <= end {
        assert_ne!(sun_sign(current), Sign::Unknown);
        current = current.succ_opt().unwrap();
    }
}

#[test]
fn test_longitude_mapping_covers_all_segments() {
    for (i, &sign) in ZODIAC.iter().enumerate() {
        let midpoint = i as f64 * 30.0 + 15.0;
        assert_eq!(sign_from_longitude(midpoint), sign);
    }
}

#[test]
fn test_julian_day_known_values() {
    // J2000 epoch
    let jd = julian_day(date(2000, 1, 1), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    assert!((jd - 2_451_545.0).abs() < 1e-6);

    // 1990-04-01 00:00 UT
    let jd = julian_day(date(1990, 4, 1), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    assert!((jd - 2_447_982.5).abs() < 1e-6);
}

#[test]
fn test_compatibility_table_symmetric_and_bounded() {
    for &a in &ZODIAC {
        let compatible = compatible_signs(a);
        assert!(compatible.len() <= 5);
        assert!(compatible.contains(&a), "{} must list itself", a);
        for &b in compatible {
            assert!(is_compatible(b, a), "{} -> {} not symmetric", a, b);
        }
    }
}

#[test]
fn test_score_symmetric_over_full_triad_grid() {
    let weights = ScoreWeights::default();
    // Sweep triads built from rotating offsets; enough to cross every
    // table row in each of the three positions
    for i in 0..12 {
        for j in 0..12 {
            let a = SignTriad {
                sun: ZODIAC[i],
                moon: ZODIAC[(i + 3) % 12],
                rising: ZODIAC[(i + 7) % 12],
            };
            let b = SignTriad {
                sun: ZODIAC[j],
                moon: ZODIAC[(j + 5) % 12],
                rising: ZODIAC[(j + 11) % 12],
            };
            assert_eq!(
                compatibility_score(&a, &b, &weights),
                compatibility_score(&b, &a, &weights)
            );
        }
    }
}

#[test]
fn test_score_values_are_exactly_the_attainable_sums() {
    let attainable = [0u8, 20, 35, 45, 55, 65, 80, 100];
    let weights = ScoreWeights::default();
    for i in 0..12 {
        for j in 0..12 {
            let a = SignTriad {
                sun: ZODIAC[i],
                moon: ZODIAC[(i + 4) % 12],
                rising: ZODIAC[(i + 8) % 12],
            };
            let b = SignTriad {
                sun: ZODIAC[j],
                moon: ZODIAC[(j + 2) % 12],
                rising: ZODIAC[(j + 6) % 12],
            };
            let score = compatibility_score(&a, &b, &weights);
            assert!(attainable.contains(&score), "unattainable score {}", score);
        }
    }
}

#[test]
fn test_reference_scenario_soulmates() {
    let target = SignTriad { sun: Sign::Aries, moon: Sign::Leo, rising: Sign::Gemini };
    let candidate = SignTriad { sun: Sign::Leo, moon: Sign::Aries, rising: Sign::Cancer };

    let score = compatibility_score(&target, &candidate, &ScoreWeights::default());
    assert_eq!(score, 80);
    assert_eq!(tier_label(score), "Soulmates");
}

#[test]
fn test_selection_result_independent_of_offer_order() {
    let entries: Vec<(String, u8)> = (0..100)
        .map(|i| (format!("user{:03}@example.com", i), (i % 7 * 15) as u8))
        .collect();

    let mut forward = TopSelection::new(10);
    for (key, score) in &entries {
        forward.offer(RankedCandidate { user_key: key.clone(), score: *score });
    }

    let mut shuffled = TopSelection::new(10);
    // A fixed stride permutation stands in for arbitrary completion order
    for step in 0..entries.len() {
        let (key, score) = &entries[(step * 37) % entries.len()];
        shuffled.offer(RankedCandidate { user_key: key.clone(), score: *score });
    }

    assert_eq!(forward.into_ranked(), shuffled.into_ranked());
}

#[test]
fn test_selection_orders_descending_with_ascending_key_ties() {
    let mut selection = TopSelection::new(5);
    for (key, score) in [("d", 55), ("b", 80), ("a", 55), ("c", 80), ("e", 20)] {
        selection.offer(RankedCandidate { user_key: key.to_string(), score });
    }

    let ranked = selection.into_ranked();
    let view: Vec<(&str, u8)> = ranked.iter().map(|c| (c.user_key.as_str(), c.score)).collect();
    assert_eq!(view, vec![("b", 80), ("c", 80), ("a", 55), ("d", 55), ("e", 20)]);
}
