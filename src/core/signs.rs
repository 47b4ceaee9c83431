use crate::models::Sign;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Zodiac signs in ecliptic order, Aries first.
///
/// Longitude-to-sign mapping depends on this ordering: sign n covers
/// [n * 30, (n + 1) * 30) degrees.
pub const ZODIAC: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

/// Sun sign for a birth date, from the tropical zodiac boundary table.
///
/// Total over all valid calendar dates; `Unknown` is unreachable for any
/// date chrono can construct.
pub fn sun_sign(date: NaiveDate) -> Sign {
    let day = date.day();
    match date.month() {
        1 if day <= 19 => Sign::Capricorn,
        1 => Sign::Aquarius,
        2 if day <= 18 => Sign::Aquarius,
        2 => Sign::Pisces,
        3 if day <= 20 => Sign::Pisces,
        3 => Sign::Aries,
        4 if day <= 19 => Sign::Aries,
        4 => Sign::Taurus,
        5 if day <= 20 => Sign::Taurus,
        5 => Sign::Gemini,
        6 if day <= 20 => Sign::Gemini,
        6 => Sign::Cancer,
        7 if day <= 22 => Sign::Cancer,
        7 => Sign::Leo,
        8 if day <= 22 => Sign::Leo,
        8 => Sign::Virgo,
        9 if day <= 22 => Sign::Virgo,
        9 => Sign::Libra,
        10 if day <= 22 => Sign::Libra,
        10 => Sign::Scorpio,
        11 if day <= 21 => Sign::Scorpio,
        11 => Sign::Sagittarius,
        12 if day <= 21 => Sign::Sagittarius,
        12 => Sign::Capricorn,
        _ => Sign::Unknown,
    }
}

/// Map an ecliptic longitude (degrees) to its zodiac sign.
///
/// The longitude is normalized into [0, 360) first, so callers may pass
/// raw provider output. Non-finite input maps to `Unknown`.
pub fn sign_from_longitude(longitude: f64) -> Sign {
    if !longitude.is_finite() {
        return Sign::Unknown;
    }
    let normalized = longitude.rem_euclid(360.0);
    let segment = (normalized / 30.0).floor() as usize % 12;
    ZODIAC[segment]
}

/// Julian day for a Gregorian calendar date and civil time-of-day.
///
/// Standard astronomical conversion with a fractional day, matching the
/// `swe_julday(..., SE_GREG_CAL)` convention ephemeris providers expect.
pub fn julian_day(date: NaiveDate, time: NaiveTime) -> f64 {
    let mut year = date.year() as f64;
    let mut month = date.month() as f64;
    let fractional_hours = time.num_seconds_from_midnight() as f64 / 3600.0;
    let day = date.day() as f64 + fractional_hours / 24.0;

    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    let century = (year / 100.0).floor();
    let gregorian_correction = 2.0 - century + (century / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day
        + gregorian_correction
        - 1524.5
}
