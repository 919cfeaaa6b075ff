//! Display strings for Morningstar rating codes.

const STAR: char = '★';

/// Morningstar ratings top out at five stars.
const MAX_STARS: i64 = 5;

/// Render a star rating as that many star glyphs, e.g. `4` → `"★★★★"`.
///
/// Absent, zero and negative ratings render as an empty string. Ratings above
/// five are capped at five stars.
pub fn star_string(rating: Option<i64>) -> String {
    match rating {
        Some(n) if n > 0 => std::iter::repeat(STAR).take(n.min(MAX_STARS) as usize).collect(),
        _ => String::new(),
    }
}

/// Human readable label for a Morningstar risk code (1 = Low .. 5 = High).
pub fn risk_label(code: Option<i64>) -> &'static str {
    match code {
        Some(1) => "Low",
        Some(2) => "Below Avg",
        Some(3) => "Avg",
        Some(4) => "Above Avg",
        Some(5) => "High",
        _ => "",
    }
}
