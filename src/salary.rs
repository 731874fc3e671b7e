use std::sync::LazyLock;

use regex::Regex;

/// Sentinel the scraped collector substitutes for a missing salary element.
pub const SALARY_NOT_LISTED: &str = "Salary not listed";

/// 8 hours a day, 260 working days a year.
const HOURS_PER_YEAR: f64 = 8.0 * 260.0;
const DAYS_PER_YEAR: f64 = 260.0;
const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;

/// One to three ASCII digits, optional comma-grouped thousands, optional fraction.
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?").expect("valid amount regex"));

/// Checked in order; the first qualifier found in the text wins.
const UNIT_FACTORS: [(&str, f64); 4] = [
    ("hour", HOURS_PER_YEAR),
    ("day", DAYS_PER_YEAR),
    ("week", WEEKS_PER_YEAR),
    ("month", MONTHS_PER_YEAR),
];

/// Parse a free-text compensation string into an annualized figure.
///
/// A single amount is taken as-is, two amounts are read as a range and
/// averaged. Anything else (no amount, three or more, the not-listed
/// sentinel, blank text) yields `None`. The result is then scaled by the
/// first matching time unit, or left alone when the text names none.
pub fn normalize(raw: Option<&str>) -> Option<f64> {
    let text = raw?;
    if text.trim().is_empty() || text.contains(SALARY_NOT_LISTED) {
        return None;
    }

    let amounts: Vec<f64> = AMOUNT_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().replace(',', "").parse::<f64>().ok())
        .collect();

    let base = match amounts.as_slice() {
        [single] => *single,
        [low, high] => low / 2.0 + high / 2.0,
        _ => return None,
    };

    let annual = base * unit_factor(text);
    annual.is_finite().then_some(annual)
}

fn unit_factor(text: &str) -> f64 {
    let lower = text.to_lowercase();
    UNIT_FACTORS
        .iter()
        .find(|(unit, _)| lower.contains(unit))
        .map(|(_, factor)| *factor)
        .unwrap_or(1.0)
}
