use log::warn;
use regex::Regex;
use std::sync::LazyLock;

static ISO_DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[Pp](?:\d|[Tt])").unwrap());

static ISO_DAYS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)D").unwrap());
static ISO_HOURS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)H").unwrap());
static ISO_MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)M").unwrap());
static ISO_SECONDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)S").unwrap());

static TEXT_HOURS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:hours?|hrs?|h)\b").unwrap()
});

static TEXT_MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:minutes?|mins?|m)\b").unwrap()
});

static BARE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*$").unwrap());

/// Converts a duration to whole minutes.
///
/// ISO-8601 values (`PT1H30M`) have their `H` and `M` groups read
/// independently, so either may be absent; `D` and `S` groups are honored too.
/// Free text such as `"1 hr 30 min"` or `"45 minutes"` is also understood, and
/// a bare number is taken as minutes. Anything else, including `None`, is 0.
pub fn parse_time(duration: Option<&str>) -> u32 {
    let Some(duration) = duration.map(str::trim).filter(|d| !d.is_empty()) else {
        return 0;
    };

    if ISO_DURATION_RE.is_match(duration) {
        return parse_iso_duration(duration);
    }

    parse_text_duration(duration)
}

fn parse_iso_duration(duration: &str) -> u32 {
    let upper = duration.to_uppercase();
    let group = |re: &Regex| -> u64 {
        re.captures(&upper)
            .map(|caps| caps[1].parse::<u64>().unwrap_or(u64::MAX))
            .unwrap_or(0)
    };

    let seconds = ISO_SECONDS_RE
        .captures(&upper)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|s| (s / 60.0).round() as u64)
        .unwrap_or(0);

    clamp_minutes(
        group(&ISO_DAYS_RE)
            .saturating_mul(24 * 60)
            .saturating_add(group(&ISO_HOURS_RE).saturating_mul(60))
            .saturating_add(group(&ISO_MINUTES_RE))
            .saturating_add(seconds),
    )
}

fn parse_text_duration(text: &str) -> u32 {
    let hours = TEXT_HOURS_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|h| (h * 60.0).round() as u64);
    let minutes = TEXT_MINUTES_RE
        .captures(text)
        .map(|caps| caps[1].parse::<u64>().unwrap_or(u64::MAX));

    let total = match (hours, minutes) {
        (None, None) => BARE_NUMBER_RE
            .captures(text)
            .map(|caps| caps[1].parse::<u64>().unwrap_or(u64::MAX))
            .unwrap_or(0),
        (h, m) => h.unwrap_or(0).saturating_add(m.unwrap_or(0)),
    };
    clamp_minutes(total)
}

/// Absurd source values saturate instead of wrapping.
fn clamp_minutes(minutes: u64) -> u32 {
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// `total - prep - cook`, clamped at 0 when the source is inconsistent.
pub fn derive_additional_time(total: u32, prep: u32, cook: u32) -> u32 {
    let additional = i64::from(total) - i64::from(prep) - i64::from(cook);
    if additional < 0 {
        warn!(
            "Total time {} is shorter than prep {} + cook {}; additional time set to 0",
            total, prep, cook
        );
        return 0;
    }
    additional as u32
}
