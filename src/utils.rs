use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    let mut bytes = [0u8; 64];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Short,
    Medium,
    Long,
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TimeRange::Short => "short_term",
            TimeRange::Medium => "medium_term",
            TimeRange::Long => "long_term",
        };
        write!(f, "{}", s)
    }
}

pub fn parse_time_range(s: &str) -> Result<TimeRange, String> {
    match s {
        "short" | "short_term" => Ok(TimeRange::Short),
        "medium" | "medium_term" => Ok(TimeRange::Medium),
        "long" | "long_term" => Ok(TimeRange::Long),
        other => Err(format!(
            "unknown time range: {other} (expected short, medium, or long)"
        )),
    }
}

// First ten characters of an ISO 8601 timestamp, i.e. the calendar date.
pub fn date_prefix(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

pub fn format_seconds_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

pub fn format_duration_long(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) as f64 / 1000.0;
    format!("{} minutes and {:06.3} seconds", minutes, seconds)
}

// Renders a two-decimal score the way the reports expect: trailing zeros
// trimmed but always at least one fractional digit ("93.0", "76.25").
pub fn format_score(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0');
    match trimmed.strip_suffix('.') {
        Some(whole) => format!("{whole}.0"),
        None => trimmed.to_string(),
    }
}
