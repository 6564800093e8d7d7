//! Text forms of coordinates and distances.
//!
//! Numbers keep one decimal when integral (`30.0`) and otherwise use the
//! shortest form that reads back to the same value (`0.1`). NaN and
//! infinities have no text form and yield `None`.

use crate::options::GeoUnit;

/// Format a coordinate or distance magnitude.
pub fn format_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        None
    } else if value.fract() == 0.0 {
        Some(format!("{:.1}", value))
    } else {
        Some(format!("{}", value))
    }
}

/// Format a `lat, lon` pair.
pub fn format_point(lat: f64, lon: f64) -> Option<String> {
    Some(format!("{}, {}", format_number(lat)?, format_number(lon)?))
}

/// Format a distance such as `1.0km`.
pub fn format_distance(value: f64, unit: GeoUnit) -> Option<String> {
    Some(format!("{}{}", format_number(value)?, unit.as_str()))
}

/// Read a `lat, lon` pair back.
pub fn parse_point(text: &str) -> Option<(f64, f64)> {
    let (lat, lon) = text.split_once(',')?;
    Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}

/// Read a distance such as `1.0km` back.
pub fn parse_distance(text: &str) -> Option<(f64, GeoUnit)> {
    let text = text.trim();
    let number = text.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let unit = text[number.len()..].parse().ok()?;
    Some((number.trim().parse().ok()?, unit))
}
