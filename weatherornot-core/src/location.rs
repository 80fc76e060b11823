//! Classification of free-form location input.
//!
//! A single raw string like `"90210"`, `"Paris,FR"` or `"40.7,-74.0"` is
//! syntactically ambiguous between a postal code, a city and a coordinate
//! pair. [`classify`] resolves the ambiguity with a fixed, priority-ordered
//! rule chain; the ordering is load-bearing and must not be rearranged.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// `"40.7128,-74.0060"` or `"40.7128, -74.0060"`.
static COORDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d+\.?\d*)\s*,\s*(-?\d+\.?\d*)$").unwrap());

/// US ZIP: 5 digits, optionally in ZIP+4 form. Only the leading 5 are kept.
static US_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{5})(-\d{4})?$").unwrap());

/// Postal code followed by a 2-letter country code: `"10001,US"`,
/// `"SW1A 1AA,GB"`. Matched against an upper-cased copy of the input.
static ZIP_COUNTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z0-9]+(?:[\s-][A-Z0-9]+)?),\s*([A-Z]{2})$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("location input cannot be empty")]
    EmptyInput,
}

/// A classified, normalized location descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Latitude in [-90, 90], longitude in [-180, 180].
    Coordinates { latitude: f64, longitude: f64 },

    /// `code` keeps the caller's casing; `country_code` is a 2-letter
    /// upper-case ISO code, `"US"` when the input did not name one.
    PostalCode { code: String, country_code: String },

    /// `state` and `country` are present only when the input supplied them;
    /// `country` is upper-cased.
    CityName {
        city: String,
        state: Option<String>,
        country: Option<String>,
    },
}

/// Classify a raw location string.
///
/// Rules are tried in order; the first match wins:
///
/// 1. coordinate pair (both components within geographic range),
/// 2. bare 5-digit US ZIP (ZIP+4 accepted, suffix dropped),
/// 3. postal code + 2-letter country code (the code must contain a digit,
///    so `"Paris,FR"` is never mistaken for a postal code),
/// 4. city`[,state[,country]]` — the fallback, which always succeeds.
///
/// The only failure is an empty (post-trim) input. A numeric pair outside
/// coordinate range falls through the chain and lands in the city fallback,
/// so nonsense like `"100,200"` degrades to a city guess rather than a hard
/// error; whether such a location exists is the fetch layer's problem.
pub fn classify(input: &str) -> Result<LocationQuery, LocationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(LocationError::EmptyInput);
    }

    if let Some(query) = match_coordinates(input) {
        return Ok(query);
    }
    if let Some(query) = match_postal_code(input) {
        return Ok(query);
    }
    Ok(match_city(input))
}

fn match_coordinates(input: &str) -> Option<LocationQuery> {
    let caps = COORDS_RE.captures(input)?;

    let latitude: f64 = caps[1].parse().ok()?;
    let longitude: f64 = caps[2].parse().ok()?;

    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    // Out-of-range pairs fall through to the later rules.
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    Some(LocationQuery::Coordinates {
        latitude,
        longitude,
    })
}

fn match_postal_code(input: &str) -> Option<LocationQuery> {
    if let Some(caps) = US_ZIP_RE.captures(input) {
        return Some(LocationQuery::PostalCode {
            code: caps[1].to_string(),
            country_code: "US".to_string(),
        });
    }

    let upper = input.to_uppercase();
    let caps = ZIP_COUNTRY_RE.captures(&upper)?;

    // A code without a single digit is a city name, not a postal code.
    if !caps[1].bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    // The matched code part cannot itself contain a comma, so splitting the
    // original input at its comma recovers the code with its casing intact.
    let (code, _) = input.split_once(',')?;

    Some(LocationQuery::PostalCode {
        code: code.trim().to_string(),
        country_code: caps[2].to_string(),
    })
}

fn match_city(input: &str) -> LocationQuery {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();

    let non_empty = |s: &&str| -> Option<String> {
        if s.is_empty() { None } else { Some((*s).to_string()) }
    };

    match parts.as_slice() {
        [city] => LocationQuery::CityName {
            city: (*city).to_string(),
            state: None,
            country: None,
        },
        // A two-part input is always "City,State", never "City,Country" —
        // even when the second part looks like a country code. Downstream
        // call selection depends on this.
        [city, state] => LocationQuery::CityName {
            city: (*city).to_string(),
            state: non_empty(state),
            country: None,
        },
        [city, state, country] => LocationQuery::CityName {
            city: (*city).to_string(),
            state: non_empty(state),
            country: non_empty(country).map(|c| c.to_uppercase()),
        },
        // More than three parts: keep the first as the city, drop the rest.
        [city, ..] => LocationQuery::CityName {
            city: (*city).to_string(),
            state: None,
            country: None,
        },
        [] => unreachable!("split always yields at least one part"),
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Coordinates {
                latitude,
                longitude,
            } => {
                write!(f, "Coordinates: {latitude:.4}, {longitude:.4}")
            }
            LocationQuery::PostalCode { code, country_code } => {
                write!(f, "ZIP: {code}, {country_code}")
            }
            LocationQuery::CityName {
                city,
                state,
                country,
            } => {
                let mut parts = vec![city.as_str()];
                if let Some(state) = state {
                    parts.push(state);
                }
                if let Some(country) = country {
                    parts.push(country);
                }
                write!(f, "City: {}", parts.join(", "))
            }
        }
    }
}
