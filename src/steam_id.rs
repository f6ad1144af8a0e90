//! Steam ID Normalization
//!
//! Converts the ID formats users paste (SteamID64, legacy `STEAM_X:Y:Z`,
//! SteamID3, profile and vanity URLs, bare vanity names) into SteamID64.
//!
//! Plain numbers are never interpreted as SteamID32; they are treated as
//! vanity names, since small numbers are usually app IDs pasted by mistake.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::client::SteamClient;
use crate::error::{Result, SteamApiError};

/// SteamID64 of account 0 (individual account, public universe).
pub const STEAMID64_BASE: u64 = 76_561_197_960_265_728;

static STEAMID64_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^7656119\d{10}$").expect("valid regex"));
static LEGACY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^STEAM_([0-5]):([01]):(\d+)$").expect("valid regex"));
static STEAMID3_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[U:1:(\d+)\]$").expect("valid regex"));
static VANITY_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?steamcommunity\.com/id/([^/]+)/?").expect("valid regex")
});
static PROFILE_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?steamcommunity\.com/profiles/(7656119\d{10})/?")
        .expect("valid regex")
});
static VANITY_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid regex"));

/// Converts an account number (SteamID32) to SteamID64.
pub fn steamid32_to_64(steamid32: u64) -> String {
    (STEAMID64_BASE + steamid32).to_string()
}

/// Parses `STEAM_X:Y:Z` into SteamID64 (`account = Z * 2 + Y`).
fn legacy_to_64(steam_id: &str) -> Result<String> {
    let caps = LEGACY_PATTERN
        .captures(steam_id)
        .ok_or_else(|| SteamApiError::InvalidSteamId(format!("Invalid STEAM_X:Y:Z format: {}", steam_id)))?;

    let y: u64 = caps[2].parse().map_err(|_| invalid(steam_id))?;
    let z: u64 = caps[3].parse().map_err(|_| invalid(steam_id))?;
    let account = z
        .checked_mul(2)
        .and_then(|v| v.checked_add(y))
        .ok_or_else(|| invalid(steam_id))?;
    checked_steamid64(account, steam_id)
}

/// Parses `[U:1:N]` into SteamID64.
fn steamid3_to_64(steam_id: &str) -> Result<String> {
    let caps = STEAMID3_PATTERN
        .captures(steam_id)
        .ok_or_else(|| SteamApiError::InvalidSteamId(format!("Invalid [U:1:X] format: {}", steam_id)))?;

    let account: u64 = caps[1].parse().map_err(|_| invalid(steam_id))?;
    checked_steamid64(account, steam_id)
}

fn checked_steamid64(account: u64, original: &str) -> Result<String> {
    STEAMID64_BASE
        .checked_add(account)
        .map(|id| id.to_string())
        .ok_or_else(|| invalid(original))
}

fn invalid(steam_id: &str) -> SteamApiError {
    SteamApiError::InvalidSteamId(format!(
        "Unable to parse Steam ID: '{}'. Accepted formats: SteamID64, STEAM_X:Y:Z, \
         [U:1:X], vanity URL, or profile URL.",
        steam_id
    ))
}

/// Parses any locally-resolvable format to SteamID64.
///
/// Returns `Ok(None)` when the input looks like a vanity name or vanity URL
/// and needs an API lookup, and an error when it matches no format.
pub fn parse_steam_id(steam_id: &str) -> Result<Option<String>> {
    let steam_id = steam_id.trim();

    if STEAMID64_PATTERN.is_match(steam_id) {
        return Ok(Some(steam_id.to_string()));
    }
    if let Some(caps) = PROFILE_URL_PATTERN.captures(steam_id) {
        return Ok(Some(caps[1].to_string()));
    }
    if LEGACY_PATTERN.is_match(steam_id) {
        return legacy_to_64(steam_id).map(Some);
    }
    if STEAMID3_PATTERN.is_match(steam_id) {
        return steamid3_to_64(steam_id).map(Some);
    }
    if VANITY_URL_PATTERN.is_match(steam_id) || VANITY_NAME_PATTERN.is_match(steam_id) {
        return Ok(None);
    }

    Err(invalid(steam_id))
}

/// Extracts the vanity name from a vanity URL or bare name.
pub fn extract_vanity_name(steam_id: &str) -> Option<String> {
    let steam_id = steam_id.trim();

    if let Some(caps) = VANITY_URL_PATTERN.captures(steam_id) {
        return Some(caps[1].to_string());
    }

    let numeric_format = STEAMID64_PATTERN.is_match(steam_id)
        || PROFILE_URL_PATTERN.is_match(steam_id)
        || LEGACY_PATTERN.is_match(steam_id)
        || STEAMID3_PATTERN.is_match(steam_id);

    if !numeric_format && VANITY_NAME_PATTERN.is_match(steam_id) {
        Some(steam_id.to_string())
    } else {
        None
    }
}

/// Normalizes any supported format to SteamID64, resolving vanity names
/// through the client.
pub async fn normalize_steam_id(steam_id: &str, client: &SteamClient) -> Result<String> {
    if let Some(id) = parse_steam_id(steam_id)? {
        return Ok(id);
    }

    let vanity_name = extract_vanity_name(steam_id).ok_or_else(|| {
        SteamApiError::InvalidSteamId(format!("Unable to normalize Steam ID: '{}'", steam_id))
    })?;

    client
        .resolve_vanity_url(&vanity_name)
        .await
        .ok_or_else(|| {
            SteamApiError::InvalidSteamId(format!(
                "Could not resolve vanity URL: '{}'",
                vanity_name
            ))
        })
}
