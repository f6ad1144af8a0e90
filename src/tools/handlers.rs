//! Tool Handlers
//!
//! Argument parsing, Steam calls, and plain-text formatting for each
//! built-in tool.

use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use crate::client::{params_from, CachePolicy, Params, SteamClient};
use crate::error::{Result, SteamApiError};
use crate::steam_id::normalize_steam_id;
use crate::tools::ToolKind;

/// Shown when Steam denies access to per-player data.
pub const PRIVATE_PROFILE_NOTICE: &str = "This profile is private or its game details are \
     hidden, so Steam did not return the requested data.";

const DEFAULT_GAMES_LIMIT: i64 = 25;
const DEFAULT_NEWS_COUNT: i64 = 5;
const MAX_NEWS_COUNT: i64 = 20;
const NEWS_EXCERPT_CHARS: usize = 300;
const MAX_FEATURES_SHOWN: usize = 5;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

// == Dispatch ==
pub(super) async fn dispatch(kind: ToolKind, client: &SteamClient, args: &Params) -> Result<String> {
    match kind {
        ToolKind::PlayerSummary => player_summary(client, args).await,
        ToolKind::MyProfile => my_profile(client).await,
        ToolKind::ResolveVanityUrl => resolve_vanity_url(client, args).await,
        ToolKind::OwnedGames => owned_games(client, args).await,
        ToolKind::CurrentPlayers => current_players(client, args).await,
        ToolKind::AppDetails => app_details(client, args).await,
        ToolKind::NewsForApp => news_for_app(client, args).await,
        ToolKind::CacheStats => Ok(cache_stats(client).await),
        ToolKind::ClearCache => Ok(format!(
            "Cleared {} cached entries.",
            client.clear_cache().await
        )),
    }
}

// == Arguments ==
fn string_arg(args: &Params, name: &str) -> Result<Option<String>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(SteamApiError::Validation(format!(
            "Argument '{}' must be a string, got {}",
            name, other
        ))),
    }
}

fn int_arg(args: &Params, name: &str) -> Result<Option<i64>> {
    let invalid = |value: &Value| {
        SteamApiError::Validation(format!(
            "Argument '{}' must be an integer, got {}",
            name, value
        ))
    };

    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| invalid(value)),
        Some(value @ Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid(value)),
        Some(other) => Err(invalid(other)),
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| SteamApiError::Validation(format!("Missing required argument '{}'", name)))
}

fn app_id_arg(args: &Params) -> Result<i64> {
    let app_id = required(int_arg(args, "app_id")?, "app_id")?;
    if app_id <= 0 {
        return Err(SteamApiError::Validation(format!(
            "App ID must be positive, got {}",
            app_id
        )));
    }
    Ok(app_id)
}

/// Resolves a `steam_id` argument, accepting `me`/`my` for the owner.
async fn resolve_player(client: &SteamClient, steam_id: &str) -> Result<String> {
    let lowered = steam_id.to_lowercase();
    if matches!(lowered.as_str(), "me" | "my" | "myself" | "mine") {
        return owner_id(client);
    }
    normalize_steam_id(steam_id, client).await
}

fn owner_id(client: &SteamClient) -> Result<String> {
    client.owner_steam_id().map(str::to_string).ok_or_else(|| {
        SteamApiError::Validation(
            "No owner Steam ID configured. Set STEAM_USER_ID to your SteamID64.".to_string(),
        )
    })
}

// == Player Tools ==
async fn player_summary(client: &SteamClient, args: &Params) -> Result<String> {
    let raw_id = required(string_arg(args, "steam_id")?, "steam_id")?;
    let steam_id = resolve_player(client, &raw_id).await?;

    let players = client.get_player_summaries(&[steam_id]).await?;
    Ok(match players.first() {
        Some(player) => format_player_summary(player),
        None => format!("Player not found for Steam ID: {}", raw_id),
    })
}

async fn my_profile(client: &SteamClient) -> Result<String> {
    let steam_id = owner_id(client)?;

    let players = client.get_player_summaries(&[steam_id.clone()]).await?;
    Ok(match players.first() {
        Some(player) => format!("Owner profile\n{}", format_player_summary(player)),
        None => format!(
            "Owner Steam ID: {}\n(Could not fetch profile details, the ID may be invalid)",
            steam_id
        ),
    })
}

async fn resolve_vanity_url(client: &SteamClient, args: &Params) -> Result<String> {
    let raw = required(string_arg(args, "vanity_name")?, "vanity_name")?;
    let vanity_name = raw
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();

    Ok(match client.resolve_vanity_url(&vanity_name).await {
        Some(steam_id) => format!(
            "Vanity URL '{}' resolved to:\n  SteamID64: {}\n  Profile URL: https://steamcommunity.com/profiles/{}",
            vanity_name, steam_id, steam_id
        ),
        None => format!("Could not resolve vanity URL: '{}'", vanity_name),
    })
}

async fn owned_games(client: &SteamClient, args: &Params) -> Result<String> {
    let raw_id = required(string_arg(args, "steam_id")?, "steam_id")?;
    let limit = int_arg(args, "limit")?.unwrap_or(DEFAULT_GAMES_LIMIT);
    if limit < 0 {
        return Err(SteamApiError::Validation(format!(
            "limit must be zero or positive, got {}",
            limit
        )));
    }
    let steam_id = resolve_player(client, &raw_id).await?;

    let params = params_from(json!({
        "steamid": steam_id,
        "include_appinfo": true,
        "include_played_free_games": true,
    }));
    let result = client
        .get("IPlayerService", "GetOwnedGames", 1, &params, CachePolicy::Use)
        .await?;

    Ok(format_owned_games(&steam_id, &result["response"], limit as usize))
}

// == App Tools ==
async fn current_players(client: &SteamClient, args: &Params) -> Result<String> {
    let app_id = app_id_arg(args)?;

    let params = params_from(json!({ "appid": app_id }));
    let result = client
        .get(
            "ISteamUserStats",
            "GetNumberOfCurrentPlayers",
            1,
            &params,
            CachePolicy::Use,
        )
        .await?;

    let response = &result["response"];
    Ok(match response["player_count"].as_u64() {
        Some(count) if response["result"].as_i64() == Some(1) => {
            format!("App ID {}: {} players currently in game", app_id, count)
        }
        _ => format!("No player count available for App ID {}.", app_id),
    })
}

async fn app_details(client: &SteamClient, args: &Params) -> Result<String> {
    let app_id = app_id_arg(args)?;
    let country_code = string_arg(args, "country_code")?
        .filter(|cc| !cc.is_empty())
        .unwrap_or_else(|| "us".to_string())
        .to_lowercase();

    let params = params_from(json!({
        "appids": app_id.to_string(),
        "cc": country_code,
        "l": "english",
    }));
    let result = client
        .get_store_api("appdetails", &params, CachePolicy::Use)
        .await?;

    Ok(format_app_details(app_id, &country_code, &result))
}

async fn news_for_app(client: &SteamClient, args: &Params) -> Result<String> {
    let app_id = app_id_arg(args)?;
    let count = int_arg(args, "count")?
        .unwrap_or(DEFAULT_NEWS_COUNT)
        .clamp(1, MAX_NEWS_COUNT);

    let params = params_from(json!({
        "appid": app_id,
        "count": count,
        "maxlength": NEWS_EXCERPT_CHARS,
    }));
    let result = client
        .get("ISteamNews", "GetNewsForApp", 2, &params, CachePolicy::Use)
        .await?;

    let items = result["appnews"]["newsitems"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default();
    Ok(format_news(app_id, items))
}

// == Cache Tools ==
async fn cache_stats(client: &SteamClient) -> String {
    match client.cache_stats().await {
        Some(stats) => format!(
            "Response cache\n  Entries: {}\n  Hits: {}\n  Misses: {}\n  Hit rate: {:.1}%",
            stats.size, stats.hits, stats.misses, stats.hit_rate
        ),
        None => "Response caching is disabled.".to_string(),
    }
}

// == Formatting ==
pub(crate) fn format_player_summary(player: &Value) -> String {
    let visibility_state = player["communityvisibilitystate"].as_i64().unwrap_or(1);
    let visibility = match visibility_state {
        1 => "Private",
        2 => "Friends Only",
        3 => "Public",
        _ => "Unknown",
    };
    let status = match player["personastate"].as_i64().unwrap_or(0) {
        0 => "Offline",
        1 => "Online",
        2 => "Busy",
        3 => "Away",
        4 => "Snooze",
        5 => "Looking to trade",
        6 => "Looking to play",
        _ => "Unknown",
    };

    let mut lines = vec![
        format!("Player: {}", str_or(&player["personaname"], "Unknown")),
        format!("  SteamID64: {}", str_or(&player["steamid"], "Unknown")),
        format!("  Profile URL: {}", str_or(&player["profileurl"], "")),
        format!("  Visibility: {}", visibility),
        format!("  Status: {}", status),
    ];

    // Only public profiles expose the remaining fields
    if visibility_state == 3 {
        if let Some(name) = non_empty(&player["realname"]) {
            lines.push(format!("  Real Name: {}", name));
        }
        if let Some(country) = non_empty(&player["loccountrycode"]) {
            lines.push(format!("  Country: {}", country));
        }
        if let Some(game) = non_empty(&player["gameextrainfo"]) {
            lines.push(format!(
                "  Currently Playing: {} (App ID: {})",
                game,
                str_or(&player["gameid"], "?")
            ));
        }
        if let Some(created) = player["timecreated"]
            .as_i64()
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
        {
            lines.push(format!("  Account Created: {}", created.format("%Y-%m-%d")));
        }
    }

    lines.join("\n")
}

pub(crate) fn format_owned_games(steam_id: &str, response: &Value, limit: usize) -> String {
    let mut games = response["games"].as_array().cloned().unwrap_or_default();
    if games.is_empty() {
        return format!(
            "No games found for Steam ID {}.\nThe profile may be private or own no games.",
            steam_id
        );
    }

    games.sort_by_key(|g| std::cmp::Reverse(g["playtime_forever"].as_u64().unwrap_or(0)));

    let game_count = response["game_count"].as_u64().unwrap_or(games.len() as u64);
    let total_minutes: u64 = games
        .iter()
        .map(|g| g["playtime_forever"].as_u64().unwrap_or(0))
        .sum();
    let shown = if limit == 0 { games.len() } else { limit.min(games.len()) };

    let mut lines = vec![
        format!("Game Library for {}", steam_id),
        format!("Total Games: {}", game_count),
        format!("Total Playtime: {:.1} hours", total_minutes as f64 / 60.0),
        String::new(),
    ];
    if shown < games.len() {
        lines.push(format!("Top {} games by playtime:", shown));
    } else {
        lines.push("All games by playtime:".to_string());
    }

    for game in &games[..shown] {
        let appid = &game["appid"];
        let name = non_empty(&game["name"])
            .map(str::to_string)
            .unwrap_or_else(|| format!("App {}", appid));
        let mut line = format!(
            "  [{}] {}: {}",
            appid,
            name,
            format_playtime(game["playtime_forever"].as_u64().unwrap_or(0))
        );
        let recent = game["playtime_2weeks"].as_u64().unwrap_or(0);
        if recent > 0 {
            line.push_str(&format!(" (recent: {})", format_playtime(recent)));
        }
        lines.push(line);
    }

    if shown < games.len() {
        lines.push(format!("  ... and {} more games", games.len() - shown));
    }

    lines.join("\n")
}

fn format_playtime(minutes: u64) -> String {
    match minutes {
        0 => "Never played".to_string(),
        1..=59 => format!("{}m", minutes),
        _ => format!("{:.1}h", minutes as f64 / 60.0),
    }
}

pub(crate) fn format_app_details(app_id: i64, country_code: &str, result: &Value) -> String {
    let app = &result[app_id.to_string()];
    if app["success"].as_bool() != Some(true) {
        return format!(
            "App ID {} not found or unavailable in region '{}'.",
            app_id, country_code
        );
    }

    let data = &app["data"];
    if !data.is_object() {
        return format!("No data available for App ID {}.", app_id);
    }

    let release_date = if data["release_date"]["coming_soon"].as_bool() == Some(true) {
        "Coming Soon"
    } else {
        str_or(&data["release_date"]["date"], "Unknown")
    };

    let price = if data["is_free"].as_bool() == Some(true) {
        "Free to Play".to_string()
    } else if let Some(overview) = data["price_overview"].as_object() {
        let final_price = overview
            .get("final_formatted")
            .and_then(Value::as_str)
            .unwrap_or("Unknown");
        match overview.get("discount_percent").and_then(Value::as_u64) {
            Some(discount) if discount > 0 => format!(
                "{} ({}% off, was {})",
                final_price,
                discount,
                overview
                    .get("initial_formatted")
                    .and_then(Value::as_str)
                    .unwrap_or("")
            ),
            _ => final_price.to_string(),
        }
    } else {
        "Price not available".to_string()
    };

    let platforms: Vec<&str> = [("windows", "Windows"), ("mac", "macOS"), ("linux", "Linux")]
        .into_iter()
        .filter(|(key, _)| data["platforms"][*key].as_bool() == Some(true))
        .map(|(_, label)| label)
        .collect();

    let genres = descriptions(&data["genres"]);
    let features = descriptions(&data["categories"]);

    let mut lines = vec![
        str_or(&data["name"], "Unknown").to_string(),
        format!(
            "App ID: {} | Type: {}",
            app_id,
            capitalize(str_or(&data["type"], "unknown"))
        ),
        format!("Developer: {}", join_or(&data["developers"], "Unknown")),
        format!("Publisher: {}", join_or(&data["publishers"], "Unknown")),
        format!("Release Date: {}", release_date),
        format!("Price: {}", price),
        format!("Platforms: {}", list_or(&platforms, "Unknown")),
        format!("Genres: {}", list_or(&genres, "Unknown")),
    ];

    if let Some(score) = data["metacritic"]["score"].as_u64() {
        lines.push(format!("Metacritic: {}", score));
    }

    if !features.is_empty() {
        let shown = features.len().min(MAX_FEATURES_SHOWN);
        lines.push(format!("Features: {}", features[..shown].join(", ")));
        if features.len() > shown {
            lines.push(format!("  ... and {} more features", features.len() - shown));
        }
    }

    if let Some(description) = non_empty(&data["short_description"]) {
        lines.push(String::new());
        lines.push(format!("Description: {}", description));
    }

    lines.push(String::new());
    lines.push(format!("Store: https://store.steampowered.com/app/{}", app_id));

    lines.join("\n")
}

pub(crate) fn format_news(app_id: i64, items: &[Value]) -> String {
    if items.is_empty() {
        return format!("No news found for App ID {}.", app_id);
    }

    let mut lines = vec![
        format!("News for App ID {}", app_id),
        format!("Showing {} article(s)", items.len()),
        String::new(),
    ];

    for item in items {
        let date = item["date"]
            .as_i64()
            .filter(|ts| *ts > 0)
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "Unknown date".to_string());

        lines.push(str_or(&item["title"], "Untitled").to_string());
        lines.push(format!(
            "   By: {} | {}",
            str_or(&item["author"], "Unknown"),
            date
        ));
        if let Some(feed) = non_empty(&item["feedlabel"]) {
            lines.push(format!("   Source: {}", feed));
        }

        let excerpt = truncate_words(&clean_html(str_or(&item["contents"], "")), NEWS_EXCERPT_CHARS);
        if !excerpt.is_empty() {
            lines.push(format!("   {}", excerpt));
        }
        if let Some(url) = non_empty(&item["url"]) {
            let external = if item["is_external_url"].as_bool() == Some(true) {
                " [External]"
            } else {
                ""
            };
            lines.push(format!("   Link: {}{}", url, external));
        }
        lines.push(String::new());
    }

    lines.join("\n").trim_end().to_string()
}

/// Strips tags, decodes common entities, and collapses whitespace.
pub(crate) fn clean_html(text: &str) -> String {
    let stripped = HTML_TAG.replace_all(text, " ");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

/// Cuts `text` to at most `max_chars`, backing off to a word boundary.
fn truncate_words(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let head = &text[..cut];
            let head = head.rsplit_once(' ').map_or(head, |(before, _)| before);
            format!("{}...", head)
        }
    }
}

// == Value Helpers ==
fn str_or<'a>(value: &'a Value, default: &'a str) -> &'a str {
    value.as_str().unwrap_or(default)
}

fn non_empty(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn descriptions(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| non_empty(&item["description"]))
                .collect()
        })
        .unwrap_or_default()
}

fn join_or(value: &Value, default: &str) -> String {
    let names: Vec<&str> = value
        .as_array()
        .map(|items| items.iter().filter_map(non_empty).collect())
        .unwrap_or_default();
    list_or(&names, default)
}

fn list_or(items: &[&str], default: &str) -> String {
    if items.is_empty() {
        default.to_string()
    } else {
        items.join(", ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_arg_accepts_numbers() {
        let args = params_from(json!({"steam_id": 76561197960287930u64, "bad": [1]}));
        assert_eq!(
            string_arg(&args, "steam_id").unwrap(),
            Some("76561197960287930".to_string())
        );
        assert_eq!(string_arg(&args, "missing").unwrap(), None);
        assert!(string_arg(&args, "bad").is_err());
    }

    #[test]
    fn test_int_arg_parsing() {
        let args = params_from(json!({"a": 440, "b": " 570 ", "c": "abc", "d": 1.5}));
        assert_eq!(int_arg(&args, "a").unwrap(), Some(440));
        assert_eq!(int_arg(&args, "b").unwrap(), Some(570));
        assert!(int_arg(&args, "c").is_err());
        assert!(int_arg(&args, "d").is_err());
        assert_eq!(int_arg(&args, "e").unwrap(), None);
    }

    #[test]
    fn test_app_id_must_be_positive() {
        assert!(app_id_arg(&params_from(json!({"app_id": 0}))).is_err());
        assert_eq!(app_id_arg(&params_from(json!({"app_id": 440}))).unwrap(), 440);
    }

    #[test]
    fn test_format_public_player() {
        let player = json!({
            "steamid": "76561197960287930",
            "personaname": "Rabscuttle",
            "profileurl": "https://steamcommunity.com/id/gabelogannewell/",
            "communityvisibilitystate": 3,
            "personastate": 1,
            "realname": "Gabe Newell",
            "loccountrycode": "US",
            "gameextrainfo": "Half-Life",
            "gameid": "70",
            "timecreated": 1063407589
        });

        let text = format_player_summary(&player);
        assert!(text.starts_with("Player: Rabscuttle"));
        assert!(text.contains("Visibility: Public"));
        assert!(text.contains("Status: Online"));
        assert!(text.contains("Real Name: Gabe Newell"));
        assert!(text.contains("Currently Playing: Half-Life (App ID: 70)"));
        assert!(text.contains("Account Created: 2003-09-12"));
    }

    #[test]
    fn test_format_private_player_hides_details() {
        let player = json!({
            "steamid": "76561197960287930",
            "personaname": "Hidden",
            "communityvisibilitystate": 1,
            "realname": "Should Not Show"
        });

        let text = format_player_summary(&player);
        assert!(text.contains("Visibility: Private"));
        assert!(text.contains("Status: Offline"));
        assert!(!text.contains("Should Not Show"));
    }

    #[test]
    fn test_format_owned_games_sorted_and_limited() {
        let response = json!({
            "game_count": 3,
            "games": [
                {"appid": 10, "name": "Counter-Strike", "playtime_forever": 30},
                {"appid": 440, "name": "Team Fortress 2", "playtime_forever": 600, "playtime_2weeks": 45},
                {"appid": 570, "name": "Dota 2", "playtime_forever": 0}
            ]
        });

        let text = format_owned_games("76561197960287930", &response, 2);
        assert!(text.contains("Total Games: 3"));
        assert!(text.contains("Total Playtime: 10.5 hours"));
        assert!(text.contains("Top 2 games by playtime:"));

        let tf2 = text.find("Team Fortress 2").unwrap();
        let cs = text.find("Counter-Strike").unwrap();
        assert!(tf2 < cs);
        assert!(text.contains("[440] Team Fortress 2: 10.0h (recent: 45m)"));
        assert!(text.contains("[10] Counter-Strike: 30m"));
        assert!(!text.contains("Dota 2"));
        assert!(text.contains("... and 1 more games"));
    }

    #[test]
    fn test_format_owned_games_empty() {
        let text = format_owned_games("1", &json!({}), 25);
        assert!(text.starts_with("No games found"));
    }

    #[test]
    fn test_format_app_details() {
        let result = json!({
            "440": {
                "success": true,
                "data": {
                    "name": "Team Fortress 2",
                    "type": "game",
                    "is_free": true,
                    "developers": ["Valve"],
                    "publishers": ["Valve"],
                    "release_date": {"coming_soon": false, "date": "10 Oct, 2007"},
                    "platforms": {"windows": true, "mac": false, "linux": true},
                    "genres": [{"description": "Action"}, {"description": "Free to Play"}],
                    "categories": [{"description": "Multi-player"}],
                    "short_description": "Nine distinct classes."
                }
            }
        });

        let text = format_app_details(440, "us", &result);
        assert!(text.starts_with("Team Fortress 2\nApp ID: 440 | Type: Game"));
        assert!(text.contains("Price: Free to Play"));
        assert!(text.contains("Platforms: Windows, Linux"));
        assert!(text.contains("Genres: Action, Free to Play"));
        assert!(text.contains("Features: Multi-player"));
        assert!(text.ends_with("Store: https://store.steampowered.com/app/440"));
    }

    #[test]
    fn test_format_app_details_discount_and_missing() {
        let result = json!({
            "620": {
                "success": true,
                "data": {
                    "name": "Portal 2",
                    "type": "game",
                    "price_overview": {
                        "final_formatted": "$1.99",
                        "initial_formatted": "$9.99",
                        "discount_percent": 80
                    }
                }
            }
        });
        let text = format_app_details(620, "us", &result);
        assert!(text.contains("Price: $1.99 (80% off, was $9.99)"));

        let missing = format_app_details(1, "de", &json!({"1": {"success": false}}));
        assert_eq!(missing, "App ID 1 not found or unavailable in region 'de'.");
    }

    #[test]
    fn test_format_news() {
        let items = vec![json!({
            "title": "Patch Notes",
            "author": "Valve",
            "date": 1700000000,
            "feedlabel": "Community Announcements",
            "contents": "<p>Fixed&nbsp;a   crash &amp; more</p>",
            "url": "https://example.com/news",
            "is_external_url": true
        })];

        let text = format_news(440, &items);
        assert!(text.starts_with("News for App ID 440\nShowing 1 article(s)"));
        assert!(text.contains("By: Valve | 2023-11-14 22:13 UTC"));
        assert!(text.contains("Fixed a crash & more"));
        assert!(text.contains("Link: https://example.com/news [External]"));
        assert_eq!(format_news(440, &[]), "No news found for App ID 440.");
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("short", 10), "short");
        assert_eq!(truncate_words("one two three", 9), "one two...");
        assert_eq!(truncate_words("ééééé", 3), "ééé...");
    }

    #[test]
    fn test_playtime_formatting() {
        assert_eq!(format_playtime(0), "Never played");
        assert_eq!(format_playtime(45), "45m");
        assert_eq!(format_playtime(90), "1.5h");
    }
}
