//! Cache TTL Policy
//!
//! Static mapping from Steam endpoint/method names to cache categories.

use std::time::Duration;

use serde::Serialize;

// == Cache Category ==
/// How volatile an endpoint's data is, and therefore how long to cache it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheCategory {
    /// Store app details, rarely changes
    AppDetails,
    /// Global achievement percentages
    GlobalAchievements,
    /// Game schemas and app lists
    GameSchema,
    /// Player profile summaries
    PlayerSummary,
    /// Per-player libraries, stats, and levels
    PlayerGames,
    /// Live player counters
    CurrentPlayers,
    /// News feeds
    News,
    /// Anything not listed
    Default,
}

impl CacheCategory {
    /// TTL in seconds for this category.
    pub const fn ttl_secs(self) -> u64 {
        match self {
            CacheCategory::AppDetails
            | CacheCategory::GlobalAchievements
            | CacheCategory::GameSchema => 3600,
            CacheCategory::PlayerSummary | CacheCategory::PlayerGames => 300,
            CacheCategory::CurrentPlayers => 60,
            CacheCategory::News => 300,
            CacheCategory::Default => 300,
        }
    }

    /// TTL for this category.
    pub const fn ttl(self) -> Duration {
        Duration::from_secs(self.ttl_secs())
    }

    /// Looks up the category for an endpoint or method name.
    pub fn for_endpoint(name: &str) -> Self {
        ENDPOINT_CATEGORIES
            .iter()
            .find(|(endpoint, _)| *endpoint == name)
            .map(|(_, category)| *category)
            .unwrap_or(CacheCategory::Default)
    }
}

/// Endpoint names with a non-default cache category.
///
/// Web API entries are keyed by method name, Store API entries by path.
pub const ENDPOINT_CATEGORIES: &[(&str, CacheCategory)] = &[
    ("appdetails", CacheCategory::AppDetails),
    ("GetAppList", CacheCategory::GameSchema),
    ("GetSchemaForGame", CacheCategory::GameSchema),
    ("GetGlobalAchievementPercentagesForApp", CacheCategory::GlobalAchievements),
    ("GetPlayerSummaries", CacheCategory::PlayerSummary),
    ("ResolveVanityURL", CacheCategory::PlayerSummary),
    ("GetOwnedGames", CacheCategory::PlayerGames),
    ("GetRecentlyPlayedGames", CacheCategory::PlayerGames),
    ("GetSteamLevel", CacheCategory::PlayerGames),
    ("GetPlayerAchievements", CacheCategory::PlayerGames),
    ("GetUserStatsForGame", CacheCategory::PlayerGames),
    ("GetFriendList", CacheCategory::PlayerGames),
    ("GetNumberOfCurrentPlayers", CacheCategory::CurrentPlayers),
    ("GetNewsForApp", CacheCategory::News),
];

/// Resolves the cache TTL for an endpoint or method name.
pub fn ttl_for(name: &str) -> Duration {
    CacheCategory::for_endpoint(name).ttl()
}
