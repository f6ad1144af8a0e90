//! Tool Registry
//!
//! Named, described operations over the Steam client. Each tool takes JSON
//! arguments and produces a plain-text result.
//!
//! # Built-in Tools
//! - `get_player_summary` - Profile for any Steam ID format
//! - `get_my_profile` - Profile of the configured owner
//! - `resolve_vanity_url` - Vanity name to SteamID64
//! - `get_owned_games` - Game library with playtime
//! - `get_current_players` - Live player count for an app
//! - `get_app_details` - Store page details for an app
//! - `get_news_for_app` - Recent news articles for an app
//! - `get_cache_stats` - Response cache statistics
//! - `clear_cache` - Drop every cached response

mod handlers;

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::client::{Params, SteamClient};
use crate::error::{Result, SteamApiError};

pub use handlers::PRIVATE_PROFILE_NOTICE;

// == Tool Kind ==
/// Which handler a descriptor dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    PlayerSummary,
    MyProfile,
    ResolveVanityUrl,
    OwnedGames,
    CurrentPlayers,
    AppDetails,
    NewsForApp,
    CacheStats,
    ClearCache,
}

impl ToolKind {
    /// True for tools that read per-player data, where a 401/403 from Steam
    /// means the profile is private.
    pub fn reads_player_data(self) -> bool {
        matches!(
            self,
            ToolKind::PlayerSummary | ToolKind::MyProfile | ToolKind::OwnedGames
        )
    }
}

// == Parameter Schema ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolParam {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub description: String,
    pub required: bool,
}

impl ToolParam {
    pub fn required(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            description: description.to_string(),
            required: true,
        }
    }

    pub fn optional(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, param_type, description)
        }
    }
}

// == Tool Descriptor ==
/// Name, description, parameters, and handler of one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub params: Vec<ToolParam>,
    pub kind: ToolKind,
}

impl ToolDescriptor {
    pub fn new(name: &str, description: &str, kind: ToolKind) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            params: Vec::new(),
            kind,
        }
    }

    /// Appends a parameter.
    pub fn param(mut self, param: ToolParam) -> Self {
        self.params.push(param);
        self
    }
}

// == Tool Output ==
/// Text produced by a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub content: String,
    /// Set when the text describes a failed upstream call
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

// == Tool Registry ==
/// Lookup table from tool name to descriptor.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolDescriptor>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in tool.
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        register_builtin_tools(&mut registry);
        registry
    }

    /// Adds a tool, replacing any tool already registered under its name.
    pub fn register(&mut self, descriptor: ToolDescriptor) {
        if self.tools.contains_key(&descriptor.name) {
            warn!(tool = %descriptor.name, "replacing registered tool");
        }
        self.tools.insert(descriptor.name.clone(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    /// Every registered tool, sorted by name.
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        let mut tools: Vec<_> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    // == Call ==
    /// Runs the named tool.
    ///
    /// Unknown names and invalid arguments are errors. Upstream failures are
    /// returned as text with `is_error` set, except access denials on
    /// per-player data, which become a private-profile notice.
    pub async fn call(&self, client: &SteamClient, name: &str, args: &Params) -> Result<ToolOutput> {
        let descriptor = self
            .get(name)
            .ok_or_else(|| SteamApiError::UnknownTool(name.to_string()))?;

        for param in descriptor.params.iter().filter(|p| p.required) {
            if args.get(&param.name).map_or(true, |v| v.is_null()) {
                return Err(SteamApiError::Validation(format!(
                    "Missing required argument '{}' for tool '{}'",
                    param.name, name
                )));
            }
        }

        debug!(tool = name, "calling tool");

        match handlers::dispatch(descriptor.kind, client, args).await {
            Ok(content) => Ok(ToolOutput::text(content)),
            Err(e @ (SteamApiError::Validation(_) | SteamApiError::InvalidSteamId(_))) => Err(e),
            Err(e) if e.is_access_denied() && descriptor.kind.reads_player_data() => {
                Ok(ToolOutput::text(PRIVATE_PROFILE_NOTICE))
            }
            Err(e) => {
                warn!(tool = name, error = %e, "tool call failed");
                Ok(ToolOutput::error(format!("Error: {}", e)))
            }
        }
    }
}

// == Built-in Tools ==
/// Registers every built-in tool.
pub fn register_builtin_tools(registry: &mut ToolRegistry) {
    let steam_id = || {
        ToolParam::required(
            "steam_id",
            ParamType::String,
            "Steam ID in any format: SteamID64, STEAM_X:Y:Z, [U:1:X], profile URL, \
             vanity URL, or vanity name. Use 'me' for the configured owner.",
        )
    };
    let app_id = || ToolParam::required("app_id", ParamType::Integer, "Steam App ID, e.g. 440");

    registry.register(
        ToolDescriptor::new(
            "get_player_summary",
            "Get a Steam player's profile: display name, visibility, online status, \
             and public details.",
            ToolKind::PlayerSummary,
        )
        .param(steam_id()),
    );

    registry.register(ToolDescriptor::new(
        "get_my_profile",
        "Get the profile of the Steam account configured as owner (STEAM_USER_ID).",
        ToolKind::MyProfile,
    ));

    registry.register(
        ToolDescriptor::new(
            "resolve_vanity_url",
            "Convert a vanity URL or custom profile name to a SteamID64.",
            ToolKind::ResolveVanityUrl,
        )
        .param(ToolParam::required(
            "vanity_name",
            ParamType::String,
            "Vanity name, e.g. 'gabelogannewell' from steamcommunity.com/id/gabelogannewell",
        )),
    );

    registry.register(
        ToolDescriptor::new(
            "get_owned_games",
            "List the games a player owns, sorted by total playtime.",
            ToolKind::OwnedGames,
        )
        .param(steam_id())
        .param(ToolParam::optional(
            "limit",
            ParamType::Integer,
            "Maximum games to list (default 25, 0 = all)",
        )),
    );

    registry.register(
        ToolDescriptor::new(
            "get_current_players",
            "Get the number of players currently in a game.",
            ToolKind::CurrentPlayers,
        )
        .param(app_id()),
    );

    registry.register(
        ToolDescriptor::new(
            "get_app_details",
            "Get store details for a game: price, developers, platforms, genres.",
            ToolKind::AppDetails,
        )
        .param(app_id())
        .param(ToolParam::optional(
            "country_code",
            ParamType::String,
            "Two-letter country code for regional pricing (default 'us')",
        )),
    );

    registry.register(
        ToolDescriptor::new(
            "get_news_for_app",
            "Get the latest news articles for a game.",
            ToolKind::NewsForApp,
        )
        .param(app_id())
        .param(ToolParam::optional(
            "count",
            ParamType::Integer,
            "Number of articles, 1 to 20 (default 5)",
        )),
    );

    registry.register(ToolDescriptor::new(
        "get_cache_stats",
        "Show response cache size, hits, misses, and hit rate.",
        ToolKind::CacheStats,
    ));

    registry.register(ToolDescriptor::new(
        "clear_cache",
        "Remove every cached Steam API response.",
        ToolKind::ClearCache,
    ));
}
