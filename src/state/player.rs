//! Player records.
//!
//! A player is an immutable roster entry. Nothing in the selection state
//! mutates a player; captaincy and wicket-keeping are tracked by id on the
//! team, never as flags on the record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A player's primary discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    #[serde(rename = "All Rounder", alias = "AllRounder")]
    AllRounder,
}

impl PlayerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Batsman => "Batsman",
            Self::Bowler => "Bowler",
            Self::AllRounder => "All Rounder",
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bowling style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BowlingStyle {
    Fast,
    Spin,
    /// Does not bowl
    #[default]
    #[serde(rename = "none", alias = "None")]
    None,
}

impl BowlingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "Fast",
            Self::Spin => "Spin",
            Self::None => "none",
        }
    }
}

impl fmt::Display for BowlingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headline career stats. Either figure may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economy: Option<f64>,
}

/// A roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Stable identifier, unique within the roster
    pub id: String,

    /// Display name
    pub name: String,

    /// Country the player represents
    pub country: String,

    pub role: PlayerRole,

    #[serde(default)]
    pub bowling_style: BowlingStyle,

    #[serde(default)]
    pub stats: PlayerStats,

    /// Portrait URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Player {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
        role: PlayerRole,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            role,
            bowling_style: BowlingStyle::None,
            stats: PlayerStats::default(),
            image_url: None,
        }
    }

    pub fn with_bowling_style(mut self, style: BowlingStyle) -> Self {
        self.bowling_style = style;
        self
    }

    pub fn with_stats(mut self, strike_rate: Option<f64>, economy: Option<f64>) -> Self {
        self.stats = PlayerStats {
            strike_rate,
            economy,
        };
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.country, self.role)
    }
}
