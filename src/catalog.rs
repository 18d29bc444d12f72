use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SUMMARY: &str = "Conversation gaining traction";
pub const DEFAULT_DETAIL_SUMMARY: &str = "Conversation gaining traction across platforms.";

const BUILTIN_TOPICS: &[(&str, &str)] = &[
    ("#HeatWave", "Record temperatures and grid strain warnings"),
    ("NPC Meme", "Creators reviving NPC-style streams and catchphrases"),
    ("Swift Tour", "Surprise acoustic set causing fan buzz"),
    ("AI Chip Shortage", "GPU backorders impacting labs and indie builders"),
    ("Transfer Deadline", "Last-minute negotiations pushing valuations"),
    ("#ClimateStrike", "Youth-led protests for climate action"),
    ("SpaceX Launch", "Successful deployment of new satellite batch"),
    ("Meme Coins", "Volatile price swings spark online jokes"),
    ("Met Gala", "Celebrity outfits dominating social feeds"),
    ("Game Update 2.0", "Major patch with new maps and weapons"),
    ("Open Source Drama", "Maintainers debating license changes"),
    ("HBM Prices", "Rumors of tight supply and price hikes"),
    ("Indie Film Drop", "Festival favorite finally hits OTT"),
    ("Esports Finals", "Underdog run triggers highlight reels"),
    ("AI Code Copilot", "Dev productivity debates after new release"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Twitter,
    Reddit,
    YouTube,
    TikTok,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Reddit,
        Platform::YouTube,
        Platform::TikTok,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::Reddit => "Reddit",
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub summary: String,
}

/// Fixed bank of topics the generator samples from.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_TOPICS.iter().copied())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(name, summary)| CatalogEntry {
                name: name.to_string(),
                summary: summary.to_string(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn lookup(&self, topic: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == topic)
            .map(|e| e.summary.as_str())
    }

    /// Summary attached to generated posts.
    pub fn summary_for(&self, topic: &str) -> &str {
        self.lookup(topic).unwrap_or(DEFAULT_SUMMARY)
    }

    /// Longer "what it is" text for the detail panel.
    pub fn detail_summary_for(&self, topic: &str) -> &str {
        self.lookup(topic).unwrap_or(DEFAULT_DETAIL_SUMMARY)
    }
}
