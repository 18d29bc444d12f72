use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use crate::error::DashboardError;
use crate::rng::TrendRng;

pub const TOPIC_COUNT_RANGE: RangeInclusive<usize> = 8..=15;
pub const POSTS_PER_TOPIC_RANGE: RangeInclusive<usize> = 2..=6;
pub const TOKEN_RANGE: RangeInclusive<u64> = 0..=999_999;

/// Seed controlling every random draw of one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RefreshToken(pub u64);

impl RefreshToken {
    pub fn issue(rng: &mut impl Rng) -> Self {
        Self(rng.gen_range(TOKEN_RANGE))
    }
}

/// Per-session render parameters. Each session owns its token; nothing here is global.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: RefreshToken,
    pub n_topics: usize,
    pub posts_per_topic: usize,
    pub generated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        token: RefreshToken,
        n_topics: usize,
        posts_per_topic: usize,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, DashboardError> {
        validate_bounds(n_topics, posts_per_topic)?;
        Ok(Self {
            token,
            n_topics,
            posts_per_topic,
            generated_at,
        })
    }

    /// Replace the token, as the dashboard's refresh action does.
    pub fn refresh(&mut self, rng: &mut impl Rng, now: DateTime<Utc>) {
        self.token = RefreshToken::issue(rng);
        self.generated_at = now;
    }

    /// Fresh generator for one render cycle.
    pub fn rng(&self) -> TrendRng {
        TrendRng::from_token(self.token.0)
    }
}

pub fn validate_bounds(n_topics: usize, posts_per_topic: usize) -> Result<(), DashboardError> {
    if !TOPIC_COUNT_RANGE.contains(&n_topics) {
        return Err(DashboardError::InvalidConfiguration(format!(
            "n_topics must be within {}..={}, got {n_topics}",
            TOPIC_COUNT_RANGE.start(),
            TOPIC_COUNT_RANGE.end()
        )));
    }
    if !POSTS_PER_TOPIC_RANGE.contains(&posts_per_topic) {
        return Err(DashboardError::InvalidConfiguration(format!(
            "posts_per_topic must be within {}..={}, got {posts_per_topic}",
            POSTS_PER_TOPIC_RANGE.start(),
            POSTS_PER_TOPIC_RANGE.end()
        )));
    }
    Ok(())
}
