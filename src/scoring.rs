//! Trend scoring and ranking.
//!
//! Posts are grouped by topic in first-appearance order, three aggregates are
//! computed per group, and the weighted score orders the ranking. The sort is
//! stable, so equal scores keep the order in which topics were sampled.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::generator::Post;
use crate::rng::TrendRng;

const ENGAGEMENT_WEIGHT: f64 = 0.7;
const RECENCY_WEIGHT: f64 = 0.2;
const VOLUME_WEIGHT: f64 = 0.1;
const RECENT_WINDOW_HOURS: i64 = 6;

pub const HEADLINE_COUNT: usize = 3;
const HEADLINE_DELTA_PCT: (u64, u64) = (4, 18);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicScore {
    pub topic: String,
    pub score: f64,
    pub total_engagement: u64,
    pub recent_count: usize,
    pub post_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlineCard {
    pub topic: String,
    pub total_engagement: u64,
    /// Decoration only; not derived from any prior value.
    pub delta_pct: u64,
}

pub struct TopicGroup<'a> {
    pub topic: &'a str,
    pub posts: Vec<&'a Post>,
}

/// Group posts by topic, preserving the order topics first appear in.
pub fn group_by_topic(posts: &[Post]) -> Vec<TopicGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<TopicGroup<'_>> = Vec::new();
    for post in posts {
        let slot = *index.entry(post.topic.as_str()).or_insert_with(|| {
            groups.push(TopicGroup {
                topic: post.topic.as_str(),
                posts: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].posts.push(post);
    }
    groups
}

/// Latest post timestamp; the scoring clock.
pub fn reference_time(posts: &[Post]) -> Option<DateTime<Utc>> {
    posts.iter().map(|p| p.timestamp).max()
}

pub fn trend_score(total_engagement: u64, recent_count: usize, post_count: usize) -> f64 {
    ENGAGEMENT_WEIGHT * (total_engagement as f64).ln_1p()
        + RECENCY_WEIGHT * recent_count as f64
        + VOLUME_WEIGHT * post_count as f64
}

pub fn score_topics(posts: &[Post]) -> Vec<TopicScore> {
    let Some(now) = reference_time(posts) else {
        return Vec::new();
    };
    let cutoff = now - Duration::hours(RECENT_WINDOW_HOURS);

    let mut ranking: Vec<TopicScore> = group_by_topic(posts)
        .into_iter()
        .map(|group| {
            let post_count = group.posts.len();
            let recent_count = group.posts.iter().filter(|p| p.timestamp > cutoff).count();
            let total_engagement = group.posts.iter().map(|p| p.engagement).sum();
            TopicScore {
                topic: group.topic.to_string(),
                score: trend_score(total_engagement, recent_count, post_count),
                total_engagement,
                recent_count,
                post_count,
            }
        })
        .collect();

    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));

    for (rank, s) in ranking.iter().enumerate() {
        tracing::debug!(
            rank = rank + 1,
            topic = %s.topic,
            score = s.score,
            engagement = s.total_engagement,
            "ranked topic"
        );
    }
    ranking
}

pub fn headline_cards(ranking: &[TopicScore], k: usize, rng: &mut TrendRng) -> Vec<HeadlineCard> {
    ranking
        .iter()
        .take(k)
        .map(|s| HeadlineCard {
            topic: s.topic.clone(),
            total_engagement: s.total_engagement,
            delta_pct: rng.int_inclusive(HEADLINE_DELTA_PCT.0, HEADLINE_DELTA_PCT.1),
        })
        .collect()
}
