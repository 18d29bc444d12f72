//! Synthetic post generation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Platform};
use crate::error::DashboardError;
use crate::rng::TrendRng;
use crate::session::validate_bounds;

const AGE_MINUTES: (u64, u64) = (2, 360);
const LIKES: (u64, u64) = (60, 1200);
const REPOSTS: (u64, u64) = (10, 400);
const COMMENTS: (u64, u64) = (5, 200);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub platform: Platform,
    pub topic: String,
    pub likes: u64,
    pub reposts: u64,
    pub comments: u64,
    pub engagement: u64,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

/// Everything generated for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCollection {
    /// Topics in sampling order.
    pub topics: Vec<String>,
    pub posts: Vec<Post>,
}

impl PostCollection {
    pub fn posts_for<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a Post> + 'a {
        self.posts.iter().filter(move |p| p.topic == topic)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GenerateParams {
    pub n_topics: usize,
    pub posts_per_topic: usize,
    pub now: DateTime<Utc>,
}

pub fn generate_posts(
    params: &GenerateParams,
    catalog: &Catalog,
    platforms: &[Platform],
    rng: &mut TrendRng,
) -> Result<PostCollection, DashboardError> {
    validate_bounds(params.n_topics, params.posts_per_topic)?;
    if platforms.is_empty() {
        return Err(DashboardError::InvalidConfiguration(
            "platform set is empty".to_string(),
        ));
    }

    let picked = rng
        .sample_indices(catalog.entries().len(), params.n_topics)
        .ok_or_else(|| {
            DashboardError::InvalidConfiguration(format!(
                "requested {} topics but the catalog only has {}",
                params.n_topics,
                catalog.entries().len()
            ))
        })?;

    let topics: Vec<String> = picked
        .into_iter()
        .map(|i| catalog.entries()[i].name.clone())
        .collect();

    let per_topic = params.posts_per_topic as u64;
    let k_lo = per_topic.saturating_sub(1).max(2);
    let k_hi = per_topic + 1;

    let mut posts = Vec::new();
    for topic in &topics {
        let k = rng.int_inclusive(k_lo, k_hi);
        for _ in 0..k {
            let age = rng.int_inclusive(AGE_MINUTES.0, AGE_MINUTES.1);
            let likes = rng.int_inclusive(LIKES.0, LIKES.1);
            let reposts = rng.int_inclusive(REPOSTS.0, REPOSTS.1);
            let comments = rng.int_inclusive(COMMENTS.0, COMMENTS.1);
            let platform = rng.choose(platforms).copied().unwrap_or(Platform::Twitter);
            posts.push(Post {
                platform,
                topic: topic.clone(),
                likes,
                reposts,
                comments,
                engagement: likes + reposts + comments,
                summary: catalog.summary_for(topic).to_string(),
                timestamp: params.now - Duration::minutes(age as i64),
            });
        }
        tracing::debug!(topic = %topic, posts = k, "generated posts");
    }

    Ok(PostCollection { topics, posts })
}
