use serde::Serialize;

use crate::catalog::{Catalog, Platform};
use crate::detail::{self, TopicDetail};
use crate::error::DashboardError;
use crate::generator::{self, GenerateParams, Post, PostCollection};
use crate::scoring::{self, HEADLINE_COUNT, HeadlineCard, TopicScore};
use crate::session::Session;

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub session: Session,
    pub fingerprint: String,
    pub topics: Vec<String>,
    /// All posts, highest engagement first.
    pub posts: Vec<Post>,
    pub ranking: Vec<TopicScore>,
    pub headlines: Vec<HeadlineCard>,
    pub detail: Option<TopicDetail>,
}

impl Dashboard {
    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }
}

pub fn build_dashboard(
    session: &Session,
    catalog: &Catalog,
    requested_topic: Option<&str>,
) -> Result<Dashboard, DashboardError> {
    let mut rng = session.rng();

    let params = GenerateParams {
        n_topics: session.n_topics,
        posts_per_topic: session.posts_per_topic,
        now: session.generated_at,
    };
    let collection = generator::generate_posts(&params, catalog, &Platform::ALL, &mut rng)?;
    let ranking = scoring::score_topics(&collection.posts);
    let headlines = scoring::headline_cards(&ranking, HEADLINE_COUNT, &mut rng);

    let detail = detail::resolve_selection(&ranking, requested_topic).map(|selected| {
        detail::synthesize_detail(
            &selected.topic,
            &collection,
            catalog,
            session.generated_at,
            &mut rng,
        )
    });

    let fingerprint = fingerprint(&collection, &ranking);
    tracing::info!(
        token = session.token.0,
        topics = collection.topics.len(),
        posts = collection.posts.len(),
        %fingerprint,
        "dashboard built"
    );

    let PostCollection { topics, mut posts } = collection;
    // Stable, so equal engagement keeps generation order.
    posts.sort_by(|a, b| b.engagement.cmp(&a.engagement));

    Ok(Dashboard {
        session: session.clone(),
        fingerprint,
        topics,
        posts,
        ranking,
        headlines,
        detail,
    })
}

/// blake3 over the generated posts and the resulting ranking.
pub fn fingerprint(collection: &PostCollection, ranking: &[TopicScore]) -> String {
    let mut hasher = blake3::Hasher::new();
    for post in &collection.posts {
        hasher.update(post.topic.as_bytes());
        hasher.update(post.platform.label().as_bytes());
        for n in [post.likes, post.reposts, post.comments, post.engagement] {
            hasher.update(&n.to_le_bytes());
        }
        hasher.update(&post.timestamp.timestamp().to_le_bytes());
    }
    for s in ranking {
        hasher.update(s.topic.as_bytes());
        hasher.update(&s.score.to_bits().to_le_bytes());
    }
    let hex = hasher.finalize().to_hex();
    hex.as_str()[..16].to_string()
}
