//! Per-topic detail: confidence proxy, synthetic growth curve and top posts.
//!
//! The confidence value is a bounded heuristic over median engagement. It is
//! monotonic in the median and capped at 0.98, but it is not a calibrated
//! probability and should not be presented or tested as one.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::DashboardError;
use crate::generator::{Post, PostCollection};
use crate::rng::TrendRng;
use crate::scoring::TopicScore;

pub const CONFIDENCE_CAP: f64 = 0.98;
pub const SERIES_POINTS: usize = 12;
const SERIES_BASE_FLOOR: u64 = 50;
const SERIES_NOISE_RATIO: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub at: DateTime<Utc>,
    pub engagement: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn max_value(&self) -> u64 {
        self.points.iter().map(|p| p.engagement).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicDetail {
    pub topic: String,
    pub summary: String,
    pub confidence: f64,
    pub series: TrendSeries,
    pub top_posts: Vec<Post>,
}

/// Median engagement, truncated to an integer. Zero for no posts.
pub fn median_engagement(posts: &[&Post]) -> u64 {
    let mut values: Vec<u64> = posts.iter().map(|p| p.engagement).collect();
    if values.is_empty() {
        return 0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        // Mean of the middle pair, truncated.
        (values[mid - 1] + values[mid]) / 2
    }
}

pub fn confidence_proxy(posts: &[&Post]) -> f64 {
    let median = median_engagement(posts) as f64;
    let raw = 0.5 + (median + 1.0).log10() / 3.0;
    let rounded = (raw * 100.0).round() / 100.0;
    rounded.min(CONFIDENCE_CAP)
}

/// Twelve hourly points ending at `now`, built as a noisy running sum above a floor.
pub fn growth_series(total_engagement: u64, now: DateTime<Utc>, rng: &mut TrendRng) -> TrendSeries {
    let base = (total_engagement / 20).max(SERIES_BASE_FLOOR);
    let std_dev = base as f64 * SERIES_NOISE_RATIO;

    let mut running: u64 = 0;
    let points = (0..SERIES_POINTS)
        .map(|i| {
            let noise = rng.normal(0.0, std_dev).abs().trunc() as u64;
            running += noise;
            let hours_back = (SERIES_POINTS - 1 - i) as i64;
            TrendPoint {
                at: now - Duration::hours(hours_back),
                engagement: running + base,
            }
        })
        .collect();

    TrendSeries { points }
}

/// Posts ordered by engagement, then recency, both descending.
pub fn top_posts(posts: &[&Post]) -> Vec<Post> {
    let mut sorted: Vec<Post> = posts.iter().map(|p| (*p).clone()).collect();
    sorted.sort_by(|a, b| {
        b.engagement
            .cmp(&a.engagement)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });
    sorted
}

pub fn select_topic<'a>(
    ranking: &'a [TopicScore],
    requested: &str,
) -> Result<&'a TopicScore, DashboardError> {
    ranking
        .iter()
        .find(|s| s.topic == requested)
        .ok_or_else(|| DashboardError::EmptySelection {
            topic: requested.to_string(),
        })
}

/// Resolve the detail topic, falling back to the leader for stale or missing selections.
pub fn resolve_selection<'a>(
    ranking: &'a [TopicScore],
    requested: Option<&str>,
) -> Option<&'a TopicScore> {
    match requested {
        Some(topic) => match select_topic(ranking, topic) {
            Ok(score) => Some(score),
            Err(err) => {
                let fallback = ranking.first();
                tracing::warn!(
                    %err,
                    fallback = fallback.map(|s| s.topic.as_str()).unwrap_or("<none>"),
                    "falling back to top ranked topic"
                );
                fallback
            }
        },
        None => ranking.first(),
    }
}

pub fn synthesize_detail(
    topic: &str,
    collection: &PostCollection,
    catalog: &Catalog,
    now: DateTime<Utc>,
    rng: &mut TrendRng,
) -> TopicDetail {
    let posts: Vec<&Post> = collection.posts_for(topic).collect();
    let total: u64 = posts.iter().map(|p| p.engagement).sum();
    TopicDetail {
        topic: topic.to_string(),
        summary: catalog.detail_summary_for(topic).to_string(),
        confidence: confidence_proxy(&posts),
        series: growth_series(total, now, rng),
        top_posts: top_posts(&posts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DEFAULT_DETAIL_SUMMARY, Platform};

    fn clock() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-30T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn post(engagement: u64, minutes_ago: i64) -> Post {
        Post {
            platform: Platform::TikTok,
            topic: "t".to_string(),
            likes: engagement,
            reposts: 0,
            comments: 0,
            engagement,
            summary: String::new(),
            timestamp: clock() - Duration::minutes(minutes_ago),
        }
    }

    fn score(topic: &str) -> TopicScore {
        TopicScore {
            topic: topic.to_string(),
            score: 1.0,
            total_engagement: 1,
            recent_count: 1,
            post_count: 1,
        }
    }

    #[test]
    fn zero_engagement_gives_half_confidence() {
        let p = post(0, 5);
        assert_eq!(median_engagement(&[&p]), 0);
        assert_eq!(confidence_proxy(&[&p]), 0.5);
    }

    #[test]
    fn empty_subset_defaults_to_zero_median() {
        assert_eq!(median_engagement(&[]), 0);
        assert_eq!(confidence_proxy(&[]), 0.5);
    }

    #[test]
    fn median_truncates_even_counts() {
        let (a, b) = (post(100, 0), post(101, 0));
        assert_eq!(median_engagement(&[&a, &b]), 100);
        let c = post(7, 0);
        assert_eq!(median_engagement(&[&c, &a, &b]), 100);
    }

    #[test]
    fn confidence_is_rounded_and_capped() {
        // log10(1000)/3 = 1 -> 1.5, capped.
        let p = post(999, 0);
        assert_eq!(confidence_proxy(&[&p]), CONFIDENCE_CAP);
        // log10(10)/3 = 0.333.. -> 0.83
        let q = post(9, 0);
        assert_eq!(confidence_proxy(&[&q]), 0.83);
        for e in [0, 1, 10, 75, 500, 3_000, 1_000_000] {
            let p = post(e, 0);
            let c = confidence_proxy(&[&p]);
            assert!((0.0..=CONFIDENCE_CAP).contains(&c), "{e} -> {c}");
        }
    }

    #[test]
    fn growth_series_shape() {
        let mut rng = TrendRng::from_token(42);
        let series = growth_series(4_000, clock(), &mut rng);
        assert_eq!(series.points.len(), SERIES_POINTS);
        assert_eq!(series.points.last().unwrap().at, clock());
        for pair in series.points.windows(2) {
            assert_eq!(pair[1].at - pair[0].at, Duration::hours(1));
            assert!(pair[1].engagement >= pair[0].engagement);
        }
        // base = 4000 / 20 = 200
        assert!(series.points.iter().all(|p| p.engagement >= 200));
    }

    #[test]
    fn growth_series_floor_for_small_totals() {
        let mut rng = TrendRng::from_token(1);
        let series = growth_series(0, clock(), &mut rng);
        assert!(series.points.iter().all(|p| p.engagement >= SERIES_BASE_FLOOR));
    }

    #[test]
    fn top_posts_order_by_engagement_then_recency() {
        let older = post(500, 120);
        let newer = post(500, 10);
        let big = post(900, 300);
        let sorted = top_posts(&[&older, &big, &newer]);
        assert_eq!(sorted[0], big);
        assert_eq!(sorted[1], newer);
        assert_eq!(sorted[2], older);
    }

    #[test]
    fn stale_selection_is_reported_then_recovered() {
        let ranking = vec![score("lead"), score("second")];
        assert_eq!(
            select_topic(&ranking, "gone"),
            Err(DashboardError::EmptySelection {
                topic: "gone".to_string()
            })
        );
        assert_eq!(resolve_selection(&ranking, Some("gone")).unwrap().topic, "lead");
        assert_eq!(
            resolve_selection(&ranking, Some("second")).unwrap().topic,
            "second"
        );
        assert_eq!(resolve_selection(&ranking, None).unwrap().topic, "lead");
        assert!(resolve_selection(&[], Some("x")).is_none());
    }

    #[test]
    fn unknown_topic_detail_uses_panel_default() {
        let collection = PostCollection {
            topics: vec!["t".to_string()],
            posts: vec![post(120, 10), post(80, 40)],
        };
        let mut rng = TrendRng::from_token(3);
        let detail = synthesize_detail("t", &collection, &Catalog::builtin(), clock(), &mut rng);
        assert_eq!(detail.summary, DEFAULT_DETAIL_SUMMARY);
        assert_eq!(detail.top_posts.len(), 2);
        assert_eq!(detail.top_posts[0].engagement, 120);
    }
}
