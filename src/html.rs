use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::builtin;
use crate::dashboard::Dashboard;
use crate::detail::{TopicDetail, TrendSeries};
use crate::generator::Post;
use crate::scoring::{HeadlineCard, TopicScore};

const TITLE: &str = "Social Media Trend Explainer";
const CHART_WIDTH: f64 = 360.0;
const CHART_HEIGHT: f64 = 120.0;
const CHART_PAD: f64 = 8.0;

pub fn build_html(dashboard: &Dashboard, css: &str, css_link_href: Option<&str>) -> String {
    let token = dashboard.session.token.0;

    let markup: Markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";
                title { (TITLE) }
                @if let Some(href) = css_link_href {
                    link rel="stylesheet" href=(href);
                } @else {
                    style { (PreEscaped(css)) }
                }
            }
            body class="tx" {
                header class="tx-topbar" {
                    div class="tx-container tx-topbar-inner" {
                        div {
                            h1 { (TITLE) }
                            div class="tx-caption" { "Mock live data, generated at " (fmt_time(&dashboard.session.generated_at)) }
                        }
                        button type="button" id="tx-theme-toggle" class="tx-btn" { "Theme" }
                    }
                }
                main class="tx-container tx-main" {
                    @if dashboard.is_empty() {
                        p class="tx-empty" { "No topics to show for this refresh." }
                    } @else {
                        section id="headlines" {
                            h2 { "Top Trending Topics" }
                            div class="tx-cards" {
                                @for card in &dashboard.headlines {
                                    (render_card(card))
                                }
                            }
                        }
                        section id="ranking" {
                            h2 { "Ranking" }
                            (render_ranking(&dashboard.ranking))
                        }
                        section id="posts" {
                            h2 { "All Trending Topics (Mock Live)" }
                            (render_posts_table(&dashboard.posts, true))
                        }
                        @if let Some(detail) = &dashboard.detail {
                            section id="detail" {
                                h2 { "Topic Explanation" }
                                (render_detail(detail))
                            }
                        }
                    }
                }
                footer class="tx-footer" {
                    div class="tx-container" {
                        "Refresh token " code { (token) }
                        " | topics " (dashboard.session.n_topics)
                        " | posts per topic " (dashboard.session.posts_per_topic)
                        " | fingerprint " code { (dashboard.fingerprint) }
                    }
                }
                script { (PreEscaped(builtin::THEME_TOGGLE_JS)) }
            }
        }
    };
    markup.into_string()
}

fn render_card(card: &HeadlineCard) -> Markup {
    html! {
        div class="tx-card" {
            div class="tx-card-label" { (card.topic) }
            div class="tx-card-value" { (fmt_thousands(card.total_engagement)) " engagements" }
            div class="tx-card-delta" { "+" (card.delta_pct) "% vs last hr" }
        }
    }
}

fn render_ranking(ranking: &[TopicScore]) -> Markup {
    html! {
        table class="tx-table tx-ranking" {
            thead {
                tr { th { "#" } th { "Topic" } th { "Score" } th { "Engagement" } th { "Recent" } th { "Posts" } }
            }
            tbody {
                @for (i, s) in ranking.iter().enumerate() {
                    tr data-topic=(s.topic) {
                        td class="num" { (i + 1) }
                        td { (s.topic) }
                        td class="num" { (format!("{:.3}", s.score)) }
                        td class="num" { (fmt_thousands(s.total_engagement)) }
                        td class="num" { (s.recent_count) }
                        td class="num" { (s.post_count) }
                    }
                }
            }
        }
    }
}

fn render_posts_table(posts: &[Post], with_topic: bool) -> Markup {
    html! {
        table class="tx-table" {
            thead {
                tr {
                    th { "Platform" }
                    @if with_topic { th { "Topic" } }
                    th { "Likes" } th { "Reposts" } th { "Comments" } th { "Engagement" }
                    th { "Summary" } th { "Time" }
                }
            }
            tbody {
                @for p in posts {
                    tr {
                        td { (p.platform.label()) }
                        @if with_topic { td { (p.topic) } }
                        td class="num" { (p.likes) }
                        td class="num" { (p.reposts) }
                        td class="num" { (p.comments) }
                        td class="num" { (p.engagement) }
                        td { (p.summary) }
                        td { time datetime=(p.timestamp.to_rfc3339()) { (fmt_time(&p.timestamp)) } }
                    }
                }
            }
        }
    }
}

fn render_detail(detail: &TopicDetail) -> Markup {
    html! {
        div class="tx-detail" data-topic=(detail.topic) {
            div {
                h3 { (detail.topic) }
                p { strong { "What it is: " } (detail.summary) }
                p { strong { "Why it matters: " } "Rising engagement and cross-platform spread indicate momentum." }
                p { strong { "Context: " } "Activity clustered in the last few hours with multiple high-impact posts." }
                p class="tx-confidence" {
                    strong { "Confidence (proxy): " }
                    code { (format!("{:.2}", detail.confidence)) }
                }
                p class="tx-caption" { "Heuristic over median engagement, not a calibrated probability." }
                p { strong { "Trend growth (last 12 hours)" } }
                (render_chart(&detail.series))
            }
            div {
                p { strong { "Top Posts" } }
                (render_posts_table(&detail.top_posts, false))
            }
        }
    }
}

fn render_chart(series: &TrendSeries) -> Markup {
    let points = chart_points(series);
    let first = series.points.first().map(|p| fmt_hour(&p.at)).unwrap_or_default();
    let last = series.points.last().map(|p| fmt_hour(&p.at)).unwrap_or_default();
    html! {
        svg class="tx-chart" viewBox=(format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}")) role="img" aria-label="Trend growth" {
            polyline points=(points) {}
        }
        div class="tx-caption" { (first) " to " (last) ", peak " (fmt_thousands(series.max_value())) }
    }
}

/// SVG polyline coordinates scaled from zero to the series peak.
fn chart_points(series: &TrendSeries) -> String {
    let n = series.points.len();
    if n == 0 {
        return String::new();
    }
    let peak = series.max_value().max(1) as f64;
    let step = if n > 1 {
        (CHART_WIDTH - 2.0 * CHART_PAD) / (n - 1) as f64
    } else {
        0.0
    };
    let usable = CHART_HEIGHT - 2.0 * CHART_PAD;
    series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = CHART_PAD + step * i as f64;
            let y = CHART_HEIGHT - CHART_PAD - usable * (p.engagement as f64 / peak);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn fmt_time(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

fn fmt_hour(t: &DateTime<Utc>) -> String {
    t.format("%H:%M").to_string()
}

fn fmt_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
