use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use kuchiki::traits::TendrilSink as _;
use tempfile::tempdir;
use trend_explainer::{CliArgs, DashboardError, Mode, ProgressMode};

fn clock() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-01-30T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn args(mode: Mode, out: PathBuf) -> CliArgs {
    CliArgs {
        seed: Some(42),
        n_topics: 10,
        posts_per_topic: 3,
        topic: None,
        now: Some(clock()),
        mode,
        out: Some(out),
        assets_dir_name: "assets".to_string(),
        json: None,
        progress: ProgressMode::Never,
    }
}

fn read_to_string(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&read_to_string(path)).unwrap()
}

fn assert_no_remote_autoload(html: &str) {
    for pat in [
        "src=\"http://",
        "src=\"https://",
        "src=\"//",
        "href=\"http",
        "<iframe",
    ] {
        assert!(
            !html.contains(pat),
            "unexpected remote autoload pattern {pat} in html"
        );
    }
}

#[test]
fn renders_dir_and_single() {
    let tmp = tempdir().unwrap();

    // dir mode
    let out_dir = tmp.path().join("out");
    trend_explainer::run(args(Mode::Dir, out_dir.clone())).unwrap();

    let html_path = out_dir.join("dashboard-42.html");
    let css_path = out_dir.join("assets/css/site.css");
    assert!(html_path.exists());
    assert!(css_path.exists());

    let html = read_to_string(&html_path);
    assert_no_remote_autoload(&html);
    assert!(html.contains("href=\"assets/css/site.css\""));
    assert!(read_to_string(&css_path).contains(".tx-card"));

    let doc = kuchiki::parse_html().one(html.as_str());
    assert_eq!(doc.select("table.tx-ranking tbody tr").unwrap().count(), 10);
    assert_eq!(doc.select(".tx-card").unwrap().count(), 3);
    assert_eq!(doc.select(".tx-detail").unwrap().count(), 1);
    assert_eq!(doc.select(".tx-chart polyline").unwrap().count(), 1);

    // single mode
    let out_single = tmp.path().join("single/dashboard.html");
    trend_explainer::run(args(Mode::Single, out_single.clone())).unwrap();

    let single = read_to_string(&out_single);
    assert_no_remote_autoload(&single);
    assert!(single.contains("<style>"));
    assert!(single.contains(".tx-card"));
    assert!(single.contains("tx-theme-toggle"));
}

#[test]
fn same_seed_renders_identical_html() {
    let tmp = tempdir().unwrap();
    let a = tmp.path().join("a.html");
    let b = tmp.path().join("b.html");
    trend_explainer::run(args(Mode::Single, a.clone())).unwrap();
    trend_explainer::run(args(Mode::Single, b.clone())).unwrap();
    assert_eq!(read_to_string(&a), read_to_string(&b));

    let c = tmp.path().join("c.html");
    let mut other = args(Mode::Single, c.clone());
    other.seed = Some(43);
    trend_explainer::run(other).unwrap();
    assert_ne!(read_to_string(&a), read_to_string(&c));
}

#[test]
fn json_export_holds_invariants() {
    let tmp = tempdir().unwrap();
    let json_path = tmp.path().join("dashboard.json");
    let mut a = args(Mode::Single, tmp.path().join("d.html"));
    a.json = Some(json_path.clone());
    trend_explainer::run(a).unwrap();

    let v = read_json(&json_path);
    assert_eq!(v["session"]["token"], 42);

    let posts = v["posts"].as_array().unwrap();
    for p in posts {
        let sum = p["likes"].as_u64().unwrap()
            + p["reposts"].as_u64().unwrap()
            + p["comments"].as_u64().unwrap();
        assert_eq!(p["engagement"].as_u64().unwrap(), sum);
    }

    let ranking = v["ranking"].as_array().unwrap();
    assert_eq!(ranking.len(), 10);
    let scores: Vec<f64> = ranking.iter().map(|s| s["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));

    let detail = &v["detail"];
    assert_eq!(detail["topic"], ranking[0]["topic"]);
    let conf = detail["confidence"].as_f64().unwrap();
    assert!((0.0..=0.98).contains(&conf));
    let series = detail["series"]["points"].as_array().unwrap();
    assert_eq!(series.len(), 12);
    assert_eq!(
        series.last().unwrap()["at"].as_str().unwrap(),
        "2026-01-30T12:00:00Z"
    );
}

#[test]
fn stale_topic_falls_back_to_leader() {
    let tmp = tempdir().unwrap();
    let json_path = tmp.path().join("dashboard.json");
    let mut a = args(Mode::Single, tmp.path().join("d.html"));
    a.topic = Some("Topic From An Old Refresh".to_string());
    a.json = Some(json_path.clone());
    trend_explainer::run(a).unwrap();

    let v = read_json(&json_path);
    assert_eq!(v["detail"]["topic"], v["ranking"][0]["topic"]);
}

#[test]
fn too_many_topics_fails_without_output() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("out");
    let mut a = args(Mode::Dir, out.clone());
    a.n_topics = 20;

    let err = trend_explainer::run(a).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DashboardError>(),
        Some(DashboardError::InvalidConfiguration(_))
    ));
    assert!(!out.exists());
}
