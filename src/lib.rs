mod builtin;
pub mod catalog;
mod cli;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod generator;
mod html;
mod offline;
mod progress;
pub mod rng;
pub mod scoring;
pub mod session;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use catalog::Catalog;
use cli::Args;
use dashboard::Dashboard;
use session::{RefreshToken, Session};

pub use cli::ProgressMode;
pub use cli::{Args as CliArgs, Mode};
pub use error::DashboardError;

pub fn run(args: Args) -> anyhow::Result<()> {
    use std::io::IsTerminal as _;

    let progress_enabled = match args.progress {
        ProgressMode::Always => true,
        ProgressMode::Never => false,
        ProgressMode::Auto => std::io::stderr().is_terminal(),
    };
    let progress = progress::Progress::new(progress_enabled);

    let token = match args.seed {
        Some(seed) => RefreshToken(seed),
        None => {
            let token = RefreshToken::issue(&mut rand::thread_rng());
            tracing::info!(token = token.0, "issued refresh token");
            token
        }
    };
    let now = args.now.unwrap_or_else(chrono::Utc::now);
    let session = Session::new(token, args.n_topics, args.posts_per_topic, now)?;

    progress.set_stage("generating and scoring");
    let dashboard =
        dashboard::build_dashboard(&session, &Catalog::builtin(), args.topic.as_deref())?;

    let res = match args.mode {
        Mode::Dir => render_dir(&dashboard, &args, &progress),
        Mode::Single => render_single(&dashboard, &args, &progress),
    }
    .and_then(|()| match &args.json {
        Some(path) => {
            progress.set_stage("writing json");
            write_json(&dashboard, path)
        }
        None => Ok(()),
    });
    progress.finish();
    res
}

fn render_dir(
    dashboard: &Dashboard,
    args: &Args,
    progress: &progress::Progress,
) -> anyhow::Result<()> {
    let out_dir = args.out.clone().unwrap_or_else(|| PathBuf::from("out"));
    std::fs::create_dir_all(&out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    progress.set_stage("writing css");
    let css_rel = write_css_file(&out_dir, &args.assets_dir_name, builtin::BUILTIN_CSS)?;

    progress.set_stage("rendering html");
    let html = html::build_html(dashboard, "", Some(&css_rel));
    offline::assert_self_contained(&html, builtin::BUILTIN_CSS)?;

    let html_path = out_dir.join(default_file_name(dashboard));
    std::fs::write(&html_path, html).with_context(|| format!("write {}", html_path.display()))?;
    tracing::info!(path = %html_path.display(), "wrote dashboard");
    Ok(())
}

fn render_single(
    dashboard: &Dashboard,
    args: &Args,
    progress: &progress::Progress,
) -> anyhow::Result<()> {
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_file_name(dashboard)));

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }

    progress.set_stage("rendering html");
    let html = html::build_html(dashboard, builtin::BUILTIN_CSS, None);
    offline::assert_self_contained(&html, builtin::BUILTIN_CSS)?;

    std::fs::write(&out_path, html).with_context(|| format!("write {}", out_path.display()))?;
    tracing::info!(path = %out_path.display(), "wrote dashboard");
    Ok(())
}

fn default_file_name(dashboard: &Dashboard) -> String {
    format!("dashboard-{}.html", dashboard.session.token.0)
}

fn write_css_file(out_dir: &Path, assets_dir_name: &str, css: &str) -> anyhow::Result<String> {
    let rel = format!("{}/css/site.css", assets_dir_name);
    let abs = out_dir.join(&rel);
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(&abs, css).with_context(|| format!("write {}", abs.display()))?;
    Ok(rel)
}

fn write_json(dashboard: &Dashboard, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }
    let bytes = serde_json::to_vec_pretty(dashboard).context("serialize dashboard")?;
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote dashboard json");
    Ok(())
}
