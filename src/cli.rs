use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    Dir,
    Single,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgressMode {
    /// Enable progress UI when stderr is a TTY.
    Auto,
    /// Always enable progress UI (even when piped).
    Always,
    /// Never show progress UI.
    Never,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Refresh token seeding all generated data. A new one is issued when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of topics to sample (8-15).
    #[arg(long, default_value_t = 10)]
    pub n_topics: usize,

    /// Base post count per topic (2-6); each topic gets one fewer to one more.
    #[arg(long, default_value_t = 3)]
    pub posts_per_topic: usize,

    /// Topic shown in the detail panel. Falls back to the top ranked topic when absent
    /// from the current ranking.
    #[arg(long)]
    pub topic: Option<String>,

    /// Generation clock (RFC 3339). Defaults to the current time.
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Output mode: `dir` (HTML + assets/) or `single` (one self-contained HTML).
    #[arg(long, value_enum, default_value = "dir")]
    pub mode: Mode,

    /// Output path. For `dir` mode: a directory. For `single` mode: an HTML file path.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Assets directory name for `dir` mode.
    #[arg(long, default_value = "assets")]
    pub assets_dir_name: String,

    /// Also write the dashboard bundle as JSON to this path.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Progress display: `auto`, `always`, or `never`.
    #[arg(long, value_enum, default_value = "auto")]
    pub progress: ProgressMode,
}
