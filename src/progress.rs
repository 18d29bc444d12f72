use std::time::{Duration, Instant};

use indicatif::{HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Terminal feedback for one render: a spinner naming the current stage.
pub struct Progress {
    enabled: bool,
    start: Instant,
    stage: ProgressBar,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        let start = Instant::now();
        if !enabled {
            return Self {
                enabled: false,
                start,
                stage: ProgressBar::hidden(),
            };
        }

        let stage = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}  [{elapsed_precise}]") {
            stage.set_style(style);
        }
        stage.enable_steady_tick(Duration::from_millis(80));
        stage.set_message("starting");

        Self {
            enabled: true,
            start,
            stage,
        }
    }

    pub fn set_stage(&self, msg: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.stage.set_message(msg.into());
    }

    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        self.stage.finish_with_message(format!(
            "done in {}",
            HumanDuration(self.start.elapsed())
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_progress_ignores_stages() {
        let p = Progress::new(false);
        p.set_stage("scoring");
        assert_eq!(p.stage.message(), "");
        p.finish();
        assert!(!p.stage.is_finished());
    }

    #[test]
    fn enabled_progress_tracks_stage_and_finishes() {
        let p = Progress::new(true);
        assert_eq!(p.stage.message(), "starting");
        p.set_stage("rendering html");
        assert_eq!(p.stage.message(), "rendering html");
        p.finish();
        assert!(p.stage.is_finished());
        assert!(p.stage.message().starts_with("done in "));
    }
}
