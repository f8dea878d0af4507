//! Stage progress display for a single pipeline run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::pipeline::Stage;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar advancing once per pipeline stage
pub struct StageProgress {
    bar: ProgressBar,
    completed: usize,
}

impl StageProgress {
    /// Create a progress bar labelled with the input file name
    pub fn new(path: &Path) -> Self {
        let bar = ProgressBar::new(Stage::ALL.len() as u64);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar, completed: 0 }
    }

    /// Mark the previous stage done and show `stage` as running
    pub fn start_stage(&mut self, stage: Stage) {
        self.bar.set_position(self.completed as u64);
        self.bar.set_message(stage.label());
        self.completed += 1;
    }

    /// Number of stages started so far
    pub const fn stages_started(&self) -> usize {
        self.completed
    }

    /// Complete the bar and leave a summary line
    pub fn finish(&self, output: &Path) {
        self.bar.set_position(Stage::ALL.len() as u64);
        self.bar
            .finish_with_message(format!("wrote {}", output.display()));
    }

    /// Remove the bar without a summary, used when the run failed
    pub fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}
