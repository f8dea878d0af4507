//! Tests for the stage progress bar

#[cfg(test)]
mod tests {
    use landheat::io::progress::StageProgress;
    use landheat::pipeline::Stage;
    use std::path::Path;

    // Tests every started stage is counted
    // Verified by not incrementing in start_stage
    #[test]
    fn test_stages_started() {
        let mut progress = StageProgress::new(Path::new("maps/plan.png"));
        assert_eq!(progress.stages_started(), 0);

        for stage in Stage::ALL {
            progress.start_stage(stage);
        }
        assert_eq!(progress.stages_started(), Stage::ALL.len());

        progress.finish(Path::new("maps/plan_land_value.png"));
    }

    // Tests abandoning a partially advanced bar
    // Verified by panicking in abandon
    #[test]
    fn test_abandon_midway() {
        let mut progress = StageProgress::new(Path::new("plan.png"));
        progress.start_stage(Stage::Preprocess);
        progress.abandon();
        assert_eq!(progress.stages_started(), 1);
    }
}
