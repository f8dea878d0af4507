//! Tests for command-line parsing, configuration mapping and file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgb, RgbImage};
    use landheat::io::cli::{Cli, FileProcessor};
    use landheat::io::configuration::DEFAULT_ROAD_THRESHOLD;
    use landheat::{ExecutionMode, LandValueError, Weights};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    // Dark crossing roads on a light background with a textured block
    fn site_plan() -> RgbImage {
        RgbImage::from_fn(48, 40, |x, y| {
            if (20..=24).contains(&x) || (15..=18).contains(&y) {
                Rgb([30, 30, 30])
            } else if x > 32 && y > 26 && (x + y) % 3 == 0 {
                Rgb([170, 210, 160])
            } else {
                Rgb([235, 235, 225])
            }
        })
    }

    fn small_kernel_args(input: &Path) -> Vec<String> {
        let mut args = vec!["landheat".to_string(), input.display().to_string()];
        args.extend(
            [
                "--arterial-blur",
                "9",
                "--junction-blur",
                "11",
                "--zoning-window",
                "5",
                "--zoning-blur",
                "7",
                "--fusion-blur",
                "9",
                "--quiet",
            ]
            .map(String::from),
        );
        args
    }

    // Tests CLI parsing with only the input argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["landheat", "plan.png"]);

        assert_eq!(cli.input, PathBuf::from("plan.png"));
        assert_eq!(cli.threshold, DEFAULT_ROAD_THRESHOLD);
        assert!(cli.output.is_none());
        assert!(!cli.sequential);
        assert!(cli.should_show_progress());

        let config = cli.pipeline_config().unwrap();
        assert_eq!(config.weights, Weights::default());
        assert_eq!(config.execution, ExecutionMode::Parallel);
    }

    // Tests comma separated weights and short flags
    // Verified by removing the value delimiter
    #[test]
    fn test_cli_parse_weights_and_flags() {
        let cli = Cli::parse_from([
            "landheat", "plan.png", "-w", "0.5,0.25,0.25", "-t", "120", "-s", "-e", "-q",
        ]);

        assert_eq!(cli.weights, vec![0.5, 0.25, 0.25]);
        assert!(cli.export_fields);
        assert!(!cli.should_show_progress());

        let config = cli.pipeline_config().unwrap();
        assert_eq!(config.arterial.threshold, 120);
        assert_eq!(config.execution, ExecutionMode::Sequential);
        assert!((config.weights.arterial - 0.5).abs() < f32::EPSILON);
    }

    // Tests weight lists of the wrong length or sum are rejected
    // Verified by padding missing weights with zero
    #[test]
    fn test_cli_rejects_bad_weights() {
        let two = Cli::parse_from(["landheat", "plan.png", "-w", "0.5,0.5"]);
        assert!(matches!(
            two.pipeline_config(),
            Err(LandValueError::InvalidConfiguration {
                parameter: "weights",
                ..
            })
        ));

        let unbalanced = Cli::parse_from(["landheat", "plan.png", "-w", "0.5,0.5,0.5"]);
        assert!(unbalanced.pipeline_config().is_err());
    }

    // Tests even blur sizes from the command line are rejected
    // Verified by skipping validation in pipeline_config
    #[test]
    fn test_cli_rejects_even_blur() {
        let cli = Cli::parse_from(["landheat", "plan.png", "--fusion-blur", "120"]);
        assert!(cli.pipeline_config().is_err());
    }

    // Tests default output and field export paths sit next to the input
    // Verified by dropping the input directory from the output path
    #[test]
    fn test_output_paths() {
        let cli = Cli::parse_from(["landheat", "maps/plan.jpg"]);
        assert_eq!(cli.output_path(), PathBuf::from("maps/plan_land_value.png"));

        let explicit = Cli::parse_from(["landheat", "maps/plan.jpg", "-o", "out/heat.png"]);
        assert_eq!(explicit.output_path(), PathBuf::from("out/heat.png"));

        assert_eq!(
            FileProcessor::field_path(Path::new("maps/plan.jpg"), "zoning"),
            PathBuf::from("maps/plan_zoning.png")
        );
    }

    // Tests processing writes an overlay with the input's dimensions
    // Verified by writing the heat map without compositing
    #[test]
    fn test_process_writes_overlay() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plan.png");
        site_plan().save(&input).unwrap();

        let cli = Cli::parse_from(small_kernel_args(&input));
        let output = FileProcessor::new(cli).process().unwrap();

        assert_eq!(output, dir.path().join("plan_land_value.png"));
        let overlay = image::open(&output).unwrap().to_rgb8();
        assert_eq!(overlay.dimensions(), site_plan().dimensions());
        assert!(!dir.path().join("plan_score.png").exists());
    }

    // Tests field export writes one grayscale image per field
    // Verified by skipping the score export
    #[test]
    fn test_process_exports_fields() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plan.png");
        site_plan().save(&input).unwrap();

        let mut args = small_kernel_args(&input);
        args.push("--export-fields".to_string());
        args.push("--sequential".to_string());
        FileProcessor::new(Cli::parse_from(args)).process().unwrap();

        for name in ["arterial", "junction", "zoning", "score"] {
            let path = dir.path().join(format!("plan_{name}.png"));
            let field = image::open(&path).unwrap();
            assert_eq!(field.width(), 48);
            assert_eq!(field.height(), 40);
        }
    }

    // Tests a missing input file is reported before any work
    // Verified by removing the is_file check
    #[test]
    fn test_process_missing_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("absent.png");

        let result = FileProcessor::new(Cli::parse_from(small_kernel_args(&input))).process();
        assert!(matches!(
            result,
            Err(LandValueError::InvalidConfiguration {
                parameter: "input",
                ..
            })
        ));
    }

    // Tests a file that is not an image fails to decode
    // Verified by treating undecodable files as blank images
    #[test]
    fn test_process_undecodable_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("notes.png");
        std::fs::write(&input, b"plain text").unwrap();

        let result = FileProcessor::new(Cli::parse_from(small_kernel_args(&input))).process();
        assert!(matches!(result, Err(LandValueError::ImageDecode { .. })));
        assert!(!dir.path().join("notes_land_value.png").exists());
    }
}
