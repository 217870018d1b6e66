//! Tests for command-line parsing, path validation, and the mosaic runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use photomosaic::MosaicError;
    use photomosaic::catalog::CollisionPolicy;
    use photomosaic::io::cli::{Cli, CollisionArg, MetricArg, MosaicRunner};
    use photomosaic::io::configuration::{DEFAULT_OUTPUT_PATH, DEFAULT_SEED};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_image(path: &Path, width: u32, height: u32, pixel: [u8; 4]) {
        RgbaImage::from_pixel(width, height, Rgba(pixel))
            .save(path)
            .unwrap();
    }

    fn path_arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    // Tests CLI parsing with only the required positional arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "photo.jpg", "tiles"]);

        assert_eq!(cli.source, PathBuf::from("photo.jpg"));
        assert_eq!(cli.tiles, PathBuf::from("tiles"));
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert!((cli.proportion - 0.3).abs() < f64::EPSILON);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.collisions, CollisionArg::KeepAll);
        assert_eq!(cli.metric, MetricArg::Euclidean);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    // Tests CLI parsing with all available arguments
    // Verified by renaming a long flag
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "photo.png",
            "tiles",
            "--output",
            "mosaic.png",
            "--proportion",
            "1.5",
            "--seed",
            "123",
            "--collisions",
            "keep-last",
            "--metric",
            "luminance",
            "--quiet",
            "--verbose",
        ]);

        assert_eq!(cli.output, PathBuf::from("mosaic.png"));
        assert!((cli.proportion - 1.5).abs() < f64::EPSILON);
        assert_eq!(cli.seed, 123);
        assert_eq!(cli.collisions, CollisionArg::KeepLast);
        assert_eq!(cli.metric, MetricArg::Luminance);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 1);
    }

    // Tests short flag parsing
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "program", "a.png", "dir", "-o", "b.png", "-p", "2", "-s", "9", "-c", "keep-first",
            "-m", "euclidean", "-q", "-vv",
        ]);

        assert_eq!(cli.output, PathBuf::from("b.png"));
        assert!((cli.proportion - 2.0).abs() < f64::EPSILON);
        assert_eq!(cli.seed, 9);
        assert_eq!(cli.collisions, CollisionArg::KeepFirst);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
    }

    // Tests missing positional arguments are rejected
    // Verified by giving the tile directory a default
    #[test]
    fn test_missing_positional_rejected() {
        assert!(Cli::try_parse_from(["program", "photo.png"]).is_err());
        assert!(Cli::try_parse_from(["program"]).is_err());
    }

    // Tests progress display based on --quiet flag
    // Verified by inverting quiet flag logic
    #[test]
    fn test_should_show_progress() {
        let cli = Cli::parse_from(["program", "a.png", "dir"]);
        assert!(cli.should_show_progress());

        let cli = Cli::parse_from(["program", "a.png", "dir", "--quiet"]);
        assert!(!cli.should_show_progress());
    }

    // Tests the percentage argument converts to a fraction
    // Verified by passing the percentage through unchanged
    #[test]
    fn test_proportion_fraction() {
        let cli = Cli::parse_from(["program", "a.png", "dir"]);
        assert!((cli.proportion_fraction() - 0.003).abs() < 1e-12);

        let cli = Cli::parse_from(["program", "a.png", "dir", "-p", "25"]);
        assert!((cli.proportion_fraction() - 0.25).abs() < f64::EPSILON);
    }

    // Tests collision arguments map onto catalog policies
    // Verified by mapping every argument to the default policy
    #[test]
    fn test_collision_arg_conversion() {
        assert_eq!(
            CollisionPolicy::from(CollisionArg::KeepAll),
            CollisionPolicy::KeepAll
        );
        assert_eq!(
            CollisionPolicy::from(CollisionArg::KeepFirst),
            CollisionPolicy::KeepFirst
        );
        assert_eq!(
            CollisionPolicy::from(CollisionArg::KeepLast),
            CollisionPolicy::KeepLast
        );
    }

    // Tests path validation for each kind of wrong input
    // Verified by swapping the file and directory checks
    #[test]
    fn test_validate_paths() {
        let temp_dir = TempDir::new().unwrap();
        let photo = temp_dir.path().join("photo.png");
        write_image(&photo, 4, 4, [0, 0, 0, 255]);
        let tiles = temp_dir.path().join("tiles");
        fs::create_dir(&tiles).unwrap();

        let valid = Cli::parse_from(["program", path_arg(&photo), path_arg(&tiles)]);
        assert!(valid.validate_paths().is_ok());

        let missing = Cli::parse_from([
            "program",
            path_arg(&temp_dir.path().join("nope.png")),
            path_arg(&tiles),
        ]);
        let message = missing.validate_paths().unwrap_err().to_string();
        assert!(message.contains("invalid path"));

        let source_dir = Cli::parse_from(["program", path_arg(&tiles), path_arg(&tiles)]);
        let message = source_dir.validate_paths().unwrap_err().to_string();
        assert!(message.contains("not a file"));

        let tiles_file = Cli::parse_from(["program", path_arg(&photo), path_arg(&photo)]);
        let message = tiles_file.validate_paths().unwrap_err().to_string();
        assert!(message.contains("not a dir"));
    }

    // Tests a full run writes the mosaic to the requested path
    // Verified by skipping the save step
    #[test]
    fn test_process_writes_output() {
        let temp_dir = TempDir::new().unwrap();
        let photo = temp_dir.path().join("photo.png");
        write_image(&photo, 40, 20, [200, 10, 10, 255]);
        let tiles = temp_dir.path().join("tiles");
        fs::create_dir(&tiles).unwrap();
        write_image(&tiles.join("red.png"), 16, 16, [255, 0, 0, 255]);
        write_image(&tiles.join("blue.png"), 16, 16, [0, 0, 255, 255]);
        let output = temp_dir.path().join("out").join("mosaic.png");

        // floor((40 + 20) * 0.1) = 6
        let cli = Cli::parse_from([
            "program",
            path_arg(&photo),
            path_arg(&tiles),
            "-o",
            path_arg(&output),
            "-p",
            "10",
            "-q",
        ]);
        let runner = MosaicRunner::new(cli);
        let result = runner.process().unwrap();

        assert_eq!(result.image.dimensions(), (36, 18));
        assert_eq!(result.statistics.tiles_placed, 18);
        assert!(runner.cli().quiet);

        let written = image::open(&output).unwrap().to_rgba8();
        assert_eq!(written.dimensions(), (36, 18));
        assert_eq!(written.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    // Tests a failed run leaves no output file behind
    // Verified by saving a blank canvas before generation
    #[test]
    fn test_failed_process_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let photo = temp_dir.path().join("photo.png");
        write_image(&photo, 40, 20, [0, 0, 0, 255]);
        let tiles = temp_dir.path().join("tiles");
        fs::create_dir(&tiles).unwrap();
        fs::write(tiles.join("list.txt"), "nothing to see").unwrap();
        let output = temp_dir.path().join("mosaic.png");

        let cli = Cli::parse_from([
            "program",
            path_arg(&photo),
            path_arg(&tiles),
            "-o",
            path_arg(&output),
            "-p",
            "10",
            "-q",
        ]);
        let result = MosaicRunner::new(cli).process();

        assert!(matches!(result, Err(MosaicError::EmptyCatalog { .. })));
        assert!(!output.exists());
    }
}
