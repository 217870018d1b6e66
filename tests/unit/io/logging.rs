//! Tests for logger setup

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::io::logging::{init_logging, level_for_verbosity};
    use simplelog::LevelFilter;

    // Tests each verbosity count maps to a more detailed level
    // Verified by starting at the info level
    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(1), LevelFilter::Info);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(3), LevelFilter::Trace);
        assert_eq!(level_for_verbosity(u8::MAX), LevelFilter::Trace);
    }

    // Tests the global logger can be installed only once
    // Verified by ignoring the logger installation result
    #[test]
    fn test_second_init_fails() {
        // Another test in this binary may have installed the logger first
        let _ = init_logging(LevelFilter::Warn);
        let second = init_logging(LevelFilter::Warn);
        assert!(matches!(second, Err(MosaicError::Logging { .. })));
    }
}
