use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

/// Initializes terminal logging for the whole process.
///
/// Safe to call more than once; repeated initialization is ignored so tests
/// can call it freely.
pub fn init_logging() {
    let _ = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
