use roster_logger::{LevelFilter, Logger};

#[test]
fn init_console_only_writes_no_file() {
    let logger = Logger::builder()
        .name("roster-console-only")
        .console(true)
        .ansi(false)
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");

    assert!(!logger.writes_file(), "console-only logger should not own a file worker");
}
