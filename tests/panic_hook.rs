//! A panic escaping a thread after setup must land in the log file as an
//! error record carrying the formatted report.

use std::fs;
use std::thread;

use log::Log;

use kilink_logging::config::Config;
use kilink_logging::logging::{named_logger, setup_logging, Logger, LOG_FILE_NAME};

#[test]
fn panics_are_mirrored_into_the_log_file() {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        log_directory: tmp.path().join("logs"),
        environment: "development".to_string(),
    };

    let logger = Logger::new("kilink.worker");
    setup_logging(&config, &logger, false).unwrap();

    let outcome = thread::Builder::new()
        .name("doomed".to_string())
        .spawn(|| panic!("boom in worker"))
        .unwrap()
        .join();
    assert!(outcome.is_err());

    named_logger().flush();

    let day_file = config.log_directory.join(format!(
        "{LOG_FILE_NAME}.{}",
        chrono::Local::now().format("%Y-%m-%d")
    ));
    let contents = fs::read_to_string(day_file).unwrap();

    assert!(contents.contains("Unhandled panic!"));
    assert!(contents.contains("panicked at"));
    assert!(contents.contains("boom in worker"));
    // The record is attributed to the named logger itself.
    assert!(contents.contains(&format!("{:<22}", "kilink")));
    assert!(contents.contains(&format!("{:<8}", "ERROR")));
}
