//! Non-production setup: idempotence under concurrency, handler sharing,
//! DEBUG propagation, directory creation and the on-disk line format.
//!
//! Setup is once-per-process, so this file owns one configuration and every
//! test goes through the same shared state.

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::thread;

use log::{LevelFilter, Log};
use tempfile::TempDir;

use kilink_logging::config::Config;
use kilink_logging::logging::{named_logger, setup_logging, HandlerKind, Logger, LOG_FILE_NAME};

struct SharedSetup {
    _tmp: TempDir,
    config: Config,
    targets: Vec<Logger>,
}

fn shared_setup() -> &'static SharedSetup {
    static STATE: OnceLock<SharedSetup> = OnceLock::new();
    STATE.get_or_init(|| {
        let tmp = tempfile::tempdir().unwrap();
        // Nested path that does not exist yet; setup must create it.
        let config = Config {
            log_directory: tmp.path().join("var").join("log").join("kilink"),
            environment: "development".to_string(),
        };
        assert!(!config.log_directory.exists());

        let targets: Vec<Logger> = (0..8)
            .map(|i| Logger::new(format!("kilink.web{i}")))
            .collect();

        let handles: Vec<_> = targets
            .iter()
            .map(|target| {
                let config = config.clone();
                let target = target.clone();
                thread::spawn(move || setup_logging(&config, &target, false).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        SharedSetup {
            _tmp: tmp,
            config,
            targets,
        }
    })
}

fn day_file(config: &Config) -> PathBuf {
    config.log_directory.join(format!(
        "{LOG_FILE_NAME}.{}",
        chrono::Local::now().format("%Y-%m-%d")
    ))
}

#[test]
fn concurrent_setup_attaches_exactly_one_file_handler() {
    shared_setup();

    let handlers = named_logger().handlers();
    assert_eq!(handlers.len(), 1);
    assert_eq!(handlers[0].kind(), HandlerKind::File);
}

#[test]
fn targets_share_the_named_logger_handlers() {
    let state = shared_setup();
    let named = named_logger().handlers();

    for target in &state.targets {
        let attached = target.handlers();
        assert_eq!(attached.len(), 1);
        assert!(attached[0].ptr_eq(&named[0]));
    }

    // Two distinct targets hold the very same handler object.
    assert!(state.targets[0].handlers()[0].ptr_eq(&state.targets[1].handlers()[0]));
}

#[test]
fn non_production_setup_forces_debug() {
    let state = shared_setup();

    assert_eq!(named_logger().level(), LevelFilter::Debug);
    for handler in named_logger().handlers() {
        assert_eq!(handler.level(), LevelFilter::Debug);
    }
    for target in &state.targets {
        assert_eq!(target.level(), LevelFilter::Debug);
    }
}

#[test]
fn second_setup_on_the_same_target_is_a_no_op() {
    let state = shared_setup();
    let target = &state.targets[0];
    assert_eq!(target.handlers().len(), 1);

    setup_logging(&state.config, target, false).unwrap();
    assert_eq!(target.handlers().len(), 1);
}

#[test]
fn setup_with_the_named_logger_as_target_does_not_duplicate() {
    let state = shared_setup();

    let named = named_logger();
    setup_logging(&state.config, &named, false).unwrap();
    assert_eq!(named.handlers().len(), 1);
}

#[test]
fn setup_creates_the_missing_log_directory() {
    let state = shared_setup();
    assert!(state.config.log_directory.is_dir());
}

#[test]
fn log_lines_use_the_padded_format() {
    let state = shared_setup();
    let target = &state.targets[0];

    target.info("format sample");
    named_logger().flush();

    let contents = fs::read_to_string(day_file(&state.config)).unwrap();
    let line = contents
        .lines()
        .find(|line| line.ends_with("format sample"))
        .expect("sample line not written");

    assert!(line.contains(&format!("{:<22}", "kilink.web0")));
    assert!(line.contains(&format!("{:<8}", "INFO")));
}
