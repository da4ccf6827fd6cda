//! Logging setup for the kilink (linkode) service: a shared named logger
//! with a daily-rotating file handler, optional console output, DEBUG
//! propagation outside production, and a panic hook that mirrors crash
//! reports into the log.

pub mod config;
pub mod logging;
