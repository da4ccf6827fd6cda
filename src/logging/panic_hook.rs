use std::backtrace::Backtrace;

use super::named_logger;

/// Installs the process-wide panic hook.
///
/// The hook formats the panic message, location and backtrace, writes the
/// report to stderr and records it at ERROR on the named logger. Only one
/// hook can be active; a later `set_hook` overwrites it. Unwinding/abort
/// semantics are untouched.
pub(crate) fn install() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();
        let report = format!("{info}\n{backtrace}");
        eprintln!("{report}");
        named_logger().error(&format!("Unhandled panic!\n{report}"));
    }));
}
