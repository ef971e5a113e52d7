//! student-registry CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. A failed command is
//! logged as a FATAL line on stderr and the process exits non-zero.

use student_registry::cli;
use student_registry::observability::{log_event_with_fields, Event};

fn main() {
    if let Err(e) = cli::run() {
        log_event_with_fields(
            Event::CommandFailed,
            &[("code", e.code_str()), ("message", e.message())],
        );
        std::process::exit(1);
    }
}
