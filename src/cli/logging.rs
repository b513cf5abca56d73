use colored::*;
use log::{Level, Record};
use std::io::Write;

/// The ` [file:line]` suffix for debug and trace messages
fn location(record: &Record) -> String {
    match (record.file(), record.line()) {
        (Some(file), Some(line)) => format!(" [{}:{}]", file, line),
        (Some(file), None) => format!(" [{}]", file),
        _ => String::new(),
    }
}

pub(crate) fn formatter(
    buf: &mut env_logger::fmt::Formatter,
    record: &Record,
) -> Result<(), std::io::Error> {
    match record.level() {
        Level::Error => writeln!(buf, "{}: {}", "Error".red(), record.args()),
        Level::Warn => writeln!(buf, "{}: {}", "Warning".yellow(), record.args()),
        Level::Info => writeln!(buf, "{}", record.args()),
        Level::Debug => writeln!(
            buf,
            "{}{}: {}",
            "Debug".blue(),
            location(record).blue(),
            record.args()
        ),
        Level::Trace => writeln!(
            buf,
            "{}{}: {}",
            "Trace".dimmed(),
            location(record).dimmed(),
            record.args()
        ),
    }
}
