//! Styled terminal output.

use owo_colors::OwoColorize;

/// Print an error message to stderr.
pub fn error(text: &str) {
    eprintln!("{} {}", "✖".red().bold(), text.red());
}

/// Print one table's summary line: `duration=..s count=.. docs/sec=..`.
pub fn table_summary(table: &str, count: u64, duration: std::time::Duration) {
    let secs = duration.as_secs_f64();
    let rate = if secs > 0.0 { count as f64 / secs } else { 0.0 };
    eprintln!(
        "{} table={} duration={:.2}s count={} docs/sec={:.1}",
        "info:".dimmed(),
        table,
        secs,
        count,
        rate
    );
}
