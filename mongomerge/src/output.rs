//! Styled terminal output, matching the project's CLI conventions.

use owo_colors::OwoColorize;

/// Print a success message.
pub fn success(text: &str) {
    println!("{} {}", "✔".green().bold(), text.green());
}

/// Print an error message to stderr.
pub fn error(text: &str) {
    eprintln!("{} {}", "✖".red().bold(), text.red());
}

/// Print the final run summary, matching the original tool's
/// `duration=.. count=.. docs/sec=..` stderr line.
pub fn summary(parents_updated: u64, duration: std::time::Duration) {
    let secs = duration.as_secs_f64();
    let rate = if secs > 0.0 {
        parents_updated as f64 / secs
    } else {
        0.0
    };
    eprintln!(
        "{} duration={:.2}s count={} docs/sec={:.1}",
        "info:".dimmed(),
        secs,
        parents_updated,
        rate
    );
}
