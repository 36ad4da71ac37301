//! Console diagnostics.
//!
//! Progress lines only print when the owning component was built with `debug`
//! enabled. Failures always print, the same way a browser console shows
//! `console.error` output regardless of verbosity.

#[cfg(not(windows))]
use colorful::{Color, Colorful};

/// Prints a progress line under `[SCOPE]` when `enabled`.
pub(crate) fn debug(enabled: bool, scope: &str, message: &str) {
    if !enabled {
        return;
    }

    #[cfg(windows)]
    println!("[{}] {}", scope, message);

    #[cfg(not(windows))]
    println!(
        "{} {}",
        format!("[{}]", scope).gradient_with_color(Color::Cyan, Color::SpringGreen4),
        message
    );
}

/// Prints a failure diagnostic under `[SCOPE]` to stderr.
pub(crate) fn error(scope: &str, message: &str) {
    #[cfg(windows)]
    eprintln!("[{}] {}", scope, message);

    #[cfg(not(windows))]
    eprintln!(
        "{} {}",
        format!("[{}]", scope).gradient_with_color(Color::Red, Color::LightRed),
        message
    );
}
