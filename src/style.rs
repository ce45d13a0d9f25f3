//! Terminal styling utilities
//!
//! Uses crossterm for cross-platform terminal colors.

use crossterm::style::{StyledContent, Stylize};

/// Green check mark for completed commands
pub fn success_mark() -> StyledContent<&'static str> {
    "✓".green().bold()
}

/// Red cross for failed commands
pub fn failure_mark() -> StyledContent<&'static str> {
    "✗".red().bold()
}

/// Highlight a filesystem path
pub fn path_style(path: &std::path::Path) -> StyledContent<String> {
    path.display().to_string().cyan()
}

/// Dim secondary detail such as a repository URL
pub fn dim(text: &str) -> StyledContent<String> {
    text.to_string().dark_grey()
}
