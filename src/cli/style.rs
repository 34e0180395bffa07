//! Terminal styling helpers

use owo_colors::{OwoColorize, Style, Styled};
use std::fmt::Display;

/// Semantic styles for CLI output
pub trait Stylize {
    /// De-emphasised text (hints, skip reasons)
    fn muted(&self) -> Styled<&Self>;
    /// Bold text
    fn emphasis(&self) -> Styled<&Self>;
    /// Names of repositories and PRs
    fn accent(&self) -> Styled<&Self>;
    /// Successful results
    fn success(&self) -> Styled<&Self>;
    /// Warnings and failed merges
    fn warn(&self) -> Styled<&Self>;
    /// Fatal errors
    fn error(&self) -> Styled<&Self>;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> Styled<&Self> {
        self.style(Style::new().dimmed())
    }

    fn emphasis(&self) -> Styled<&Self> {
        self.style(Style::new().bold())
    }

    fn accent(&self) -> Styled<&Self> {
        self.style(Style::new().cyan())
    }

    fn success(&self) -> Styled<&Self> {
        self.style(Style::new().green())
    }

    fn warn(&self) -> Styled<&Self> {
        self.style(Style::new().yellow())
    }

    fn error(&self) -> Styled<&Self> {
        self.style(Style::new().red().bold())
    }
}

/// Horizontal rule used around the run output
pub fn rule() -> String {
    "=".repeat(60)
}
