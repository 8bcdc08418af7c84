//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--output json` is selected, results are machine-readable JSON on
//! stdout and progress lines go to stderr so they never mix with it.

use std::fmt::Display;

use clap::ValueEnum;
use serde::Serialize;

/// Longest doc excerpt shown in listings, in characters.
pub const DOC_EXCERPT_LEN: usize = 80;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Default `tracing` filter directive for this level.
    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Debug => "debug",
        }
    }
}

/// Result rendering format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Pretty,
    /// Pretty-printed JSON
    Json,
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a progress line to stderr (respects quiet mode).
pub fn progress(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a section heading surrounded by blank lines.
pub fn heading(text: impl Display) {
    println!("\n{}\n", text);
}

/// Print an indented list entry with an optional description.
pub fn item(name: impl Display, description: Option<&str>) {
    match description {
        Some(desc) if !desc.is_empty() => println!("  {}  {}", name, desc),
        _ => println!("  {}", name),
    }
}

/// Print a labelled field.
pub fn field(label: &str, value: impl Display) {
    println!("  {}: {}", label, value);
}

/// Print documentation lines, trimmed, indented.
pub fn docs(lines: &[String]) {
    let text = lines.join("\n");
    let text = text.trim();
    if !text.is_empty() {
        for line in text.lines() {
            println!("  {}", line);
        }
    }
}

/// First doc line, trimmed and cut to [`DOC_EXCERPT_LEN`] characters.
pub fn doc_excerpt(lines: &[String]) -> Option<String> {
    lines
        .first()
        .map(|line| line.trim().chars().take(DOC_EXCERPT_LEN).collect())
}

/// Format bytes as `0x`-prefixed lowercase hex.
pub fn format_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn filter_directives() {
        assert_eq!(Verbosity::Quiet.filter_directive(), "error");
        assert_eq!(Verbosity::Normal.filter_directive(), "warn");
        assert_eq!(Verbosity::Debug.filter_directive(), "debug");
    }

    #[test]
    fn doc_excerpt_truncates_by_chars() {
        let long = "é".repeat(100);
        let excerpt = doc_excerpt(&[long, "second".into()]).unwrap();
        assert_eq!(excerpt.chars().count(), DOC_EXCERPT_LEN);
        assert_eq!(doc_excerpt(&[" short".into()]).as_deref(), Some("short"));
        assert_eq!(doc_excerpt(&[]), None);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(format_hex(&[0x32, 0, 0, 0]), "0x32000000");
        assert_eq!(format_hex(&[]), "0x");
    }
}
