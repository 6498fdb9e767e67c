//! Output formatting utilities
//!
//! Command results go to stdout; status messages go to stderr so results can
//! be piped.

use std::path::Path;

use console::{style, Style};
use serde::Serialize;

/// Print a success message
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    eprintln!("{} {}", style("→").blue(), message);
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for version numbers
pub fn version_style() -> Style {
    Style::new().green().bold()
}

/// Style for tags
pub fn tag_style() -> Style {
    Style::new().yellow()
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write a rendered document to a file, or to stdout when no file is given
pub fn write_document(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!(path = %path.display(), bytes = content.len(), "document written");
        }
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_document_to_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");

        write_document("# Changelog\n", Some(&path)).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Changelog\n");
    }

    #[test]
    fn test_key_value_contains_parts() {
        let line = key_value("Next", "1.2.0");
        assert!(line.contains("Next"));
        assert!(line.contains("1.2.0"));
    }
}
