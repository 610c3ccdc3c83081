//! Class label list loading.

use crate::core::errors::{EvalError, EvalResult};
use std::path::Path;

/// The graph's class names, in output order.
///
/// Index `i` names the graph's `i`-th output score, so the file order must
/// match the order the graph was trained with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Creates a table from labels already in output order.
    ///
    /// # Errors
    ///
    /// Returns `EvalError::ConfigError` if `labels` is empty.
    pub fn new(labels: Vec<String>) -> EvalResult<Self> {
        if labels.is_empty() {
            return Err(EvalError::config_error("label table is empty"));
        }
        Ok(Self { labels })
    }

    /// Reads a label file with one class name per line.
    ///
    /// Each line becomes one entry; empty lines inside the file are preserved
    /// because they still occupy a class index. A trailing `\r` is stripped.
    ///
    /// # Errors
    ///
    /// Returns `EvalError::ConfigError` if the file cannot be read or holds no labels.
    pub fn from_path(path: impl AsRef<Path>) -> EvalResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EvalError::config_error(format!(
                "failed to read label file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Parses label file content.
    pub fn parse(content: &str) -> EvalResult<Self> {
        let labels = content
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self::new(labels)
    }

    /// Returns the label at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; an empty table cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The labels as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    /// Checks that a graph producing `classes` scores lines up with this table.
    ///
    /// # Errors
    ///
    /// Returns `EvalError::ConfigError` when the counts differ.
    pub fn ensure_matches(&self, classes: usize) -> EvalResult<()> {
        if classes != self.labels.len() {
            return Err(EvalError::config_error(format!(
                "label table has {} entries but the graph declares {} classes",
                self.labels.len(),
                classes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_path_keeps_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "dummy").unwrap();
        writeln!(file, "kit fox").unwrap();
        writeln!(file, "English setter").unwrap();

        let labels = LabelTable::from_path(file.path()).unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.get(0), Some("dummy"));
        assert_eq!(labels.get(2), Some("English setter"));
        assert_eq!(labels.get(3), None);
    }

    #[test]
    fn test_parse_preserves_inner_empty_lines_and_strips_cr() {
        let labels = LabelTable::parse("a\r\n\r\nc\r\n").unwrap();
        assert_eq!(labels.as_slice(), &["a", "", "c"]);
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(matches!(
            LabelTable::parse(""),
            Err(EvalError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = LabelTable::from_path("/nonexistent/labels.txt").unwrap_err();
        assert!(matches!(err, EvalError::ConfigError { .. }));
    }

    #[test]
    fn test_ensure_matches() {
        let labels = LabelTable::parse("a\nb\nc").unwrap();
        assert!(labels.ensure_matches(3).is_ok());
        assert!(labels.ensure_matches(1008).is_err());
    }
}
