//! Reader for the tab-separated image manifest.
//!
//! A manifest lists one record per line as `<image path>\t<expected label>`,
//! with no header, quoting or escaping. Blank lines are ignored.

use crate::core::errors::{EvalError, EvalResult};
use std::path::Path;

/// One manifest line: an image path and the label it is expected to receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    image_path: String,
    expected_label: String,
}

impl ManifestRecord {
    /// Creates a record, rejecting an empty image path.
    pub fn new(
        image_path: impl Into<String>,
        expected_label: impl Into<String>,
    ) -> EvalResult<Self> {
        let image_path = image_path.into();
        if image_path.is_empty() {
            return Err(EvalError::invalid_input("image path must not be empty"));
        }
        Ok(Self {
            image_path,
            expected_label: expected_label.into(),
        })
    }

    /// The image path, relative to the images directory.
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// The label this image should be classified as.
    pub fn expected_label(&self) -> &str {
        &self.expected_label
    }

    /// Parses one manifest line. `line_no` is 1-based and only used for errors.
    fn parse_line(line: &str, line_no: usize) -> EvalResult<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 2 {
            return Err(EvalError::manifest_format(
                line_no,
                format!(
                    "expected 2 tab-separated fields, found {} in {:?}",
                    fields.len(),
                    line
                ),
            ));
        }
        if fields[0].is_empty() {
            return Err(EvalError::manifest_format(line_no, "image path is empty"));
        }
        Ok(Self {
            image_path: fields[0].to_string(),
            expected_label: fields[1].to_string(),
        })
    }
}

/// The ordered records of one manifest file.
///
/// The whole file is read up front; iterating the manifest any number of
/// times yields the same records in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    records: Vec<ManifestRecord>,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> EvalResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EvalError::invalid_input(format!(
                "failed to read manifest '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Parses manifest content.
    ///
    /// Fails on the first line that does not hold exactly two fields.
    pub fn parse(content: &str) -> EvalResult<Self> {
        let mut records = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.trim().is_empty() {
                continue;
            }
            records.push(ManifestRecord::parse_line(line, idx + 1)?);
        }
        Ok(Self { records })
    }

    /// Iterates the records in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, ManifestRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the manifest holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records as a slice.
    pub fn records(&self) -> &[ManifestRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestRecord;
    type IntoIter = std::slice::Iter<'a, ManifestRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
