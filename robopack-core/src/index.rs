use crate::error::{DatasetError, Result};
use regex::Regex;

/// Extracts the numeric frame index that correlates a camera image with
/// its sibling record file. Built once and passed by reference; the
/// compiled patterns are the only state.
pub struct IndexExtractor {
    cam: Regex,
    record: Regex,
}

impl IndexExtractor {
    pub fn new() -> Self {
        // Static patterns; compilation cannot fail at runtime.
        Self {
            cam: Regex::new(r"image_array_(?P<idx>[0-9]+)\.jpg$").expect("cam index pattern"),
            record: Regex::new(r"record_(?P<idx>[0-9]+)\.json$").expect("record index pattern"),
        }
    }

    /// Index of a camera image filename, as the digit string found in the
    /// name (leading zeros preserved).
    pub fn cam_index(&self, file_name: &str) -> Result<String> {
        capture_idx(&self.cam, file_name)
    }

    /// Index of a record filename.
    pub fn record_index(&self, file_name: &str) -> Result<String> {
        capture_idx(&self.record, file_name)
    }
}

impl Default for IndexExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn capture_idx(re: &Regex, file_name: &str) -> Result<String> {
    re.captures(file_name)
        .and_then(|c| c.name("idx"))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| DatasetError::NoIndexFound(file_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cam_index_preserves_leading_zeros() {
        let ex = IndexExtractor::new();
        assert_eq!(
            ex.cam_index("cam-image_array_0000042.jpg").unwrap(),
            "0000042"
        );
        assert_eq!(ex.cam_index("image_array_7.jpg").unwrap(), "7");
    }

    #[test]
    fn record_index_matches_record_names() {
        let ex = IndexExtractor::new();
        assert_eq!(ex.record_index("record_0000042.json").unwrap(), "0000042");
    }

    #[test]
    fn foreign_names_are_rejected() {
        let ex = IndexExtractor::new();
        assert!(matches!(
            ex.cam_index("portrait.jpg"),
            Err(DatasetError::NoIndexFound(_))
        ));
        assert!(matches!(
            ex.record_index("cam-image_array_0000042.jpg"),
            Err(DatasetError::NoIndexFound(_))
        ));
        // the suffix must close the filename
        assert!(ex.cam_index("image_array_12.jpg.bak").is_err());
    }
}
