use crate::error::{DatasetError, Result};
use crate::index::IndexExtractor;
use crate::record::{CAM_SUBDIR, record_file_name};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One camera frame matched with the record file expected to label it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePair {
    pub image: PathBuf,
    pub record: PathBuf,
}

/// Walk every session under `basedir` and pair each camera image with its
/// sibling record path, sessions and images both in lexicographic order.
/// Record existence is not checked here; a missing record surfaces when it
/// is read during packing.
pub fn collect_pairs(basedir: &Path, extractor: &IndexExtractor) -> Result<Vec<FramePair>> {
    let mut pairs = Vec::new();
    for session in list_sorted_dirs(basedir)? {
        debug!("process {} directory", session.display());
        for image in list_sorted_files(&session.join(CAM_SUBDIR))? {
            let name = file_name(&image);
            let idx = extractor.cam_index(&name)?;
            debug!("found image with index {idx}");
            pairs.push(FramePair {
                record: session.join(record_file_name(&idx)),
                image,
            });
        }
    }
    Ok(pairs)
}

pub(crate) fn list_sorted_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    list_sorted(dir, true)
}

pub(crate) fn list_sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
    list_sorted(dir, false)
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn list_sorted(dir: &Path, dirs: bool) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .follow_links(false)
    {
        let entry = entry.map_err(|e| DatasetError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_dir() == dirs {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    fn make_session(root: &Path, name: &str, indexes: &[u32]) {
        let cam = root.join(name).join(CAM_SUBDIR);
        fs::create_dir_all(&cam).unwrap();
        for i in indexes {
            touch(&cam.join(format!("cam-image_array_{i:07}.jpg")));
            touch(&root.join(name).join(format!("record_{i:07}.json")));
        }
    }

    #[test]
    fn every_image_gets_exactly_one_record_pair() {
        let root = tempfile::tempdir().unwrap();
        make_session(root.path(), "20191012_111416", &[1, 2, 3]);
        make_session(root.path(), "20191012_122633", &[101, 102]);

        let pairs = collect_pairs(root.path(), &IndexExtractor::new()).unwrap();
        assert_eq!(pairs.len(), 5);

        // session order then filename order, record path derived from the
        // image index
        let first = &pairs[0];
        assert!(first.image.ends_with("20191012_111416/cam/cam-image_array_0000001.jpg"));
        assert!(first.record.ends_with("20191012_111416/record_0000001.json"));
        let last = &pairs[4];
        assert!(last.image.ends_with("20191012_122633/cam/cam-image_array_0000102.jpg"));
        assert!(last.record.ends_with("20191012_122633/record_0000102.json"));
    }

    #[test]
    fn foreign_image_name_aborts_pairing() {
        let root = tempfile::tempdir().unwrap();
        make_session(root.path(), "20191012_111416", &[1]);
        touch(&root.path().join("20191012_111416").join(CAM_SUBDIR).join("portrait.jpg"));

        let err = collect_pairs(root.path(), &IndexExtractor::new()).unwrap_err();
        assert!(matches!(err, DatasetError::NoIndexFound(_)));
    }

    #[test]
    fn missing_cam_dir_is_unreadable() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("20191012_111416")).unwrap();

        let err = collect_pairs(root.path(), &IndexExtractor::new()).unwrap_err();
        assert!(matches!(err, DatasetError::DirectoryUnreadable { .. }));
    }
}
