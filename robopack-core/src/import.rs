use crate::error::Result;
use crate::index::IndexExtractor;
use crate::pack::pairing::{file_name, list_sorted_dirs, list_sorted_files};
use crate::record::{CAM_SUBDIR, Record, record_file_name};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Copy donkeycar-layout sessions into the layout the archive builder
/// expects: image and record files are renamed with the session name baked
/// in, and every record's image reference is rewritten to the new relative
/// path. A session that fails to copy is logged and skipped; a file whose
/// index cannot be extracted is skipped with a warning. This importer
/// keeps the looser per-file semantics of the original tool rather than
/// the fail-fast behaviour of the archive path.
pub fn import_donkey_records(basedir: &Path, destdir: &Path) -> Result<()> {
    let extractor = IndexExtractor::new();
    for session in list_sorted_dirs(basedir)? {
        let session_name = file_name(&session);
        debug!("process {session_name} directory");
        if let Err(e) = import_session(&session, &session_name, destdir, &extractor) {
            warn!(
                "unable to copy files from {} to {}: {e}",
                session.display(),
                destdir.display()
            );
        }
    }
    Ok(())
}

fn import_session(
    session: &Path,
    session_name: &str,
    destdir: &Path,
    extractor: &IndexExtractor,
) -> Result<()> {
    fs::create_dir_all(destdir.join(session_name).join(CAM_SUBDIR))?;

    let mut images = Vec::new();
    let mut records = Vec::new();
    for image in list_sorted_files(&session.join(CAM_SUBDIR))? {
        let idx = extractor.cam_index(&file_name(&image))?;
        debug!("found image with index {idx}");
        records.push(session.join(record_file_name(&idx)));
        images.push(image);
    }

    copy_records(&records, session_name, destdir, extractor)?;
    copy_cam_images(&images, session_name, destdir, extractor)?;
    Ok(())
}

fn copy_records(
    records: &[PathBuf],
    session_name: &str,
    destdir: &Path,
    extractor: &IndexExtractor,
) -> Result<()> {
    for record_path in records {
        let idx = match extractor.record_index(&file_name(record_path)) {
            Ok(idx) => idx,
            Err(e) => {
                warn!("unable to extract idx from filename {}: {e}", record_path.display());
                continue;
            }
        };
        let content = fs::read(record_path)?;
        let rcd: Record = serde_json::from_slice(&content)?;

        let cam_name = imported_image_name(session_name, &idx);
        let rcd = Record {
            user_angle: rcd.user_angle,
            cam_image_array: format!("{CAM_SUBDIR}/{cam_name}"),
        };

        let dest = destdir
            .join(session_name)
            .join(format!("record_{session_name}_{idx}.json"));
        fs::write(dest, serde_json::to_vec(&rcd)?)?;
    }
    Ok(())
}

fn copy_cam_images(
    images: &[PathBuf],
    session_name: &str,
    destdir: &Path,
    extractor: &IndexExtractor,
) -> Result<()> {
    for image in images {
        let idx = match extractor.cam_index(&file_name(image)) {
            Ok(idx) => idx,
            Err(e) => {
                warn!("unable to extract idx from filename {}: {e}", image.display());
                continue;
            }
        };
        let dest = destdir
            .join(session_name)
            .join(CAM_SUBDIR)
            .join(imported_image_name(session_name, &idx));
        fs::copy(image, dest)?;
    }
    Ok(())
}

fn imported_image_name(session_name: &str, idx: &str) -> String {
    format!("image_array_{session_name}_{idx}.jpg")
}
