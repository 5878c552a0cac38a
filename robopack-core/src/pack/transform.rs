use crate::error::{DatasetError, Result};
use crate::record::Record;
use image::imageops::FilterType;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

#[derive(Clone, Copy, Default)]
pub struct TransformOptions {
    /// Target width, 0 keeps the native size.
    pub width: u32,
    /// Target height, 0 keeps the native size.
    pub height: u32,
    /// Rows to crop from the top of the image, after resize and flip.
    pub horizon: u32,
    /// Mirror the image horizontally.
    pub flip: bool,
}

impl TransformOptions {
    fn resize_requested(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Raw bytes can be copied straight into the archive when nothing
    /// needs to decode them.
    pub fn is_passthrough(&self) -> bool {
        !self.flip && !self.resize_requested() && self.horizon == 0
    }
}

/// Apply resize, flip and horizon crop to one image. Returns the encoded
/// jpeg bytes and the final entry name; source bytes pass through
/// untouched when no transform applies. Never mutates the file on disk.
pub fn transform_image(
    path: &Path,
    content: Vec<u8>,
    name: String,
    opts: &TransformOptions,
) -> Result<(Vec<u8>, String)> {
    if opts.is_passthrough() {
        return Ok((content, name));
    }

    let mut img = image::load_from_memory(&content).map_err(|e| DatasetError::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;

    if opts.resize_requested() && (img.width() != opts.width || img.height() != opts.height) {
        debug!(
            "resize image {} from {}x{} to {}x{}",
            path.display(),
            img.width(),
            img.height(),
            opts.width,
            opts.height
        );
        img = img.resize_exact(opts.width, opts.height, FilterType::Nearest);
    }

    let mut name = name;
    if opts.flip {
        img = img.fliph();
        name = format!("flip_{name}");
    }

    if opts.horizon > 0 {
        let kept = img.height().saturating_sub(opts.horizon);
        img = img.crop_imm(0, opts.horizon, img.width(), kept);
    }

    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Jpeg)
        .map_err(|e| DatasetError::Decode {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok((buf.into_inner(), name))
}

/// Produce the record labeling `image_name`. Always returns a fresh value
/// with the image reference rewritten; the flipped variant negates the
/// steering angle and renames the record entry.
pub fn relabel(
    record: &Record,
    record_name: &str,
    image_name: &str,
    flip: bool,
) -> (Record, String) {
    if flip {
        (
            Record {
                user_angle: record.user_angle * -1.0,
                cam_image_array: image_name.to_string(),
            },
            record_name.replacen("record", "record_flip", 1),
        )
    } else {
        (
            Record {
                user_angle: record.user_angle,
                cam_image_array: image_name.to_string(),
            },
            record_name.to_string(),
        )
    }
}
