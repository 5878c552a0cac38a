use crate::error::Result;
use crate::index::IndexExtractor;
use crate::pack::pairing::{FramePair, collect_pairs, file_name};
use crate::pack::slice::apply_slice;
use crate::pack::transform::{TransformOptions, relabel, transform_image};
use crate::record::Record;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::info;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

#[derive(Clone, Copy, Default)]
pub struct ArchiveOptions {
    /// Pair each image with the record this many frames ahead.
    pub slice_size: usize,
    /// Target width, 0 keeps the native size.
    pub width: u32,
    /// Target height, 0 keeps the native size.
    pub height: u32,
    /// Rows to crop from the top of each image.
    pub horizon: u32,
    /// Append a mirrored copy of every pair, steering angle negated.
    pub flip: bool,
}

impl ArchiveOptions {
    fn transform(&self, flip: bool) -> TransformOptions {
        TransformOptions {
            width: self.width,
            height: self.height,
            horizon: self.horizon,
            flip,
        }
    }
}

/// Build the training archive for `basedir` and write it to `out`.
pub fn write_archive(basedir: &Path, out: &Path, opts: &ArchiveOptions) -> Result<()> {
    let content = build_archive(basedir, opts)?;
    fs::write(out, content)?;
    Ok(())
}

/// Build a zip archive pairing every camera image under `basedir` with its
/// record. The archive is flat: entries are named by basename and every
/// record's image reference is rewritten to its paired image entry. The
/// whole job aborts on the first unreadable or malformed file; the archive
/// is only finalized once every entry has been written.
pub fn build_archive(basedir: &Path, opts: &ArchiveOptions) -> Result<Vec<u8>> {
    info!("build zip archive from {}", basedir.display());
    let extractor = IndexExtractor::new();
    let pairs = apply_slice(collect_pairs(basedir, &extractor)?, opts.slice_size)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    append_entries(&mut zip, &pairs, opts, false)?;
    if opts.flip {
        append_entries(&mut zip, &pairs, opts, true)?;
    }
    let content = zip.finish()?.into_inner();
    info!("archive built, {} bytes", content.len());
    Ok(content)
}

/// One pass over the pair list: record entries first, then image entries.
/// The flip pass appends a second set of entries to the same archive.
fn append_entries(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    pairs: &[FramePair],
    opts: &ArchiveOptions,
    flip: bool,
) -> Result<()> {
    for pair in pairs {
        let content = fs::read(&pair.record)?;
        let rcd: Record = serde_json::from_slice(&content)?;
        let image_name = entry_image_name(&pair.image, flip);
        let (rcd, record_name) = relabel(&rcd, &file_name(&pair.record), &image_name, flip);
        add_entry(zip, &record_name, &serde_json::to_vec(&rcd)?)?;
    }

    let transform = opts.transform(flip);
    for pair in pairs {
        let content = fs::read(&pair.image)?;
        let (content, name) = transform_image(&pair.image, content, file_name(&pair.image), &transform)?;
        add_entry(zip, &name, &content)?;
    }
    Ok(())
}

/// Image entry name as the record pass must reference it; the transform
/// pass applies the same `flip_` prefix when it writes the image.
fn entry_image_name(image: &Path, flip: bool) -> String {
    let name = file_name(image);
    if flip { format!("flip_{name}") } else { name }
}

fn add_entry(zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, content: &[u8]) -> Result<()> {
    zip.start_file(name, SimpleFileOptions::default())?;
    zip.write_all(content)?;
    Ok(())
}
