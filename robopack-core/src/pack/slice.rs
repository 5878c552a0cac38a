use crate::error::{DatasetError, Result};
use crate::pack::pairing::FramePair;

/// Realign images with the records `slice_size` frames ahead of them: the
/// last `slice_size` images and the first `slice_size` records are
/// dropped, so image `i` is labeled by what was record `i + slice_size`.
/// The shift is a deliberate skew in the training correspondence, applied
/// to the global pair list.
pub fn apply_slice(pairs: Vec<FramePair>, slice_size: usize) -> Result<Vec<FramePair>> {
    if slice_size == 0 {
        return Ok(pairs);
    }
    if slice_size >= pairs.len() {
        return Err(DatasetError::SliceTooLarge {
            slice: slice_size,
            pairs: pairs.len(),
        });
    }

    let records: Vec<_> = pairs
        .iter()
        .skip(slice_size)
        .map(|p| p.record.clone())
        .collect();
    Ok(pairs
        .into_iter()
        .zip(records)
        .map(|(pair, record)| FramePair {
            image: pair.image,
            record,
        })
        .collect())
}
