//! Boundary-aware overlapping text splitter.
//!
//! Windows of `chunk_size` chars are cut at the best semantic boundary
//! inside the window (paragraph break, then newline, then sentence end,
//! then word boundary), with a hard character cut only when a unit has no
//! boundary at all. Each chunk after the first starts `overlap` chars
//! before the previous chunk's end, so no unit straddling a boundary is
//! lost from every chunk. Same input and parameters always produce the
//! same sequence.

use crate::types::Chunk;

/// Cut-point ladder, tried in order inside each window.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Split `text` into overlapping chunks. Every chunk's `content` is a
/// contiguous substring of `text` (offsets are char-based). Empty or
/// whitespace-only input yields an empty Vec.
pub fn split(text: &str, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let chunk_size = chunk_size.max(1);
    let overlap = overlap.min(chunk_size - 1);

    // Byte offset of every char boundary, plus the end of the text, so the
    // window arithmetic runs in chars while slicing stays in bytes.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(text.len()))
        .collect();
    let n_chars = bounds.len() - 1;

    let mut pieces: Vec<(usize, String)> = Vec::new();
    let mut start = 0usize;
    loop {
        let end = (start + chunk_size).min(n_chars);
        let cut = if end == n_chars {
            end
        } else {
            find_cut(text, &bounds, start, end, overlap)
        };
        pieces.push((start, text[bounds[start]..bounds[cut]].to_string()));
        if cut == n_chars {
            break;
        }
        start = cut - overlap;
    }

    tracing::debug!(chunks = pieces.len(), chars = n_chars, "split document");

    let total_chunks = pieces.len();
    pieces
        .into_iter()
        .enumerate()
        .map(|(chunk_index, (offset, content))| Chunk {
            content,
            offset,
            chunk_index,
            total_chunks,
        })
        .collect()
}

/// Last usable boundary inside the window `[start, end)`, in chars. A cut
/// must land after `start + overlap`, otherwise the next chunk would not
/// advance; boundaries that violate this fall through to the next
/// separator and finally to the hard cut at `end`.
fn find_cut(text: &str, bounds: &[usize], start: usize, end: usize, overlap: usize) -> usize {
    let window = &text[bounds[start]..bounds[end]];
    for sep in SEPARATORS {
        if let Some(pos) = window.rfind(sep) {
            let cut_byte = bounds[start] + pos + sep.len();
            let cut = bounds.partition_point(|&b| b < cut_byte);
            if cut > start + overlap {
                return cut;
            }
        }
    }
    end
}
