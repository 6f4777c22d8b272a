//! Columnar transposition: text is written row-major into `width` columns
//! and the columns are read out in key order.
//!
//! The first `len % width` *original* columns are one symbol longer than
//! the rest, regardless of the position at which they are read out.

use super::key::TranspositionKey;

/// Length of original column `col` for a text of `len` symbols.
#[inline(always)]
pub fn column_len(len: usize, width: usize, col: usize) -> usize {
    len / width + usize::from(col < len % width)
}

/// Forward transposition.
pub fn columnar(text: &[u8], key: &TranspositionKey) -> Vec<u8> {
    let width = key.width();
    let mut out = Vec::with_capacity(text.len());
    for &col in key.as_slice() {
        out.extend(text.iter().skip(col).step_by(width));
    }
    out
}

/// Reverses [`columnar`]. `order` is taken raw so that malformed orders are
/// reported as `None` rather than panicking.
pub fn undo_columnar(ciphertext: &[u8], order: &[usize]) -> Option<Vec<u8>> {
    let width = order.len();
    if width == 0 {
        return None;
    }

    let len = ciphertext.len();
    let mut columns: Vec<&[u8]> = vec![&ciphertext[..0]; width];
    let mut seen = vec![false; width];
    let mut pos = 0;

    for &col in order {
        if col >= width || seen[col] {
            return None;
        }
        seen[col] = true;
        let col_len = column_len(len, width, col);
        if pos + col_len > len {
            return None;
        }
        columns[col] = &ciphertext[pos..pos + col_len];
        pos += col_len;
    }

    let rows = len / width + 1;
    let mut out = Vec::with_capacity(len);
    for row in 0..rows {
        for column in &columns {
            if let Some(&b) = column.get(row) {
                out.push(b);
            }
        }
    }
    Some(out)
}

/// Splits a transposed text into its read-out chunks (read order).
pub fn read_chunks<'a>(ciphertext: &'a [u8], key: &TranspositionKey) -> Vec<&'a [u8]> {
    let width = key.width();
    let len = ciphertext.len();
    let mut pos = 0;
    key.as_slice()
        .iter()
        .map(|&col| {
            let end = (pos + column_len(len, width, col)).min(len);
            let chunk = &ciphertext[pos..end];
            pos = end;
            chunk
        })
        .collect()
}
