//! Packing of key matrix readings into a [`KeyMask`].

use crate::KeyMask;

pub const ROWS: usize = 4;
pub const COLUMNS: usize = 6;

pub const fn line(row: usize, column: usize) -> u32 {
    (row * COLUMNS + column) as u32
}

/// `rows[r][c]` is true while the key at row `r`, column `c` is held.
pub fn compose(rows: &[[bool; COLUMNS]; ROWS]) -> KeyMask {
    let mut mask: KeyMask = 0;

    for (row, columns) in rows.iter().enumerate() {
        for (column, &held) in columns.iter().enumerate() {
            if held {
                mask |= 1 << line(row, column);
            }
        }
    }

    mask
}
