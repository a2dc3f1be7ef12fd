use defmt::Format;

use crate::matrix::{COLUMNS, ROWS};

/// Number of physical lines a [`crate::KeyMask`] can carry
pub const KEY_LINES: usize = 32;

/// What a physical key line means to the synth.
#[derive(Format, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogicalKey {
    /// Keyboard key, 0 is the lowest note of the current instrument
    Note(u8),
    InstrumentSelect,
    #[default]
    NoKey,
}

/// Physical line to logical key lookup, indexed by bit position.
///
/// `None` marks a line that is not wired and is never examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    bindings: [Option<LogicalKey>; KEY_LINES],
}

const fn note(n: u8) -> Option<LogicalKey> {
    Some(LogicalKey::Note(n))
}

const SELECT: Option<LogicalKey> = Some(LogicalKey::InstrumentSelect);
const NONE: Option<LogicalKey> = Some(LogicalKey::NoKey);

impl KeyMap {
    /// Board layout: four matrix rows of six columns, line = row * 6 + column.
    ///
    /// | row | keys                          |
    /// |-----|-------------------------------|
    /// | A   | C D E F G A                   |
    /// | B   | B C' D' E' F' instrument      |
    /// | C   | C# D# F# G# A# C#'            |
    /// | D   | D#' and five unused contacts  |
    pub const DEFAULT: KeyMap = {
        let mut bindings = [None; KEY_LINES];
        let layout: [[Option<LogicalKey>; COLUMNS]; ROWS] = [
            [note(0), note(2), note(4), note(5), note(7), note(9)],
            [note(11), note(12), note(14), note(16), note(17), SELECT],
            [note(1), note(3), note(6), note(8), note(10), note(13)],
            [note(15), NONE, NONE, NONE, NONE, NONE],
        ];

        let mut row = 0;
        while row < ROWS {
            let mut column = 0;
            while column < COLUMNS {
                bindings[row * COLUMNS + column] = layout[row][column];
                column += 1;
            }
            row += 1;
        }

        KeyMap::new(bindings)
    };

    pub const fn new(bindings: [Option<LogicalKey>; KEY_LINES]) -> Self {
        Self { bindings }
    }

    pub fn lookup(&self, line: u32) -> Option<LogicalKey> {
        self.bindings.get(line as usize).copied().flatten()
    }

    /// First line bound to `key`
    pub fn line_of(&self, key: LogicalKey) -> Option<u32> {
        self.bindings
            .iter()
            .position(|binding| *binding == Some(key))
            .map(|line| line as u32)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::DEFAULT
    }
}
