use embassy_sync::{blocking_mutex::raw::NoopRawMutex, signal::Signal};
use pretty_assertions::assert_eq;

use crate::matrix::{self, COLUMNS, ROWS};
use crate::{KeyEvents, KeyMap, KeyMask, KeyReader, KeyState, LogicalKey};

macro_rules! setup {
    ($signal:ident, $reader:ident) => {
        let $signal = Signal::<NoopRawMutex, KeyMask>::new();
        #[allow(unused_mut)]
        let mut $reader = KeyReader::new(&$signal, KeyMap::DEFAULT);
    };
}

fn line_of(key: LogicalKey) -> u32 {
    KeyMap::DEFAULT.line_of(key).unwrap()
}

#[test]
fn default_map_binds_eighteen_distinct_notes() {
    let map = KeyMap::DEFAULT;

    for n in 0..18 {
        assert!(map.line_of(LogicalKey::Note(n)).is_some(), "note {n}");
    }
    assert_eq!(map.line_of(LogicalKey::Note(18)), None);
    assert_eq!(map.lookup(line_of(LogicalKey::InstrumentSelect)), Some(LogicalKey::InstrumentSelect));
}

#[test]
fn default_map_leaves_upper_lines_unbound() {
    let map = KeyMap::DEFAULT;

    for line in (ROWS * COLUMNS) as u32..32 {
        assert_eq!(map.lookup(line), None);
    }
    assert_eq!(map.lookup(40), None);
}

#[test]
fn press_and_release_are_classified_by_current_mask() {
    let c = 1 << line_of(LogicalKey::Note(0));
    let d = 1 << line_of(LogicalKey::Note(2));

    let state = KeyState::new(c, d, true);
    assert_eq!(
        state.events(&KeyMap::DEFAULT),
        KeyEvents {
            pressed: LogicalKey::Note(0),
            released: LogicalKey::Note(2),
        }
    );
}

#[test]
fn unchanged_mask_produces_no_events() {
    let held = 1 << line_of(LogicalKey::Note(5));
    let state = KeyState::new(held, held, true);

    assert_eq!(state.changed, 0);
    assert!(state.events(&KeyMap::DEFAULT).is_empty());
}

#[test]
fn simultaneous_presses_keep_only_the_highest_line() {
    let low = line_of(LogicalKey::Note(0));
    let high = line_of(LogicalKey::Note(1));
    assert!(high > low);

    let state = KeyState::new((1 << low) | (1 << high), 0, true);
    let events = state.events(&KeyMap::DEFAULT);

    assert_eq!(events.pressed, LogicalKey::Note(1));
    assert_eq!(events.released, LogicalKey::NoKey);
}

#[test]
fn no_key_line_overwrites_an_earlier_press() {
    let note = line_of(LogicalKey::Note(15));
    let dead = line_of(LogicalKey::NoKey);
    assert!(dead > note);

    let state = KeyState::new((1 << note) | (1 << dead), 0, true);
    assert!(state.events(&KeyMap::DEFAULT).is_empty());
}

#[test]
fn unbound_lines_are_ignored() {
    let note = line_of(LogicalKey::Note(3));
    let state = KeyState::new((1 << note) | (1 << 30), 0, true);

    assert_eq!(state.events(&KeyMap::DEFAULT).pressed, LogicalKey::Note(3));
}

#[test]
fn reader_without_update_keeps_last_mask() {
    setup!(signal, reader);

    let mask = 1 << line_of(LogicalKey::Note(7));
    signal.signal(mask);

    let first = reader.poll();
    assert!(first.updated);
    assert_eq!(first.current, mask);
    assert_eq!(first.previous, 0);
    assert_eq!(first.changed, mask);

    let second = reader.poll();
    assert!(!second.updated);
    assert_eq!(second.current, mask);
    assert_eq!(second.changed, 0);
}

#[test]
fn republished_mask_is_updated_without_changes() {
    setup!(signal, reader);

    let mask = 1 << line_of(LogicalKey::Note(9));
    signal.signal(mask);
    assert_eq!(reader.read_events().pressed, LogicalKey::Note(9));

    signal.signal(mask);
    let state = reader.poll();
    assert!(state.updated);
    assert_eq!(state.changed, 0);
    assert!(state.events(&KeyMap::DEFAULT).is_empty());
}

#[test]
fn reader_sees_only_latest_published_mask() {
    setup!(signal, reader);

    signal.signal(1 << line_of(LogicalKey::Note(0)));
    signal.signal(1 << line_of(LogicalKey::Note(4)));

    let events = reader.read_events();
    assert_eq!(events.pressed, LogicalKey::Note(4));
    assert_eq!(events.released, LogicalKey::NoKey);
}

#[test]
fn reader_reports_release_on_next_snapshot() {
    setup!(signal, reader);

    signal.signal(1 << line_of(LogicalKey::InstrumentSelect));
    assert_eq!(reader.read_events().pressed, LogicalKey::InstrumentSelect);

    signal.signal(0);
    let events = reader.read_events();
    assert_eq!(events.pressed, LogicalKey::NoKey);
    assert_eq!(events.released, LogicalKey::InstrumentSelect);
}

#[test]
fn matrix_compose_sets_row_major_bits() {
    let mut rows = [[false; COLUMNS]; ROWS];
    rows[0][0] = true;
    rows[1][5] = true;
    rows[3][2] = true;

    let mask = matrix::compose(&rows);
    assert_eq!(mask, (1 << 0) | (1 << 11) | (1 << 20));
    assert_eq!(KeyMap::DEFAULT.lookup(matrix::line(1, 5)), Some(LogicalKey::InstrumentSelect));
}
