use defmt::{Format, info};

use crate::adsr::ADSRConfig;

pub const INSTRUMENT_COUNT: usize = 12;

/// A synthesis preset. Rates are per control tick, FM amplitudes are
/// multipliers of the modulator sine and `fm_ratio` is the modulator
/// frequency relative to the note in 1/256ths.
#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
    pub name: &'static str,
    pub loudness: u8,
    /// Semitone of key 0, counted from C3
    pub pitch_offset: u8,
    pub attack: u16,
    pub decay: u16,
    /// Sustain level on an 8-bit scale
    pub sustain: u8,
    pub release: u16,
    pub fm_ratio: u16,
    pub fm_amplitude_start: u16,
    pub fm_amplitude_end: u16,
    pub fm_decay: u16,
}

impl Instrument {
    pub fn adsr_config(&self) -> ADSRConfig {
        ADSRConfig {
            attack: self.attack,
            decay: self.decay,
            sustain: (self.sustain as u16) << 8,
            release: self.release,
        }
    }
}

macro_rules! instrument {
    ($name:literal, $pitch:expr, $a:expr, $d:expr, $s:expr, $r:expr, $ratio:expr, $fm_start:expr, $fm_end:expr, $fm_decay:expr) => {
        Instrument {
            name: $name,
            loudness: 64,
            pitch_offset: $pitch,
            attack: $a,
            decay: $d,
            sustain: $s,
            release: $r,
            fm_ratio: $ratio,
            fm_amplitude_start: $fm_start,
            fm_amplitude_end: $fm_end,
            fm_decay: $fm_decay,
        }
    };
}

#[rustfmt::skip]
pub static INSTRUMENTS: [Instrument; INSTRUMENT_COUNT] = [
    //          name          pitch attack decay sus rel  ratio fm_a1 fm_a2 fm_dec
    instrument!("piano",      12,   4096,  8,    0,  64,  256,  128,  64,   64),
    instrument!("xylophone",  12,   8192,  32,   0,  128, 512,  512,  0,    128),
    instrument!("guitar",     12,   8192,  16,   0,  32,  768,  512,  128,  128),
    instrument!("cymbal",     12,   8192,  16,   0,  32,  400,  1024, 128,  128),
    instrument!("bell",       24,   4096,  8,    0,  16,  200,  512,  128,  32),
    instrument!("funky",      24,   512,   16,   0,  32,  96,   0,    512,  128),
    instrument!("vibraphone", 0,    512,   16,   0,  32,  528,  1024, 768,  128),
    instrument!("metal",      12,   8192,  8,    0,  32,  244,  2048, 512,  128),
    instrument!("violin",     24,   128,   16,   240, 32, 256,  256,  128,  128),
    instrument!("bass",       12,   128,   16,   240, 32, 128,  256,  128,  128),
    instrument!("trumpet",    12,   256,   64,   192, 64, 64,   384,  256,  64),
    instrument!("harmonica",  24,   256,   32,   192, 64, 160,  256,  128,  64),
];

/// Currently selected preset, advanced by the instrument-select key.
#[derive(Format, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InstrumentSelector {
    index: usize,
}

impl InstrumentSelector {
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &'static Instrument {
        &INSTRUMENTS[self.index]
    }

    pub fn select(&mut self, index: usize) {
        self.index = index % INSTRUMENT_COUNT;
    }

    /// Steps to the next preset, wrapping after the last one.
    pub fn advance(&mut self) -> &'static Instrument {
        self.select(self.index + 1);

        let instrument = self.current();
        info!("Instrument {}: {}", self.index, instrument.name);
        instrument
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn advancing_twelve_times_wraps_to_first() {
        let mut selector = InstrumentSelector::new();

        for expected in 1..INSTRUMENT_COUNT {
            selector.advance();
            assert_eq!(selector.index(), expected);
        }

        selector.advance();
        assert_eq!(selector.index(), 0);
        assert_eq!(selector.current().name, "piano");
    }

    #[test]
    fn select_wraps_out_of_range_index() {
        let mut selector = InstrumentSelector::new();
        selector.select(13);
        assert_eq!(selector.index(), 1);
        assert_eq!(selector.current().name, "xylophone");
    }

    #[test]
    fn sustain_is_scaled_to_envelope_range() {
        let violin = &INSTRUMENTS[8];
        assert_eq!(violin.adsr_config().sustain, 61_440);
        assert_eq!(INSTRUMENTS[0].adsr_config().sustain, 0);
    }

    #[test]
    fn every_preset_reaches_its_top_note_within_tone_table() {
        for instrument in INSTRUMENTS.iter() {
            assert!((instrument.pitch_offset as usize + 17) < crate::wavetable::TONE_COUNT);
            assert!(instrument.attack > 0, "{}", instrument.name);
            assert!(instrument.release > 0, "{}", instrument.name);
        }
    }
}
