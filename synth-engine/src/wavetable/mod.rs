use defmt::Format;

mod phase_increment_table;
pub mod sine_wavetable;


pub use phase_increment_table::{TONE_COUNT, TONE_PHASE_INCREMENT};
use sine_wavetable::SINE_WAVETABLE;

/// Index of A4 (440 Hz) in [`TONE_PHASE_INCREMENT`], which starts at C3
pub const A4_TONE: usize = 21;

/// Phase increment for a semitone counted from C3.
///
/// Semitones past B6 play B6.
pub fn tone_phase_increment(semitone: usize) -> u16 {
    TONE_PHASE_INCREMENT[semitone.min(TONE_COUNT - 1)]
}

/// Looks up the 8-bit sine table with the high byte of a 16-bit phase.
#[inline(always)]
pub fn sine(phase: u16) -> i8 {
    SINE_WAVETABLE[(phase >> 8) as usize]
}

/// Two-operator FM oscillator, the per-sample half of a voice.
///
/// Everything here runs once per sample period, so the control plane
/// precomputes `amplitude` and `fm_amplitude` once per tick and pushes them in
/// with [`FmOscillator::set_parameters`].
#[derive(Format, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FmOscillator {
    phase: u16,
    phase_increment: u16,
    fm_phase: u16,
    fm_phase_increment: u16,
    fm_amplitude: u16,
    amplitude: u8,
}

impl FmOscillator {
    pub const fn new() -> Self {
        Self {
            phase: 0,
            phase_increment: 0,
            fm_phase: 0,
            fm_phase_increment: 0,
            fm_amplitude: 0,
            amplitude: 0,
        }
    }

    pub fn reset_phase(&mut self) {
        self.phase = 0;
        self.fm_phase = 0;
    }

    pub fn set_parameters(
        &mut self,
        phase_increment: u16,
        fm_phase_increment: u16,
        fm_amplitude: u16,
        amplitude: u8,
    ) {
        self.phase_increment = phase_increment;
        self.fm_phase_increment = fm_phase_increment;
        self.fm_amplitude = fm_amplitude;
        self.amplitude = amplitude;
    }

    pub fn phase(&self) -> u16 {
        self.phase
    }

    pub fn fm_phase(&self) -> u16 {
        self.fm_phase
    }

    pub fn amplitude(&self) -> u8 {
        self.amplitude
    }

    pub fn fm_amplitude(&self) -> u16 {
        self.fm_amplitude
    }

    /// Advances both accumulators and returns the voice contribution.
    ///
    /// The modulator is sign-extended to 16 bits and multiplied without
    /// widening, so large FM amplitudes wrap the carrier phase exactly like a
    /// 16-bit integer unit would.
    #[inline(always)]
    pub fn next_sample(&mut self) -> i16 {
        self.fm_phase = self.fm_phase.wrapping_add(self.fm_phase_increment);
        self.phase = self.phase.wrapping_add(self.phase_increment);

        let modulator = sine(self.fm_phase) as i16 as u16;
        let carrier_phase = self
            .phase
            .wrapping_add(modulator.wrapping_mul(self.fm_amplitude));

        (sine(carrier_phase) as i16).wrapping_mul(self.amplitude as i16)
    }
}
