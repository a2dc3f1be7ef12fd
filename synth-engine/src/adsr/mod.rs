use defmt::Format;

#[derive(Format, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ADSRStage {
    #[default]
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Per-tick envelope rates. `sustain` is already on the 16-bit level scale.
#[derive(Format, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ADSRConfig {
    pub attack: u16,
    pub decay: u16,
    pub sustain: u16,
    pub release: u16,
}

/// Linear ADSR envelope stepped once per control tick.
#[derive(Format, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ADSR {
    stage: ADSRStage,
    config: ADSRConfig,
    level: u16,
}

impl ADSR {
    pub const MAX_LEVEL: u16 = u16::MAX;

    pub const fn new() -> Self {
        Self {
            stage: ADSRStage::Idle,
            config: ADSRConfig {
                attack: 0,
                decay: 0,
                sustain: 0,
                release: 0,
            },
            level: 0,
        }
    }

    /// Restarts the envelope from silence with new rates.
    pub fn play(&mut self, config: ADSRConfig) {
        self.config = config;
        self.stage = ADSRStage::Attack;
        self.level = 0;
    }

    /// Moves any sounding stage to release, keeping the current level.
    pub fn stop_playing(&mut self) {
        if self.stage != ADSRStage::Idle {
            self.stage = ADSRStage::Release;
        }
    }

    pub fn stage(&self) -> ADSRStage {
        self.stage
    }

    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn is_idle(&self) -> bool {
        self.stage == ADSRStage::Idle
    }

    /// Advances one tick. At most one stage transition happens per call and
    /// the level is clamped on the transition tick rather than overshooting.
    pub fn step(&mut self) -> u16 {
        let config = &self.config;

        match self.stage {
            ADSRStage::Idle | ADSRStage::Sustain => (),
            ADSRStage::Attack => {
                if Self::MAX_LEVEL - self.level <= config.attack {
                    self.level = Self::MAX_LEVEL;
                    self.stage = ADSRStage::Decay;
                } else {
                    self.level += config.attack;
                }
            }
            ADSRStage::Decay => {
                // 16-bit sum, wraps for sustain levels near the top
                if self.level <= config.sustain.wrapping_add(config.decay) {
                    self.level = config.sustain;
                    self.stage = ADSRStage::Sustain;
                } else {
                    self.level = self.level.wrapping_sub(config.decay);
                }
            }
            ADSRStage::Release => {
                if self.level <= config.release {
                    self.level = 0;
                    self.stage = ADSRStage::Idle;
                } else {
                    self.level -= config.release;
                }
            }
        }

        self.level
    }
}

#[cfg(test)]
mod test;
