use super::*;
use pretty_assertions::assert_eq;

const CONFIG: ADSRConfig = ADSRConfig {
    attack: 4096,
    decay: 16,
    sustain: 240 << 8,
    release: 32,
};

fn ticks_until(adsr: &mut ADSR, stage: ADSRStage) -> usize {
    let mut ticks = 0;
    while adsr.stage() != stage {
        adsr.step();
        ticks += 1;
        assert!(ticks < 1_000_000, "never reached {:?}", stage);
    }
    ticks
}

#[test]
fn new_envelope_is_idle_and_silent() {
    let mut adsr = ADSR::new();

    assert!(adsr.is_idle());
    assert_eq!(adsr.step(), 0);
    assert_eq!(adsr.stage(), ADSRStage::Idle);
}

#[test]
fn attack_reaches_decay_after_ceil_of_full_scale_over_rate() {
    for attack in [1u16, 128, 256, 512, 1000, 4096, 8192, 65535] {
        let mut adsr = ADSR::new();
        adsr.play(ADSRConfig { attack, ..CONFIG });

        let expected = 65535usize.div_ceil(attack as usize);
        assert_eq!(ticks_until(&mut adsr, ADSRStage::Decay), expected, "attack {attack}");
        assert_eq!(adsr.level(), ADSR::MAX_LEVEL);
    }
}

#[test]
fn attack_level_never_decreases() {
    let mut adsr = ADSR::new();
    adsr.play(ADSRConfig { attack: 1000, ..CONFIG });

    let mut previous = adsr.level();
    while adsr.stage() == ADSRStage::Attack {
        let level = adsr.step();
        assert!(level >= previous);
        previous = level;
    }
}

#[test]
fn decay_clamps_to_sustain_level() {
    let mut adsr = ADSR::new();
    adsr.play(CONFIG);
    ticks_until(&mut adsr, ADSRStage::Decay);

    let mut previous = adsr.level();
    while adsr.stage() == ADSRStage::Decay {
        let level = adsr.step();
        assert!(level <= previous);
        assert!(level >= CONFIG.sustain);
        previous = level;
    }

    assert_eq!(adsr.stage(), ADSRStage::Sustain);
    assert_eq!(adsr.level(), CONFIG.sustain);
}

#[test]
fn sustain_holds_until_released() {
    let mut adsr = ADSR::new();
    adsr.play(CONFIG);
    ticks_until(&mut adsr, ADSRStage::Sustain);

    for _ in 0..1000 {
        assert_eq!(adsr.step(), CONFIG.sustain);
    }
    assert_eq!(adsr.stage(), ADSRStage::Sustain);
}

#[test]
fn release_decreases_by_rate_until_idle() {
    let mut adsr = ADSR::new();
    adsr.play(CONFIG);
    ticks_until(&mut adsr, ADSRStage::Sustain);
    adsr.stop_playing();
    assert_eq!(adsr.stage(), ADSRStage::Release);
    assert_eq!(adsr.level(), CONFIG.sustain);

    let mut ticks = 0;
    let mut previous = adsr.level();
    loop {
        let level = adsr.step();
        ticks += 1;
        if adsr.is_idle() {
            assert_eq!(level, 0);
            break;
        }
        assert_eq!(level, previous - CONFIG.release);
        previous = level;
    }

    assert_eq!(ticks, (CONFIG.sustain as usize).div_ceil(CONFIG.release as usize));
}

#[test]
fn release_during_attack_keeps_level() {
    let mut adsr = ADSR::new();
    adsr.play(CONFIG);
    adsr.step();
    adsr.step();

    adsr.stop_playing();
    assert_eq!(adsr.stage(), ADSRStage::Release);
    assert_eq!(adsr.level(), 2 * CONFIG.attack);
}

#[test]
fn stop_playing_idle_envelope_stays_idle() {
    let mut adsr = ADSR::new();
    adsr.stop_playing();
    assert!(adsr.is_idle());
}

#[test]
fn zero_sustain_decays_to_silence_but_keeps_sounding() {
    let mut adsr = ADSR::new();
    adsr.play(ADSRConfig {
        attack: 8192,
        decay: 32,
        sustain: 0,
        release: 128,
    });

    ticks_until(&mut adsr, ADSRStage::Sustain);
    assert_eq!(adsr.level(), 0);
    assert!(!adsr.is_idle());

    adsr.stop_playing();
    adsr.step();
    assert!(adsr.is_idle());
}

#[test]
fn play_restarts_from_zero() {
    let mut adsr = ADSR::new();
    adsr.play(CONFIG);
    ticks_until(&mut adsr, ADSRStage::Sustain);

    adsr.play(CONFIG);
    assert_eq!(adsr.stage(), ADSRStage::Attack);
    assert_eq!(adsr.level(), 0);
}

#[test]
fn decay_wraps_when_sustain_sits_near_the_top() {
    let mut adsr = ADSR::new();
    adsr.play(ADSRConfig {
        attack: 65535,
        decay: 256,
        sustain: 255 << 8,
        release: 32,
    });

    adsr.step();
    assert_eq!(adsr.stage(), ADSRStage::Decay);
    assert_eq!(adsr.level(), ADSR::MAX_LEVEL);

    for _ in 0..255 {
        adsr.step();
    }
    assert_eq!(adsr.level(), 255);

    // the sustain threshold wraps to zero and is never reached
    assert_eq!(adsr.step(), ADSR::MAX_LEVEL);
    assert_eq!(adsr.stage(), ADSRStage::Decay);

    for _ in 0..400 {
        adsr.step();
    }
    assert_eq!(adsr.stage(), ADSRStage::Decay);
}
