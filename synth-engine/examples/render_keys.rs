//! Renders a key script through the engine into a WAV file.
//!
//! A script has one event per line, `<time in ms> <down|up> <key>`, where key
//! is a note number (0-17) or `select`. Blank lines and `#` comments are
//! skipped.
//!
//! ```text
//! 0    down 0
//! 400  down 4
//! 800  up   0
//! 800  up   4
//! 1000 down select
//! 1400 up   select
//! ```

use clap::Parser;
use embassy_futures::block_on;
use embassy_sync::{blocking_mutex::raw::NoopRawMutex, signal::Signal};
use hound::{WavSpec, WavWriter};
use keys::{KeyMap, KeyMask, LogicalKey};
use std::fs;
use std::path::{Path, PathBuf};
use synth_engine::{
    INSTRUMENTS, PWM_MIDPOINT, PwmOutput, SAMPLE_RATE, SAMPLES_PER_TICK, SampleClock, SynthEngine,
};

#[derive(Parser, Debug)]
#[command(name = "Key Renderer")]
#[command(about = "Renders a key script using the FM synth engine", long_about = None)]
struct Args {
    /// Instrument to start with (0-11)
    #[arg(long, default_value_t = 0)]
    instrument: usize,

    /// Silence rendered after the last event, in milliseconds
    #[arg(long, default_value_t = 2000)]
    tail: u64,

    /// Path to the key script
    #[arg(long)]
    script: PathBuf,

    /// Output WAV file path
    #[arg(long, default_value = "./test-results/output.wav")]
    output: PathBuf,
}

#[derive(Debug, Clone, Copy)]
struct KeyChange {
    time_ms: u64,
    line: u32,
    down: bool,
}

/// The host renders as fast as it can, every boundary is already due
struct FreeRunningClock;

impl SampleClock for FreeRunningClock {
    async fn wait_for_sample(&mut self) {}
}

struct WavOutput {
    samples: Vec<i16>,
}

impl PwmOutput for WavOutput {
    fn set_duty(&mut self, duty: u16) {
        // 9-bit duty around the midpoint, scaled to 16-bit PCM
        self.samples.push((duty as i16 - PWM_MIDPOINT as i16) * 128);
    }
}

fn main() {
    let args = Args::parse();

    if args.instrument >= INSTRUMENTS.len() {
        eprintln!("Invalid instrument. Choose 0-{}", INSTRUMENTS.len() - 1);
        std::process::exit(1);
    }

    let script = fs::read_to_string(&args.script).expect("Failed to read key script");
    let key_map = KeyMap::DEFAULT;

    let mut changes = match parse_script(&script, &key_map) {
        Ok(changes) => changes,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };
    changes.sort_by_key(|change| change.time_ms);

    println!(
        "Rendering {} key changes with {}",
        changes.len(),
        INSTRUMENTS[args.instrument].name
    );

    let last_event_ms = changes.last().map(|change| change.time_ms).unwrap_or(0);
    let samples = render(&changes, key_map, args.instrument, last_event_ms + args.tail);

    println!(
        "Rendered {} samples ({:.2} seconds)",
        samples.len(),
        samples.len() as f64 / SAMPLE_RATE as f64
    );

    write_wav(&args.output, &samples);

    println!("Output written to: {}", args.output.display());
}

fn parse_script(script: &str, key_map: &KeyMap) -> Result<Vec<KeyChange>, String> {
    let mut changes = Vec::new();

    for (number, line) in script.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[time, direction, key] = fields.as_slice() else {
            return Err(format!("line {}: expected `<ms> <down|up> <key>`", number + 1));
        };

        let time_ms = time
            .parse()
            .map_err(|_| format!("line {}: invalid time `{}`", number + 1, time))?;

        let down = match direction {
            "down" => true,
            "up" => false,
            other => return Err(format!("line {}: invalid direction `{}`", number + 1, other)),
        };

        let logical = match key {
            "select" => LogicalKey::InstrumentSelect,
            note => LogicalKey::Note(
                note.parse()
                    .map_err(|_| format!("line {}: invalid key `{}`", number + 1, note))?,
            ),
        };

        let Some(key_line) = key_map.line_of(logical) else {
            return Err(format!("line {}: key `{}` is not on the keyboard", number + 1, key));
        };

        changes.push(KeyChange {
            time_ms,
            line: key_line,
            down,
        });
    }

    Ok(changes)
}

fn render(changes: &[KeyChange], key_map: KeyMap, instrument: usize, duration_ms: u64) -> Vec<i16> {
    let signal = Signal::<NoopRawMutex, KeyMask>::new();
    let mut synth_engine = SynthEngine::new(&signal, key_map);
    synth_engine.select_instrument(instrument);

    let total_samples = duration_ms * SAMPLE_RATE as u64 / 1000;
    let mut clock = FreeRunningClock;
    let mut output = WavOutput {
        samples: Vec::with_capacity(total_samples as usize),
    };

    let mut held: KeyMask = 0;
    let mut change_index = 0;

    block_on(async {
        while (output.samples.len() as u64) < total_samples {
            let now_ms = output.samples.len() as u64 * 1000 / SAMPLE_RATE as u64;

            // Apply every change due before this tick, the engine only sees the
            // resulting mask, just like a slow key scan would
            let mut dirty = false;
            while change_index < changes.len() && changes[change_index].time_ms <= now_ms {
                let change = changes[change_index];
                if change.down {
                    held |= 1 << change.line;
                } else {
                    held &= !(1 << change.line);
                }
                dirty = true;
                change_index += 1;
            }
            if dirty {
                signal.signal(held);
            }

            synth_engine.tick(&mut clock, &mut output).await;
        }
    });

    debug_assert_eq!(output.samples.len() % SAMPLES_PER_TICK, 0);
    output.samples
}

fn write_wav(path: &Path, samples: &[i16]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create output directory");
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).expect("Failed to create WAV file");

    for &sample in samples {
        writer
            .write_sample(sample)
            .expect("Failed to write sample");
    }

    writer.finalize().expect("Failed to finalize WAV file");
}
