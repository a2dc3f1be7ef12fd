use std::env;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Semitones between C3 (index 0) and A4
const A4_INDEX: i32 = 21;
const A4_FREQUENCY: f64 = 440.0;

fn main() {
    let args: Vec<String> = env::args().collect();

    let sample_rate: f64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(31_250.0);
    let tone_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(48);

    eprintln!("Generating phase increment table:");
    eprintln!("  SAMPLE_RATE: {}", sample_rate);
    eprintln!("  TONE_COUNT: {}", tone_count);
    eprintln!();

    println!("pub const TONE_COUNT: usize = {};", tone_count);
    println!();
    print!("pub static TONE_PHASE_INCREMENT: [u16; TONE_COUNT] = [");

    let mut increments = Vec::with_capacity(tone_count);

    for i in 0..tone_count {
        let frequency = A4_FREQUENCY * 2f64.powf((i as i32 - A4_INDEX) as f64 / 12.0);

        // One period is 65536 steps of a 16-bit phase accumulator
        let increment = (frequency * 65536.0 / sample_rate + 0.5) as u16;
        increments.push(increment);

        println!();
        print!("    {}, // {}{}", increment, NOTE_NAMES[i % 12], 3 + i / 12);
    }

    println!();
    println!("];");

    eprintln!();
    eprintln!("Sanity checks:");
    if let Some(a4) = increments.get(A4_INDEX as usize) {
        eprintln!(
            "  A4 increment: {} ({:.2} Hz)",
            a4,
            *a4 as f64 * sample_rate / 65536.0
        );
    }
}
