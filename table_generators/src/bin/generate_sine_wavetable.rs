use std::env;
use std::f64::consts::PI;

fn main() {
    let args: Vec<String> = env::args().collect();

    let wavetable_size: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(256);

    eprintln!("Generating sine wavetable:");
    eprintln!("  WAVETABLE_SIZE: {}", wavetable_size);
    eprintln!();

    let mut samples = Vec::with_capacity(wavetable_size);

    for i in 0..wavetable_size {
        // Sampled at the middle of each step so the table has no zero entries
        // and is exactly odd-symmetric around the half period
        let phase = 2.0 * PI * (i as f64 + 0.5) / (wavetable_size as f64);

        // Truncating cast, 128 * sin never reaches 128 at these phases
        samples.push((phase.sin() * 128.0) as i8);
    }

    print!("pub static SINE_WAVETABLE: [i8; {}] = [", wavetable_size);
    for row in samples.chunks(16) {
        println!();
        print!("   ");
        for sample in row {
            print!(" {},", sample);
        }
    }
    println!();
    println!("];");

    eprintln!();
    eprintln!("Sanity checks:");
    eprintln!("  Sample at 0° (i=0): {} (expected: ~0)", samples[0]);
    eprintln!(
        "  Sample at 90° (i={}): {} (expected: 127)",
        wavetable_size / 4,
        samples[wavetable_size / 4]
    );
    eprintln!(
        "  Sample at 270° (i={}): {} (expected: -127)",
        wavetable_size * 3 / 4,
        samples[wavetable_size * 3 / 4]
    );
}
