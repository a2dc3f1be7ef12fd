pub const TONE_COUNT: usize = 48;

pub static TONE_PHASE_INCREMENT: [u16; TONE_COUNT] = [
    274, // C3
    291, // C#3
    308, // D3
    326, // D#3
    346, // E3
    366, // F3
    388, // F#3
    411, // G3
    435, // G#3
    461, // A3
    489, // A#3
    518, // B3
    549, // C4
    581, // C#4
    616, // D4
    652, // D#4
    691, // E4
    732, // F4
    776, // F#4
    822, // G4
    871, // G#4
    923, // A4
    978, // A#4
    1036, // B4
    1097, // C5
    1163, // C#5
    1232, // D5
    1305, // D#5
    1383, // E5
    1465, // F5
    1552, // F#5
    1644, // G5
    1742, // G#5
    1845, // A5
    1955, // A#5
    2071, // B5
    2195, // C6
    2325, // C#6
    2463, // D6
    2610, // D#6
    2765, // E6
    2930, // F6
    3104, // F#6
    3288, // G6
    3484, // G#6
    3691, // A6
    3910, // A#6
    4143, // B6
];
