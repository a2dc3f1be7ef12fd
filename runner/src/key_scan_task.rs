use defmt::{debug, info};
use embassy_executor::SpawnToken;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Ticker, Timer};
use keys::KeyMask;
use keys::matrix::{self, COLUMNS, ROWS};
use static_cell::StaticCell;

use crate::hardware::KeyboardHardware;

const SCAN_RATE_HZ: u64 = 1000;
/// Time for the column lines to follow a row change
const ROW_SETTLE_US: u64 = 5;

/// Latest scanned key mask, overwritten on every scan
pub static KEY_SIGNAL: Signal<CriticalSectionRawMutex, KeyMask> = Signal::new();

pub struct KeyScanTaskState<'a> {
    keyboard: KeyboardHardware<'a>,
}

impl<'a> KeyScanTaskState<'a> {
    pub fn new(keyboard: KeyboardHardware<'a>) -> Self {
        Self { keyboard }
    }

    async fn scan(&mut self) -> KeyMask {
        let mut readings = [[false; COLUMNS]; ROWS];

        for (row, row_pin) in self.keyboard.rows.iter_mut().enumerate() {
            row_pin.set_low();
            Timer::after_micros(ROW_SETTLE_US).await;

            for (column, column_pin) in self.keyboard.columns.iter().enumerate() {
                readings[row][column] = column_pin.is_low();
            }

            row_pin.set_high();
        }

        matrix::compose(&readings)
    }
}

pub static KEY_SCAN_TASK_STATE: StaticCell<KeyScanTaskState> = StaticCell::new();

pub fn create_key_scan_task(keyboard: KeyboardHardware<'static>) -> SpawnToken<impl Sized> {
    key_scan_task(KEY_SCAN_TASK_STATE.init(KeyScanTaskState::new(keyboard)))
}

#[embassy_executor::task]
pub async fn key_scan_task(state: &'static mut KeyScanTaskState<'static>) {
    info!("Key scan task started");

    let mut ticker = Ticker::every(Duration::from_hz(SCAN_RATE_HZ));
    let mut last_mask: KeyMask = 0;

    loop {
        let mask = state.scan().await;

        if mask != last_mask {
            debug!("Keys: {:#08x}", mask);
            last_mask = mask;
        }

        KEY_SIGNAL.signal(mask);

        ticker.next().await;
    }
}
