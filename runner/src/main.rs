#![no_std]
#![no_main]

mod audio_task;
mod hardware;
mod key_scan_task;
mod synth_engine_task;

use defmt::info;
use embassy_executor::Executor;
use static_cell::StaticCell;

use defmt_rtt as _;
use panic_probe as _;

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

#[cortex_m_rt::entry]
fn main() -> ! {
    let hardware = hardware::Hardware::get();

    let executor = EXECUTOR.init(Executor::new());

    info!("Starting tasks");

    executor.run(|spawner| {
        spawner
            .spawn(key_scan_task::create_key_scan_task(hardware.keyboard))
            .unwrap();

        spawner
            .spawn(synth_engine_task::create_task(hardware.audio))
            .unwrap();
    })
}
