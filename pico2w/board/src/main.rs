#![no_std]
#![no_main]

mod timer;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use sonar_lcd::{Config as HcsrConfig, Hcsr04, Lcd, Monitor};
use timer::MicrosTimer;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Running!");

    // --- HC-SR04: echo goes through a 5V -> 3.3V divider ---
    let trigger = Output::new(p.PIN_12, Level::Low);
    let echo = Input::new(p.PIN_13, Pull::Down);

    // --- LCD control lines ---
    let rs = Output::new(p.PIN_0, Level::Low);
    let rw = Output::new(p.PIN_1, Level::Low);
    let en = Output::new(p.PIN_2, Level::Low);

    // --- LCD data bus, D0..D7 ---
    let data = [
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
        Output::new(p.PIN_10, Level::Low),
    ];

    let sensor = Hcsr04::new(
        trigger,
        echo,
        MicrosTimer::new(),
        Delay,
        HcsrConfig::DEFAULT,
    );
    let display = Lcd::new(rs, rw, en, data, Delay);

    let mut monitor = Monitor::new(sensor, display, Delay);
    unwrap!(monitor.setup());
    info!("Display ready");

    // Sole task: the loop busy-waits and never yields.
    monitor.run()
}
