//! Sparge controller firmware entry point.
//!
//! Single cooperative loop, one clock read per tick:
//!
//! ```text
//! ┌─────────┐   ┌──────────┐   ┌──────────┐   ┌─────────┐   ┌────────┐
//! │ probes  │──▶│  pumps   │──▶│ buttons  │──▶│ pump    │──▶│ buzzer │
//! │ advance │   │ advance  │   │ advance  │   │ override│   │advance │
//! └─────────┘   └────┬─────┘   └────┬─────┘   └─────────┘   └───▲────┘
//!                    │  raise/clear │ click                     │
//!                    └──────────────┴────▶ AlarmAggregator ─────┘
//! ```
//!
//! ## Wiring (ESP32-S3 dev board)
//!
//! | Signal          | GPIO | Polarity    | Notes                       |
//! |-----------------|------|-------------|-----------------------------|
//! | Mash probe      | 4    | active-high | pull-down, probe to 3V3     |
//! | Mash high probe | 5    | active-high | pull-down, probe to 3V3     |
//! | Water pump      | 6    | active-high | relay                       |
//! | Wort pump       | 7    | active-high | relay                       |
//! | Water button    | 15   | active-low  | pull-up, switch to GND      |
//! | Water light     | 16   | active-high |                             |
//! | Wort button     | 17   | active-low  | pull-up, switch to GND      |
//! | Wort light      | 18   | active-high |                             |
//! | Buzzer          | 8    | active-high |                             |
//! | MPRLS SDA / SCL | 1/2  |             | I2C0, 100 kHz               |
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::info;

use sparge::adapters::log_sink::SerialLog;
use sparge::adapters::mprls::Mprls;
use sparge::adapters::time::MonotonicClock;
use sparge::alarm::AlarmAggregator;
use sparge::config::{BoilSettings, BoilStop, ControllerConfig};
use sparge::drivers::Polarity;
use sparge::drivers::button::DebouncedButton;
use sparge::drivers::buzzer::Buzzer;
use sparge::drivers::continuous_pump::ContinuousPump;
use sparge::drivers::pulsed_pump::PulsedPump;
use sparge::drivers::pump::PumpController;
use sparge::sensors::{DigitalProbe, LevelSensor, LiquidProbe};

const I2C_HZ: u32 = 100_000;
/// How often the kettle status line is logged.
const STATUS_INTERVAL_MS: u64 = 5_000;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Sparge controller v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration (volatile, defaults on every boot) ───
    let config = ControllerConfig::default();
    config.validate()?;
    let settings = BoilSettings::new(&config);

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    let mut mash_pin = PinDriver::input(pins.gpio4)?;
    mash_pin.set_pull(Pull::Down)?;
    let mut mash_high_pin = PinDriver::input(pins.gpio5)?;
    mash_high_pin.set_pull(Pull::Down)?;
    let mut water_button_pin = PinDriver::input(pins.gpio15)?;
    water_button_pin.set_pull(Pull::Up)?;
    let mut wort_button_pin = PinDriver::input(pins.gpio17)?;
    wort_button_pin.set_pull(Pull::Up)?;

    let i2c = I2cDriver::new(
        peripherals.i2c0,
        pins.gpio1,
        pins.gpio2,
        &I2cConfig::new().baudrate(Hertz(I2C_HZ)),
    )?;

    // ── 4. Components ─────────────────────────────────────────
    let log = SerialLog::new();
    let clock = MonotonicClock::new();
    let mut alarms = AlarmAggregator::new("Alarm");

    let mut mash_probe = DigitalProbe::new("Mash Probe", mash_pin, Polarity::ActiveHigh, log);
    let mut mash_high_probe =
        DigitalProbe::new("Mash Probe High", mash_high_pin, Polarity::ActiveHigh, log);
    let mut kettle = LevelSensor::new("Boil Kettle", Mprls::new(i2c), &settings, &config, log);

    let mut water_pump = ContinuousPump::new(
        "Water Pump",
        PinDriver::output(pins.gpio6)?,
        Polarity::ActiveHigh,
        config.water_pump_delay_ms,
        log,
    );
    let mut wort_pump = PulsedPump::new(
        "Wort Pump",
        PinDriver::output(pins.gpio7)?,
        Polarity::ActiveHigh,
        &config,
        log,
    );

    let mut water_button = DebouncedButton::new(
        "Water Button",
        water_button_pin,
        PinDriver::output(pins.gpio16)?,
        &config,
        log,
    );
    let mut wort_button = DebouncedButton::new(
        "Wort Button",
        wort_button_pin,
        PinDriver::output(pins.gpio18)?,
        &config,
        log,
    );

    let mut buzzer = Buzzer::new("Buzzer", PinDriver::output(pins.gpio8)?, Polarity::ActiveHigh, log);

    // Both pumps stay off until their button is pressed.
    water_pump.set_active(water_button.matching_function());
    wort_pump.set_active(wort_button.matching_function());

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    let mut last_status_ms = 0;
    loop {
        let now = clock.now_ms();

        mash_probe.advance(now);
        mash_high_probe.advance(now);
        kettle.advance(now);

        water_pump.advance(now, &mash_probe, &mash_high_probe, &mut alarms);
        wort_pump.advance(now, &kettle, &mut alarms);

        water_button.advance(now, &mut alarms);
        wort_button.advance(now, &mut alarms);

        // Takes effect on the pumps' next advance.
        water_pump.set_active(water_button.matching_function());
        wort_pump.set_active(wort_button.matching_function());

        buzzer.advance(now, &alarms);

        if now.saturating_sub(last_status_ms) >= STATUS_INTERVAL_MS {
            last_status_ms = now;
            info!(
                "Kettle {} ({}, {:.1}/{:.1} gal)",
                kettle.display(),
                settings.active_stop(),
                settings.stop_gal(BoilStop::One),
                settings.stop_gal(BoilStop::Two),
            );
        }

        FreeRtos::delay_ms(1);
    }
}
