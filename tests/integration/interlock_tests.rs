//! Probe → pump interlocks and the button toggle, driven through the full
//! control loop.

use sparge::alarm::AlarmAggregator;
use sparge::config::{BoilSettings, ControllerConfig};
use sparge::drivers::Polarity;
use sparge::drivers::continuous_pump::MASH_HIGH_ALARM;
use sparge::drivers::pulsed_pump::PulsedPump;
use sparge::drivers::pump::PumpController;
use sparge::sensors::{DigitalProbe, LiquidProbe};

use crate::mock_hw::{LogSink, MockPin};
use crate::rig::Rig;

#[test]
fn touching_mash_probe_stops_water_pump() {
    let config = ControllerConfig::default();
    let settings = BoilSettings::new(&config);
    let log = LogSink::new();
    let mut rig = Rig::new(&config, &settings, &log);

    rig.click(rig.water_button_pin.clone(), 0, 50);
    assert!(rig.water_pump.is_active());

    // Activated at the end of tick 0, so the delay counts from tick 1.
    rig.run(50, 5_001);
    assert!(!rig.water_pump.is_running());
    rig.tick(5_001);
    assert!(rig.water_pump.is_running());
    assert!(rig.water_pump_pin.high());

    rig.mash_pin.set_high(true);
    rig.run(5_002, 8_000);
    assert!(!rig.water_pump.is_running());
    assert!(!rig.water_pump_pin.high());
    assert!(!rig.alarms.is_raised(MASH_HIGH_ALARM));
    assert!(!rig.buzzer.is_sounding());

    rig.mash_high_pin.set_high(true);
    rig.tick(8_000);
    assert!(rig.alarms.is_raised(MASH_HIGH_ALARM));
    assert!(rig.buzzer.is_sounding());
    assert!(rig.buzzer_pin.high());

    assert_eq!(
        log.messages_for("Water Pump"),
        vec!["State has changed to ON", "State has changed to OFF"]
    );
}

#[test]
fn water_pump_waits_full_delay_after_probe_clears() {
    let config = ControllerConfig::default();
    let settings = BoilSettings::new(&config);
    let log = LogSink::new();
    let mut rig = Rig::new(&config, &settings, &log);

    rig.click(rig.water_button_pin.clone(), 0, 50);
    rig.mash_pin.set_high(true);
    rig.run(50, 10_000);
    assert!(!rig.water_pump.is_running());

    rig.mash_pin.set_high(false);
    let cleared_at = 10_000;
    for t in cleared_at..cleared_at + config.water_pump_delay_ms {
        rig.tick(t);
        assert!(!rig.water_pump_pin.high(), "pump on early at t={t}");
    }
    rig.tick(cleared_at + config.water_pump_delay_ms);
    assert!(rig.water_pump_pin.high());
}

#[test]
fn wort_pump_cycles_fifteen_seconds_per_minute() {
    let log = LogSink::new();
    let boil_probe_pin = MockPin::new(false);
    let pump_pin = MockPin::new(false);
    let mut boil_probe = DigitalProbe::new("Boil Probe", boil_probe_pin, Polarity::ActiveHigh, &log);
    let mut pump = PulsedPump::new("Wort Pump", pump_pin.clone(), Polarity::ActiveHigh, &ControllerConfig::default(), &log);
    let mut alarms = AlarmAggregator::new("Alarm");

    // Run-length encode the relay level over two minutes.
    let mut phases: Vec<(bool, u64)> = Vec::new();
    for t in 0..120_000 {
        boil_probe.advance(t);
        pump.advance(t, &boil_probe, &mut alarms);
        match phases.last_mut() {
            Some((level, len)) if *level == pump_pin.high() => *len += 1,
            _ => phases.push((pump_pin.high(), 1)),
        }
    }

    assert_eq!(
        phases,
        vec![(false, 45_000), (true, 15_000), (false, 45_000), (true, 15_000)]
    );
    assert!(!alarms.is_active());
}

#[test]
fn touching_boil_probe_stops_wort_pump_and_pulses_alarm() {
    let log = LogSink::new();
    let boil_probe_pin = MockPin::new(false);
    let pump_pin = MockPin::new(false);
    let mut boil_probe =
        DigitalProbe::new("Boil Probe", boil_probe_pin.clone(), Polarity::ActiveHigh, &log);
    let mut pump = PulsedPump::new("Wort Pump", pump_pin.clone(), Polarity::ActiveHigh, &ControllerConfig::default(), &log);
    let mut alarms = AlarmAggregator::new("Alarm");

    for t in 0..50_000 {
        boil_probe.advance(t);
        pump.advance(t, &boil_probe, &mut alarms);
    }
    assert!(pump_pin.high());

    boil_probe_pin.set_high(true);
    let mut raised_ticks = 0;
    for t in 50_000..52_000 {
        boil_probe.advance(t);
        pump.advance(t, &boil_probe, &mut alarms);
        assert!(!pump_pin.high(), "pump on while probe touching at t={t}");
        if alarms.is_active() {
            raised_ticks += 1;
        }
    }
    // Four 500 ms half-periods: on, off, on, off.
    assert_eq!(raised_ticks, 1_000);
}

#[test]
fn button_press_toggles_once_per_hold() {
    let config = ControllerConfig::default();
    let settings = BoilSettings::new(&config);
    let log = LogSink::new();
    let mut rig = Rig::new(&config, &settings, &log);

    rig.water_button_pin.set_high(false);
    rig.tick(0);
    assert!(rig.water_button.matching_function());
    assert!(rig.alarms.is_raised("Water Button"));
    assert!(rig.water_light.high());
    assert!(rig.buzzer.is_sounding());

    rig.run(1, 10);
    assert!(rig.alarms.is_raised("Water Button"));
    rig.tick(10);
    assert!(!rig.alarms.is_raised("Water Button"));
    assert!(!rig.buzzer_pin.high());

    rig.run(11, 600);
    assert!(rig.water_button.matching_function());
    assert!(!rig.water_button.is_eligible());

    rig.water_button_pin.set_high(true);
    rig.tick(600);
    assert!(rig.water_button.is_eligible());

    assert_eq!(log.messages_for("Water Button"), vec!["currently pushed."]);
}

#[test]
fn second_press_inside_cooldown_is_ignored() {
    let config = ControllerConfig::default();
    let settings = BoilSettings::new(&config);
    let log = LogSink::new();
    let mut rig = Rig::new(&config, &settings, &log);

    rig.click(rig.wort_button_pin.clone(), 0, 40);
    rig.run(40, 200);
    rig.click(rig.wort_button_pin.clone(), 200, 40);
    rig.run(240, 1_000);
    assert!(rig.wort_button.matching_function());
    assert!(rig.wort_pump.is_active());

    rig.click(rig.wort_button_pin.clone(), 1_000, 40);
    rig.tick(1_040);
    assert!(!rig.wort_button.matching_function());
    assert!(!rig.wort_pump.is_active());
    assert!(!rig.wort_light.high());
}
