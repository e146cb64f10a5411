//! Boil-kettle level sensing over a simulated MPRLS, feeding the wort pump.

use sparge::config::{BoilSettings, BoilStop, ControllerConfig, DisplayUnits};
use sparge::drivers::pulsed_pump::BOIL_PROBE_ALARM;
use sparge::drivers::pump::PumpController;
use sparge::sensors::LiquidProbe;
use sparge::sensors::level::WINDOW;

use crate::mock_hw::LogSink;
use crate::rig::{EMPTY_HPA, Rig, counts_for_hpa};

/// Rig with the wort pump switched on and the kettle calibrated empty.
fn wort_running<'a>(config: &ControllerConfig, settings: &'a BoilSettings, log: &'a LogSink) -> Rig<'a> {
    let mut rig = Rig::new(config, settings, log);
    rig.click(rig.wort_button_pin.clone(), 0, 50);
    assert!(rig.kettle.is_calibrated());
    rig.run(50, 45_001);
    assert!(rig.wort_pump.is_running());
    rig
}

#[test]
fn kettle_calibrates_after_one_window() {
    let config = ControllerConfig::default();
    let settings = BoilSettings::new(&config);
    let log = LogSink::new();
    let mut rig = Rig::new(&config, &settings, &log);

    // The first poll only starts a conversion.
    rig.run(0, WINDOW as u64);
    assert!(!rig.kettle.is_calibrated());
    assert!(rig.kettle.is_touching());
    assert_eq!(rig.kettle.display().as_str(), "----");

    rig.tick(WINDOW as u64);
    assert!(rig.kettle.is_calibrated());
    assert!(!rig.kettle.is_touching());
    assert_eq!(rig.kettle.display().as_str(), "0.0");
    assert_eq!(
        log.messages_for("Boil Kettle"),
        vec!["Connected - zero set to 1000.00", "State has changed to CLEAR"]
    );
}

#[test]
fn full_kettle_stops_wort_pump() {
    let config = ControllerConfig::default();
    let settings = BoilSettings::new(&config);
    let log = LogSink::new();
    let mut rig = wort_running(&config, &settings, &log);

    // 14 hPa above empty = 7 gallons, past the 6 gallon first stop.
    rig.bus.set_counts(counts_for_hpa(EMPTY_HPA + 14.0));
    rig.run(45_001, 45_001 + WINDOW as u64);
    assert!(rig.kettle.is_touching());
    assert!(!rig.wort_pump.is_running());
    assert!(!rig.wort_pump_pin.high());
    assert!(rig.alarms.is_raised(BOIL_PROBE_ALARM));
    assert_eq!(rig.kettle.display().as_str(), "7.0");

    settings.set_display_units(DisplayUnits::Pressure);
    assert_eq!(rig.kettle.display().as_str(), "14.00");

    // 7 gallons is below the 7.5 gallon second stop.
    settings.select_stop(BoilStop::Two);
    rig.tick(46_000);
    assert!(!rig.kettle.is_touching());
    assert!(!rig.alarms.is_raised(BOIL_PROBE_ALARM));

    // The forced-off phase still counts from the 45000 switch-on.
    rig.run(46_001, 90_000);
    assert!(!rig.wort_pump.is_running());
    rig.tick(90_000);
    assert!(rig.wort_pump.is_running());
}

#[test]
fn raising_the_stop_from_the_menu_reopens_the_interlock() {
    let config = ControllerConfig::default();
    let settings = BoilSettings::new(&config);
    let log = LogSink::new();
    let mut rig = wort_running(&config, &settings, &log);

    rig.bus.set_counts(counts_for_hpa(EMPTY_HPA + 13.0));
    rig.run(45_001, 45_100);
    assert!(rig.kettle.is_touching());

    // 6.0 -> 7.0 gallons in two menu steps; 6.5 gallons is now below it.
    settings.adjust_stop(BoilStop::One, 2);
    rig.tick(45_100);
    assert!(!rig.kettle.is_touching());
}

#[test]
fn unplugged_transducer_fails_safe() {
    let config = ControllerConfig::default();
    let settings = BoilSettings::new(&config);
    let log = LogSink::new();
    let mut rig = wort_running(&config, &settings, &log);

    rig.bus.unplug(true);
    rig.tick(45_001);
    assert!(!rig.kettle.is_calibrated());
    assert!(rig.kettle.is_touching());
    assert!(!rig.wort_pump_pin.high());

    rig.run(45_002, 47_000);
    assert!(!rig.wort_pump.is_running());
    assert_eq!(
        log.messages_for("Boil Kettle")
            .iter()
            .filter(|m| m.as_str() == "Disconnected - recalibrating")
            .count(),
        1
    );

    rig.bus.unplug(false);
    rig.run(47_000, 47_000 + WINDOW as u64 + 1);
    assert!(rig.kettle.is_calibrated());
    assert!(!rig.kettle.is_touching());
}
