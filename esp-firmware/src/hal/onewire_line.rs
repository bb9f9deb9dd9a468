// 1-Wire Leitung und Zähler für den ESP32-C6
//
// Implementiert die Traits aus esp-core mit esp-hal:
// - FlexLine: GPIO als Open-Drain Ausgang / Eingang (gpio::Flex)
// - SystimerCounter: freilaufender 1 MHz Zähler (time::Instant)

use esp_core::{CycleCounter, Level, OneWireLine};
use esp_hal::gpio::{DriveMode, Flex, InputConfig, OutputConfig, Pin, Pull};
use esp_hal::time::Instant;

/// 1-Wire Datenleitung auf einem beliebigen GPIO
///
/// Der Ausgang ist Open-Drain: High heißt "loslassen", der externe Pull-Up
/// zieht die Leitung hoch. Der Eingang bleibt dauerhaft aktiv, `set_input()`
/// schaltet nur den Ausgangstreiber ab.
pub struct FlexLine<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexLine<'d> {
    /// Konfiguriert den Pin und setzt die Leitung auf Idle (Ausgang/High)
    pub fn new(pin: impl Pin + 'd) -> Self {
        let mut pin = Flex::new(pin);

        pin.apply_output_config(
            &OutputConfig::default()
                .with_drive_mode(DriveMode::OpenDrain)
                .with_pull(Pull::None),
        );
        pin.apply_input_config(&InputConfig::default().with_pull(Pull::None));

        // Latch vor dem Einschalten des Treibers setzen (kein Low-Glitch)
        pin.set_high();
        pin.set_input_enable(true);
        pin.set_output_enable(true);

        Self { pin }
    }
}

impl OneWireLine for FlexLine<'_> {
    fn set_output(&mut self) {
        self.pin.set_output_enable(true);
    }

    fn set_input(&mut self) {
        self.pin.set_output_enable(false);
    }

    fn write(&mut self, level: Level) {
        match level {
            Level::Low => self.pin.set_low(),
            Level::High => self.pin.set_high(),
        }
    }

    fn read(&mut self) -> Level {
        Level::from(self.pin.is_high())
    }
}

/// Freilaufender Zähler auf Basis des Systimers
///
/// `Instant` zählt Mikrosekunden seit dem Boot, die unteren 32 Bit laufen
/// nach ~71 Minuten über. Das deckt `delay_us` per `wrapping_sub` ab.
#[derive(Default)]
pub struct SystimerCounter;

impl CycleCounter for SystimerCounter {
    fn ticks(&mut self) -> u32 {
        Instant::now().duration_since_epoch().as_micros() as u32
    }

    fn frequency_hz(&self) -> u32 {
        1_000_000
    }
}
