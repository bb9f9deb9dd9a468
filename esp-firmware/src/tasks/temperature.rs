// Temperatur Task - Pollt den DS18B20 über den 1-Wire Bus
use defmt::{debug, error, info, warn};
use embassy_time::{Duration, Timer};

use crate::config::{
    CONVERSION_WAIT_MS, ONEWIRE_GPIO_PIN, SAMPLE_INTERVAL_SECS, SENSOR_LOST_THRESHOLD,
    VERIFY_SCRATCHPAD_CRC,
};
use crate::hal::{FlexLine, SystimerCounter};
use crate::{CycleCounter, OneWire, OneWireError, OneWireLine, SampleTracker, TemperaturePublisher};

/// Ein Messzyklus: Wandlung starten, warten, Scratchpad lesen
///
/// Die Transaktionen selbst laufen blockierend in einer Critical Section.
/// Nur die Wandlungszeit dazwischen wird async abgewartet, die Leitung steht
/// dabei auf Idle/High.
async fn measure<L: OneWireLine, C: CycleCounter>(
    bus: &mut OneWire<L, C>,
) -> Result<f32, OneWireError> {
    bus.start_conversion()?;
    Timer::after(Duration::from_millis(CONVERSION_WAIT_MS)).await;

    if VERIFY_SCRATCHPAD_CRC {
        bus.read_temperature_checked()
    } else {
        bus.read_temperature()
    }
}

/// Temperatur Logic - Testbare Sampling-Schleife ohne Hardware-Abhängigkeit
///
/// - Misst alle `SAMPLE_INTERVAL_SECS` Sekunden
/// - Hält bei Fehlern den letzten gültigen Wert (als veraltet markiert)
/// - Sendet jede Messung via Channel an den Report-Task
///
/// # Trait-basierte Abstraktion
/// Die generischen Parameter `L: OneWireLine` und `C: CycleCounter` erlauben
/// echte Hardware (FlexLine + SystimerCounter) oder einen simulierten Bus.
pub async fn temperature_logic<L: OneWireLine, C: CycleCounter>(
    mut bus: OneWire<L, C>,
    publisher: TemperaturePublisher,
) {
    let mut tracker = SampleTracker::new();

    loop {
        let result = measure(&mut bus).await;

        match result {
            Ok(celsius) => debug!("DS18B20: {} °C", celsius),
            Err(e) => warn!("DS18B20: measurement failed: {}", e),
        }

        let reading = tracker.record(result);
        if reading.consecutive_failures == SENSOR_LOST_THRESHOLD {
            error!(
                "DS18B20: no valid reading for {} cycles, check wiring and pull-up",
                SENSOR_LOST_THRESHOLD
            );
        }

        publisher.publish_immediate(reading);

        Timer::after(Duration::from_secs(SAMPLE_INTERVAL_SECS)).await;
    }
}

/// Temperatur Task - Embassy Task für parallele Ausführung
///
/// Dieser Task übernimmt die Hardware-Initialisierung und ruft dann
/// die testbare `temperature_logic()` Funktion auf.
///
/// # Parameter
/// - `gpio4`: GPIO4 Peripheral für die 1-Wire Datenleitung
/// - `publisher`: PubSub Publisher für Temperatur-Messungen
#[embassy_executor::task]
pub async fn temperature_task(
    gpio4: esp_hal::peripherals::GPIO4<'static>,
    publisher: TemperaturePublisher,
) {
    // Hardware initialisieren: Leitung auf Idle/High, Zähler = Systimer
    let line = FlexLine::new(gpio4);
    let mut bus = OneWire::new(line, SystimerCounter);

    info!("DS18B20: 1-Wire bus ready on GPIO{}", ONEWIRE_GPIO_PIN);
    if !bus.reset() {
        warn!("DS18B20: no presence pulse at startup, will keep polling");
    }

    temperature_logic(bus, publisher).await;
}
