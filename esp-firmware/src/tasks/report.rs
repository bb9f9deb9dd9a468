// Report Task - Gibt Messungen an den Uplink weiter
//
// Der Modem-/Netzwerk-Teil ist nicht Teil dieser Firmware, der Task
// protokolliert den ausgehenden Datensatz.
use defmt::{info, warn};

use crate::config::DEVICE_ID;
use crate::{TemperatureReading, TemperatureSubscriber};

/// Protokolliert einen Datensatz
fn report(reading: &TemperatureReading) {
    match (reading.celsius, reading.fresh) {
        (Some(celsius), true) => {
            info!(
                "Report [{}] #{}: temp={} °C",
                DEVICE_ID, reading.sequence, celsius
            );
        }
        (Some(celsius), false) => {
            warn!(
                "Report [{}] #{}: temp={} °C (stale, {} failed cycles)",
                DEVICE_ID, reading.sequence, celsius, reading.consecutive_failures
            );
        }
        (None, _) => {
            warn!(
                "Report [{}] #{}: no temperature yet ({})",
                DEVICE_ID, reading.sequence, reading.error
            );
        }
    }
}

/// Report Task - läuft parallel zum Temperatur Task
///
/// Empfängt jede Messung via Channel (event-basiert) und gibt sie aus.
///
/// # Parameter
/// - `subscriber`: PubSub Subscriber für Temperatur-Messungen
#[embassy_executor::task]
pub async fn report_task(mut subscriber: TemperatureSubscriber) {
    info!("Report: Task started as {}", DEVICE_ID);

    loop {
        let reading = subscriber.next_message_pure().await;
        report(&reading);
    }
}
