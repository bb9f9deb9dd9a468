//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use crate::traits::OneWireError;
use crate::types::TemperatureReading;

/// Merkt sich die letzte gültige Temperatur über Messzyklen hinweg
///
/// Schlägt ein Zyklus fehl, wird der letzte gültige Wert erneut gemeldet,
/// aber als nicht frisch markiert.
#[derive(Debug, Default)]
pub struct SampleTracker {
    sequence: u32,
    last_celsius: Option<f32>,
    consecutive_failures: u32,
}

impl SampleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verbucht das Ergebnis eines Messzyklus und erzeugt die Meldung dafür
    ///
    /// # Beispiele
    ///
    /// ```
    /// # use esp_core::{OneWireError, SampleTracker};
    /// let mut tracker = SampleTracker::new();
    /// let first = tracker.record(Ok(21.5));
    /// assert!(first.fresh);
    ///
    /// let second = tracker.record(Err(OneWireError::NoPresence));
    /// assert_eq!(second.celsius, Some(21.5));
    /// assert!(!second.fresh);
    /// ```
    pub fn record(&mut self, result: Result<f32, OneWireError>) -> TemperatureReading {
        self.sequence = self.sequence.wrapping_add(1);

        let (fresh, error) = match result {
            Ok(celsius) => {
                self.last_celsius = Some(celsius);
                self.consecutive_failures = 0;
                (true, None)
            }
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                (false, Some(e))
            }
        };

        TemperatureReading {
            sequence: self.sequence,
            celsius: self.last_celsius,
            fresh,
            consecutive_failures: self.consecutive_failures,
            error,
        }
    }

    /// Fehlgeschlagene Zyklen seit der letzten gültigen Messung
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}
