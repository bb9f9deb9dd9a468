//! Core Types für die Temperatur-Erfassung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use crate::traits::OneWireError;

/// Temperatur-Messung für Channel-Kommunikation
///
/// Wird vom Sensor-Task an den Report-Task geschickt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    /// Fortlaufende Nummer des Messzyklus
    pub sequence: u32,
    /// Letzte gültige Temperatur in °C (`None` solange noch nie gemessen wurde)
    pub celsius: Option<f32>,
    /// `true` wenn `celsius` aus diesem Zyklus stammt
    pub fresh: bool,
    /// Anzahl fehlgeschlagener Zyklen in Folge
    pub consecutive_failures: u32,
    /// Fehler des aktuellen Zyklus (falls vorhanden)
    pub error: Option<OneWireError>,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for crate::traits::Level {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            crate::traits::Level::Low => defmt::write!(fmt, "Low"),
            crate::traits::Level::High => defmt::write!(fmt, "High"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OneWireError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            OneWireError::NoPresence => defmt::write!(fmt, "NoPresence"),
            OneWireError::CrcMismatch => defmt::write!(fmt, "CrcMismatch"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TemperatureReading {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "TemperatureReading {{ seq: {}, celsius: {}, fresh: {}, failures: {}, error: {} }}",
            self.sequence,
            self.celsius,
            self.fresh,
            self.consecutive_failures,
            self.error
        )
    }
}
