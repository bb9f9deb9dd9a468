//! Hardware Abstraction Traits
//!
//! Diese Traits definieren die Schnittstellen, die der 1-Wire Master von der
//! Hardware braucht: eine GPIO-Leitung und einen freilaufenden Zähler.
//! Keine konkrete Implementierung hier.

/// Logik-Pegel auf der 1-Wire Leitung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn is_low(self) -> bool {
        self == Level::Low
    }

    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// Fehler-Typ für 1-Wire Transaktionen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneWireError {
    /// Kein Presence-Puls nach dem Reset (Sensor fehlt, falsch verdrahtet
    /// oder Timing verletzt - nicht unterscheidbar)
    NoPresence,
    /// Scratchpad-CRC stimmt nicht (nur bei `read_temperature_checked`)
    CrcMismatch,
}

/// Trait für die 1-Wire Datenleitung
///
/// Die Leitung ist Open-Drain: `write(Level::High)` gibt die Leitung nur frei,
/// der externe Pull-Up zieht sie hoch. Konfigurationsfehler werden nicht
/// modelliert.
///
/// # Implementierungen
/// - **Production:** FlexLine (ESP32 GPIO im Open-Drain Modus)
/// - **Testing:** SimLine (simulierter Bus mit Sensor-Modell)
pub trait OneWireLine {
    /// Schaltet die Leitung auf Open-Drain Ausgang
    fn set_output(&mut self);

    /// Schaltet die Leitung auf Eingang (kein Pull)
    fn set_input(&mut self);

    /// Zieht die Leitung auf Low oder gibt sie frei (nur im Ausgangsmodus)
    fn write(&mut self, level: Level);

    /// Liest den aktuellen Pegel (nur im Eingangsmodus sinnvoll)
    fn read(&mut self) -> Level;
}

/// Trait für einen freilaufenden Zähler mit bekannter Frequenz
///
/// Der Zähler darf überlaufen, Differenzen werden mit `wrapping_sub` gebildet.
pub trait CycleCounter {
    /// Aktueller Zählerstand
    fn ticks(&mut self) -> u32;

    /// Zählfrequenz in Hz (z.B. CPU-Takt oder 1 MHz Systimer)
    fn frequency_hz(&self) -> u32;
}
