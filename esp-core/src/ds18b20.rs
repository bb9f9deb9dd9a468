//! DS18B20 Transaktionen über den 1-Wire Bus
//!
//! Nur Broadcast-Adressierung (SKIP ROM): genau ein Sensor am Bus.
//! Die Auflösung wird nie umkonfiguriert, der Sensor liefert seine
//! Power-On-Auflösung von 12 Bit (1/16 °C).

use crate::crc::crc8;
use crate::onewire::OneWire;
use crate::traits::{CycleCounter, OneWireError, OneWireLine};

/// 1-Wire ROM- und Funktions-Kommandos
pub mod commands {
    /// Alle Geräte ansprechen (keine Adressierung)
    pub const SKIP_ROM: u8 = 0xCC;
    /// Temperaturmessung starten
    pub const CONVERT_T: u8 = 0x44;
    /// Scratchpad lesen (9 Bytes, Temperatur LSB/MSB zuerst)
    pub const READ_SCRATCHPAD: u8 = 0xBE;
}

/// Maximale Wandlungszeit bei 12 Bit Auflösung
pub const CONVERSION_TIME_MS: u64 = 750;

/// Länge des Scratchpads inklusive CRC-Byte
pub const SCRATCHPAD_LEN: usize = 9;

/// Rechnet die Scratchpad-Bytes (LSB, MSB) in Grad Celsius um
///
/// Zweierkomplement, 12 Bit Auflösung.
///
/// # Beispiele
///
/// ```
/// # use esp_core::decode_temperature;
/// assert_eq!(decode_temperature(0x91, 0x01), 25.0625);
/// assert_eq!(decode_temperature(0x00, 0xFF), -16.0);
/// ```
pub fn decode_temperature(lsb: u8, msb: u8) -> f32 {
    let raw = i16::from_le_bytes([lsb, msb]);
    raw as f32 / 16.0
}

impl<L: OneWireLine, C: CycleCounter> OneWire<L, C> {
    /// Startet eine Temperaturmessung
    ///
    /// Wartet NICHT auf das Ende der Wandlung, der Aufrufer muss
    /// [`CONVERSION_TIME_MS`] abwarten.
    ///
    /// # Fehlerbehandlung
    /// Gibt `OneWireError::NoPresence` zurück, ohne ein Byte zu senden, wenn
    /// kein Sensor auf den Reset antwortet.
    pub fn start_conversion(&mut self) -> Result<(), OneWireError> {
        self.transaction(&[commands::SKIP_ROM, commands::CONVERT_T], |_| ())
    }

    /// Liest die Temperatur in °C aus dem Scratchpad (ohne CRC-Prüfung)
    ///
    /// Liest nur die beiden Temperatur-Bytes. Ein gestörter Transfer liefert
    /// einen plausibel aussehenden, aber falschen Wert.
    pub fn read_temperature(&mut self) -> Result<f32, OneWireError> {
        self.transaction(&[commands::SKIP_ROM, commands::READ_SCRATCHPAD], |bus| {
            let lsb = bus.read_byte_unmasked();
            let msb = bus.read_byte_unmasked();
            decode_temperature(lsb, msb)
        })
    }

    /// Liest das komplette Scratchpad (9 Bytes inklusive CRC)
    pub fn read_scratchpad(&mut self) -> Result<[u8; SCRATCHPAD_LEN], OneWireError> {
        self.transaction(&[commands::SKIP_ROM, commands::READ_SCRATCHPAD], |bus| {
            let mut scratchpad = [0u8; SCRATCHPAD_LEN];
            bus.read_bytes_unmasked(&mut scratchpad);
            scratchpad
        })
    }

    /// Wie [`read_temperature`](Self::read_temperature), prüft aber die
    /// Scratchpad-CRC
    ///
    /// # Fehlerbehandlung
    /// - `OneWireError::NoPresence` wenn kein Sensor antwortet
    /// - `OneWireError::CrcMismatch` wenn das 9. Byte nicht passt
    pub fn read_temperature_checked(&mut self) -> Result<f32, OneWireError> {
        let scratchpad = self.read_scratchpad()?;
        if crc8(&scratchpad[..SCRATCHPAD_LEN - 1]) != scratchpad[SCRATCHPAD_LEN - 1] {
            return Err(OneWireError::CrcMismatch);
        }
        Ok(decode_temperature(scratchpad[0], scratchpad[1]))
    }
}
