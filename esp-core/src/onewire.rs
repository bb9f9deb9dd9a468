//! 1-Wire Bus Master (Bit-Banging)
//!
//! Reset/Presence, Bit-Slots und Byte-Framing auf einer einzelnen Leitung.
//! Jede öffentliche Operation läuft in einer Critical Section, damit kein
//! Interrupt die Slot-Timings verschiebt.
//!
//! Invariante: Außerhalb einer Operation steht die Leitung auf Ausgang/High
//! (Idle). Das gilt auch, wenn der Reset keinen Sensor findet.

use crate::timing::{
    PRESENCE_HOLD_US, PRESENCE_SAMPLE_US, READ_INIT_LOW_US, READ_RELEASE_US, READ_SAMPLE_US,
    RESET_LOW_US, WRITE_0_LOW_US, WRITE_0_RELEASE_US, WRITE_1_LOW_US, WRITE_1_RELEASE_US,
    delay_us,
};
use crate::traits::{CycleCounter, Level, OneWireError, OneWireLine};

/// 1-Wire Bus Handle
///
/// Besitzt die Leitung und den Zähler. Keine Geräte-Adressierung, nur
/// Broadcast (SKIP ROM). Alle Operationen nehmen `&mut self`, es kann also
/// immer nur eine Transaktion gleichzeitig laufen.
pub struct OneWire<L, C> {
    line: L,
    counter: C,
}

impl<L: OneWireLine, C: CycleCounter> OneWire<L, C> {
    /// Übernimmt Leitung und Zähler und setzt den Bus auf Idle (Ausgang/High)
    pub fn new(line: L, counter: C) -> Self {
        let mut bus = Self { line, counter };
        bus.idle();
        bus
    }

    /// Gibt Leitung und Zähler zurück (z.B. um den Pin anders zu nutzen)
    pub fn release(self) -> (L, C) {
        (self.line, self.counter)
    }

    /// Lesezugriff auf die Leitung, ohne den Bus anzufassen
    pub fn line(&self) -> &L {
        &self.line
    }

    /// Reset-Puls senden und auf Presence-Puls prüfen
    ///
    /// Gibt `true` zurück, wenn ein Sensor die Leitung im Presence-Fenster
    /// Low gezogen hat. Keine Wiederholungen.
    pub fn reset(&mut self) -> bool {
        critical_section::with(|_| self.reset_unmasked())
    }

    /// Schreibt ein Byte, LSB zuerst
    pub fn write_byte(&mut self, value: u8) {
        critical_section::with(|_| self.write_byte_unmasked(value));
    }

    /// Liest ein Byte, LSB zuerst
    pub fn read_byte(&mut self) -> u8 {
        critical_section::with(|_| self.read_byte_unmasked())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        critical_section::with(|_| {
            for &byte in bytes {
                self.write_byte_unmasked(byte);
            }
        });
    }

    pub fn read_bytes(&mut self, buffer: &mut [u8]) {
        critical_section::with(|_| self.read_bytes_unmasked(buffer));
    }

    /// Reset + Kommandosequenz als eine unterbrechungsfreie Transaktion
    ///
    /// Bricht ohne ein einziges Byte ab, wenn kein Sensor antwortet. Danach
    /// darf `body` weitere Bytes lesen, ebenfalls noch in derselben Critical
    /// Section.
    pub fn transaction<T>(
        &mut self,
        commands: &[u8],
        body: impl FnOnce(&mut Self) -> T,
    ) -> Result<T, OneWireError> {
        critical_section::with(|_| {
            if !self.reset_unmasked() {
                return Err(OneWireError::NoPresence);
            }
            for &command in commands {
                self.write_byte_unmasked(command);
            }
            Ok(body(self))
        })
    }

    // ========================================================================
    // Protokoll ohne Interrupt-Maskierung (Aufrufer hält die Critical Section)
    // ========================================================================

    fn reset_unmasked(&mut self) -> bool {
        self.line.set_output();
        self.line.write(Level::Low);
        delay_us(&mut self.counter, RESET_LOW_US);

        self.line.write(Level::High);
        delay_us(&mut self.counter, PRESENCE_SAMPLE_US);

        self.line.set_input();
        // Presence-Puls = Sensor hält die Leitung Low
        let present = self.line.read().is_low();
        delay_us(&mut self.counter, PRESENCE_HOLD_US);

        self.idle();
        present
    }

    fn write_bit(&mut self, bit: bool) {
        self.line.set_output();
        self.line.write(Level::Low);
        if bit {
            delay_us(&mut self.counter, WRITE_1_LOW_US);
            self.line.write(Level::High);
            delay_us(&mut self.counter, WRITE_1_RELEASE_US);
        } else {
            delay_us(&mut self.counter, WRITE_0_LOW_US);
            self.line.write(Level::High);
            delay_us(&mut self.counter, WRITE_0_RELEASE_US);
        }
    }

    fn read_bit(&mut self) -> bool {
        self.line.set_output();
        self.line.write(Level::Low);
        delay_us(&mut self.counter, READ_INIT_LOW_US);

        // Eingang = Leitung freigeben, der Sensor treibt jetzt das Bit
        self.line.set_input();
        delay_us(&mut self.counter, READ_SAMPLE_US);
        let bit = self.line.read().is_high();
        delay_us(&mut self.counter, READ_RELEASE_US);

        self.idle();
        bit
    }

    fn write_byte_unmasked(&mut self, mut value: u8) {
        for _ in 0..8 {
            self.write_bit(value & 0x01 != 0);
            value >>= 1;
        }
    }

    pub(crate) fn read_byte_unmasked(&mut self) -> u8 {
        let mut value = 0u8;
        for _ in 0..8 {
            value >>= 1;
            if self.read_bit() {
                value |= 0x80;
            }
        }
        value
    }

    pub(crate) fn read_bytes_unmasked(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = self.read_byte_unmasked();
        }
    }

    fn idle(&mut self) {
        // Latch zuerst auf High, sonst zieht das Umschalten auf Ausgang die
        // Leitung kurz Low (Glitch, den der Sensor als Slot-Start sieht)
        self.line.write(Level::High);
        self.line.set_output();
    }
}
