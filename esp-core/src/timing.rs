//! 1-Wire Timing: Slot-Konstanten und kalibriertes Busy-Wait
//!
//! Alle Zeiten in Mikrosekunden, Standard-Speed (kein Overdrive).

use crate::traits::CycleCounter;

// ============================================================================
// Reset & Presence
// ============================================================================

/// Reset-Puls: Leitung Low halten
pub const RESET_LOW_US: u32 = 480;

/// Nach dem Freigeben warten, bevor der Presence-Puls abgetastet wird
pub const PRESENCE_SAMPLE_US: u32 = 70;

/// Rest des Presence-Slots nach dem Abtasten
pub const PRESENCE_HOLD_US: u32 = 410;

// ============================================================================
// Write Slots
// ============================================================================

/// Logisch 1: kurzer Low-Puls, Sensor tastet 15-60 µs nach der Flanke ab
pub const WRITE_1_LOW_US: u32 = 6;
pub const WRITE_1_RELEASE_US: u32 = 64;

/// Logisch 0: Leitung fast den ganzen Slot Low halten
pub const WRITE_0_LOW_US: u32 = 60;
pub const WRITE_0_RELEASE_US: u32 = 10;

// ============================================================================
// Read Slots
// ============================================================================

/// Master startet jeden Read-Slot mit einem kurzen Low-Puls
pub const READ_INIT_LOW_US: u32 = 6;

/// Abtastzeitpunkt nach dem Freigeben (innerhalb des 15 µs Fensters)
pub const READ_SAMPLE_US: u32 = 9;

/// Rest des Read-Slots
pub const READ_RELEASE_US: u32 = 55;

/// Gesamtlänge eines Bit-Slots
pub const SLOT_US: u32 = 70;

/// Rechnet Mikrosekunden in Zähler-Ticks um
///
/// `ticks = µs × (frequency_hz / 1_000_000)`. Ticks pro µs werden aufgerundet
/// (mindestens 1), ein Delay fällt dadurch höchstens länger aus.
pub fn micros_to_ticks(micros: u32, frequency_hz: u32) -> u32 {
    let ticks_per_us = frequency_hz.div_ceil(1_000_000).max(1);
    micros.saturating_mul(ticks_per_us)
}

/// Busy-Wait für mindestens `micros` Mikrosekunden
///
/// Läuft auf dem aufrufenden Kontext, ohne zu yielden. Überlauf des Zählers
/// ist durch `wrapping_sub` abgedeckt, solange das Delay kürzer als eine volle
/// Zählerperiode ist.
///
/// Der erste Zählerstand kann kurz vor dem nächsten Tick liegen, daher wird
/// ein Tick mehr abgewartet als angefordert.
pub fn delay_us<C: CycleCounter>(counter: &mut C, micros: u32) {
    let ticks = micros_to_ticks(micros, counter.frequency_hz());
    let start = counter.ticks();
    while counter.ticks().wrapping_sub(start) <= ticks {
        core::hint::spin_loop();
    }
}
