//! Simulierter 1-Wire Bus für Host-Tests
//!
//! Leitung und Zähler teilen sich einen Zustand. Jeder Zähler-Lesezugriff
//! lässt die simulierte Zeit um einen Tick (oder einen Bruchteil davon)
//! weiterlaufen, dadurch terminieren
//! die Busy-Waits des Masters. Das Geräte-Modell reagiert nur auf Flanken:
//! - Low-Puls >= 480 µs: Reset, danach Presence-Puls im konfigurierten Fenster
//! - kurzer Low-Puls (< 15 µs): geschriebene 1, langer Low-Puls: geschriebene 0
//! - sendet das Gerät, hält es bei einer 0 die Leitung 30 µs ab der Flanke Low

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use esp_core::{CycleCounter, Level, OneWire, OneWireLine};

/// Minimale Low-Zeit, die ein Gerät als Reset erkennt
pub const RESET_DETECT_US: u32 = 480;

/// Grenze zwischen geschriebener 1 und 0 (Sensor tastet ab 15 µs ab)
pub const WRITE_SAMPLE_US: u32 = 15;

/// Wie lange ein sendendes Gerät für eine 0 die Leitung hält
pub const READ_HOLD_US: u32 = 30;

/// Presence-Fenster eines typischen DS18B20 (relativ zum Freigeben)
pub const DEFAULT_PRESENCE_WINDOW: (u32, u32) = (70, 150);

// ============================================================================
// Geräte-Modelle
// ============================================================================

/// Verhalten eines Slaves am simulierten Bus
pub trait SimDevice {
    /// Fenster (Start, Ende) in µs nach dem Reset, in dem das Gerät die
    /// Leitung Low zieht. `None` = kein Gerät am Bus.
    fn presence_window(&self) -> Option<(u32, u32)>;

    fn on_reset(&mut self);

    fn on_bit_written(&mut self, bit: bool);

    /// Wird bei jeder fallenden Flanke gefragt: `Some(bit)` wenn das Gerät
    /// in diesem Slot sendet
    fn next_bit_to_send(&mut self) -> Option<bool>;
}

/// Leerer Bus: niemand antwortet
#[derive(Default)]
pub struct NoDevice {
    pub bits_seen: usize,
}

impl SimDevice for NoDevice {
    fn presence_window(&self) -> Option<(u32, u32)> {
        None
    }

    fn on_reset(&mut self) {}

    fn on_bit_written(&mut self, _bit: bool) {
        self.bits_seen += 1;
    }

    fn next_bit_to_send(&mut self) -> Option<bool> {
        None
    }
}

/// Gerät, das jedes empfangene Byte im nächsten Byte-Lesezugriff zurückschickt
#[derive(Default)]
pub struct EchoDevice {
    pending: VecDeque<bool>,
    talking: bool,
}

impl SimDevice for EchoDevice {
    fn presence_window(&self) -> Option<(u32, u32)> {
        Some(DEFAULT_PRESENCE_WINDOW)
    }

    fn on_reset(&mut self) {
        self.pending.clear();
        self.talking = false;
    }

    fn on_bit_written(&mut self, bit: bool) {
        self.pending.push_back(bit);
        if self.pending.len() == 8 {
            self.talking = true;
        }
    }

    fn next_bit_to_send(&mut self) -> Option<bool> {
        if !self.talking {
            return None;
        }
        let bit = self.pending.pop_front();
        if self.pending.is_empty() {
            self.talking = false;
        }
        bit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SensorState {
    /// Wartet auf einen Reset
    Idle,
    RomCommand,
    FunctionCommand,
    /// Sendet das Scratchpad, Index = nächstes Bit
    Transmit(usize),
}

/// DS18B20 Modell: versteht SKIP ROM, CONVERT T und READ SCRATCHPAD
pub struct Ds18b20Model {
    pub presence_window: Option<(u32, u32)>,
    pub scratchpad: [u8; 9],
    /// Alle vollständig empfangenen Bytes seit Start
    pub received: Vec<u8>,
    pub resets: usize,
    pub conversions: usize,
    state: SensorState,
    shift: u8,
    bit_count: u8,
}

impl Ds18b20Model {
    /// Sensor mit gültigem Scratchpad für die gegebenen Temperatur-Bytes
    pub fn with_temperature(lsb: u8, msb: u8) -> Self {
        let mut scratchpad = [lsb, msb, 0x4B, 0x46, 0x7F, 0xFF, 0x0C, 0x10, 0x00];
        scratchpad[8] = esp_core::crc8(&scratchpad[..8]);
        Self {
            presence_window: Some(DEFAULT_PRESENCE_WINDOW),
            scratchpad,
            received: Vec::new(),
            resets: 0,
            conversions: 0,
            state: SensorState::Idle,
            shift: 0,
            bit_count: 0,
        }
    }

    pub fn with_presence_window(mut self, window: Option<(u32, u32)>) -> Self {
        self.presence_window = window;
        self
    }

    /// Verfälscht ein Scratchpad-Bit, ohne die CRC anzupassen
    pub fn with_corrupted_bit(mut self, byte: usize, bit: u8) -> Self {
        self.scratchpad[byte] ^= 1 << bit;
        self
    }

    fn on_byte(&mut self, byte: u8) {
        self.received.push(byte);
        self.state = match (self.state, byte) {
            (SensorState::RomCommand, 0xCC) => SensorState::FunctionCommand,
            (SensorState::FunctionCommand, 0x44) => {
                self.conversions += 1;
                SensorState::Idle
            }
            (SensorState::FunctionCommand, 0xBE) => SensorState::Transmit(0),
            _ => SensorState::Idle,
        };
    }
}

impl SimDevice for Ds18b20Model {
    fn presence_window(&self) -> Option<(u32, u32)> {
        self.presence_window
    }

    fn on_reset(&mut self) {
        self.resets += 1;
        self.state = SensorState::RomCommand;
        self.shift = 0;
        self.bit_count = 0;
    }

    fn on_bit_written(&mut self, bit: bool) {
        if !matches!(
            self.state,
            SensorState::RomCommand | SensorState::FunctionCommand
        ) {
            return;
        }
        if bit {
            self.shift |= 1 << self.bit_count;
        }
        self.bit_count += 1;
        if self.bit_count == 8 {
            let byte = self.shift;
            self.shift = 0;
            self.bit_count = 0;
            self.on_byte(byte);
        }
    }

    fn next_bit_to_send(&mut self) -> Option<bool> {
        match self.state {
            SensorState::Transmit(index) if index < self.scratchpad.len() * 8 => {
                self.state = SensorState::Transmit(index + 1);
                Some((self.scratchpad[index / 8] >> (index % 8)) & 0x01 != 0)
            }
            _ => None,
        }
    }
}

// ============================================================================
// Bus-Zustand
// ============================================================================

/// Ein vom Master erzeugter Low-Puls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowPulse {
    pub start_us: u32,
    pub duration_us: u32,
}

struct BusState<D> {
    device: D,
    /// Anzahl Zählerzugriffe seit Start, daraus ergibt sich die Zeit
    reads: u64,
    reads_per_tick: u64,
    ticks_per_us: u32,
    master_output: bool,
    master_level: Level,
    fall_at_ns: u64,
    slot_is_device_talking: bool,
    /// Zeitfenster [Start, Ende) in µs, in dem das Gerät die Leitung Low zieht
    device_pull: Option<(u32, u32)>,
    pulses: Vec<LowPulse>,
    samples: Vec<(u32, Level)>,
}

impl<D: SimDevice> BusState<D> {
    fn now_ns(&self) -> u64 {
        self.reads * 1_000 / (self.reads_per_tick * u64::from(self.ticks_per_us))
    }

    fn now_us(&self) -> u32 {
        (self.now_ns() / 1_000) as u32
    }

    fn master_pulling(&self) -> bool {
        self.master_output && self.master_level.is_low()
    }

    fn device_pulling(&self) -> bool {
        let now = self.now_us();
        matches!(self.device_pull, Some((start, end)) if start <= now && now < end)
    }

    /// Wendet eine Master-Änderung an und wertet die resultierende Flanke aus
    fn update(&mut self, change: impl FnOnce(&mut Self)) {
        let was_pulling = self.master_pulling();
        change(self);
        let is_pulling = self.master_pulling();

        match (was_pulling, is_pulling) {
            (false, true) => self.on_fall(),
            (true, false) => self.on_release(),
            _ => {}
        }
    }

    fn on_fall(&mut self) {
        let now = self.now_us();
        self.fall_at_ns = self.now_ns();
        match self.device.next_bit_to_send() {
            Some(bit) => {
                self.slot_is_device_talking = true;
                if !bit {
                    self.device_pull = Some((now, now + READ_HOLD_US));
                }
            }
            None => self.slot_is_device_talking = false,
        }
    }

    fn on_release(&mut self) {
        let now = self.now_us();
        let duration_us = ((self.now_ns() - self.fall_at_ns) / 1_000) as u32;
        self.pulses.push(LowPulse {
            start_us: (self.fall_at_ns / 1_000) as u32,
            duration_us,
        });

        if duration_us >= RESET_DETECT_US {
            self.device.on_reset();
            self.device_pull = self
                .device
                .presence_window()
                .map(|(start, end)| (now + start, now + end));
        } else if !self.slot_is_device_talking {
            self.device.on_bit_written(duration_us < WRITE_SAMPLE_US);
        }
    }

    fn level(&self) -> Level {
        if self.master_pulling() || self.device_pulling() {
            Level::Low
        } else {
            Level::High
        }
    }
}

// ============================================================================
// Öffentliche Handles
// ============================================================================

/// Test-Handle auf den simulierten Bus
pub struct SimBus<D> {
    state: Rc<RefCell<BusState<D>>>,
}

impl<D: SimDevice> SimBus<D> {
    /// Bus mit 1 MHz Zähler (1 Tick = 1 µs)
    pub fn new(device: D) -> Self {
        Self::with_frequency(device, 1_000_000)
    }

    /// Bus mit beliebiger Zählerfrequenz (Vielfaches von 1 MHz)
    pub fn with_frequency(device: D, frequency_hz: u32) -> Self {
        Self::build(device, frequency_hz, 1, 0)
    }

    /// Bus mit 1 MHz Zähler, der erst nach `reads_per_tick` Zugriffen
    /// weiterzählt und beim ersten Zugriff schon `phase` Zugriffe in den
    /// laufenden Tick hinein ist
    pub fn with_tick_phase(device: D, reads_per_tick: u64, phase: u64) -> Self {
        Self::build(device, 1_000_000, reads_per_tick, phase)
    }

    fn build(device: D, frequency_hz: u32, reads_per_tick: u64, phase: u64) -> Self {
        let state = BusState {
            device,
            reads: phase,
            reads_per_tick,
            ticks_per_us: frequency_hz / 1_000_000,
            master_output: false,
            master_level: Level::High,
            fall_at_ns: 0,
            slot_is_device_talking: false,
            device_pull: None,
            pulses: Vec::new(),
            samples: Vec::new(),
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Erstellt den Master auf diesem Bus
    pub fn master(&self) -> OneWire<SimLine<D>, SimCounter<D>> {
        OneWire::new(
            SimLine {
                state: Rc::clone(&self.state),
            },
            SimCounter {
                state: Rc::clone(&self.state),
            },
        )
    }

    /// Master treibt nicht und niemand zieht: Ausgang, Latch High
    pub fn is_idle_high(&self) -> bool {
        let state = self.state.borrow();
        state.master_output && state.master_level.is_high() && state.level().is_high()
    }

    /// Alle Low-Pulse des Masters in zeitlicher Reihenfolge
    pub fn pulses(&self) -> Vec<LowPulse> {
        self.state.borrow().pulses.clone()
    }

    /// Low-Pulse ohne Reset-Pulse (also nur Bit-Slots)
    pub fn slot_pulses(&self) -> Vec<LowPulse> {
        self.pulses()
            .into_iter()
            .filter(|p| p.duration_us < RESET_DETECT_US)
            .collect()
    }

    /// Abtastungen des Masters (Zeitpunkt in µs, Pegel)
    pub fn samples(&self) -> Vec<(u32, Level)> {
        self.state.borrow().samples.clone()
    }

    pub fn now_us(&self) -> u32 {
        self.state.borrow().now_us()
    }

    pub fn device<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&self.state.borrow().device)
    }
}

/// Leitungs-Seite des simulierten Busses
pub struct SimLine<D> {
    state: Rc<RefCell<BusState<D>>>,
}

impl<D: SimDevice> OneWireLine for SimLine<D> {
    fn set_output(&mut self) {
        self.state.borrow_mut().update(|s| s.master_output = true);
    }

    fn set_input(&mut self) {
        self.state.borrow_mut().update(|s| s.master_output = false);
    }

    fn write(&mut self, level: Level) {
        self.state.borrow_mut().update(|s| s.master_level = level);
    }

    fn read(&mut self) -> Level {
        let mut state = self.state.borrow_mut();
        let level = state.level();
        let now = state.now_us();
        state.samples.push((now, level));
        level
    }
}

/// Zähler-Seite: jeder Lesezugriff lässt die Zeit weiterlaufen
pub struct SimCounter<D> {
    state: Rc<RefCell<BusState<D>>>,
}

impl<D: SimDevice> CycleCounter for SimCounter<D> {
    fn ticks(&mut self) -> u32 {
        let mut state = self.state.borrow_mut();
        state.reads += 1;
        (state.reads / state.reads_per_tick) as u32
    }

    fn frequency_hz(&self) -> u32 {
        self.state.borrow().ticks_per_us * 1_000_000
    }
}
