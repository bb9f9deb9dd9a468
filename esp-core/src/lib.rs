//! ESP Core - Platform-agnostic 1-Wire Master and Logic
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits für Leitung und Zähler, das 1-Wire Protokoll,
//! die DS18B20 Transaktionen und Pure Functions.

#![no_std]

pub mod crc;
pub mod ds18b20;
pub mod logic;
pub mod onewire;
pub mod timing;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use crc::crc8;
pub use ds18b20::{CONVERSION_TIME_MS, decode_temperature};
pub use logic::SampleTracker;
pub use onewire::OneWire;
pub use traits::{CycleCounter, Level, OneWireError, OneWireLine};
pub use types::TemperatureReading;
