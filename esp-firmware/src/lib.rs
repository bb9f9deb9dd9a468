// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{
    CycleCounter, OneWire, OneWireError, OneWireLine, SampleTracker, TemperatureReading,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::pubsub::{PubSubChannel, Publisher, Subscriber};

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Statt:  Publisher<'static, NoopRawMutex, TemperatureReading, 2, 2, 1>
// Nutze:  TemperaturePublisher

/// PubSubChannel für Temperatur-Messungen
/// - 2: Nachrichten-Kapazität im Queue
/// - 2: Maximale Anzahl Subscribers (Report Task + Reserve)
/// - 1: Publisher (Temperatur Task)
pub type TemperatureChannel = PubSubChannel<NoopRawMutex, TemperatureReading, 2, 2, 1>;

/// Publisher für Temperatur-Messungen
pub type TemperaturePublisher = Publisher<'static, NoopRawMutex, TemperatureReading, 2, 2, 1>;

/// Subscriber für Temperatur-Messungen
pub type TemperatureSubscriber = Subscriber<'static, NoopRawMutex, TemperatureReading, 2, 2, 1>;
