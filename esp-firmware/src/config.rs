// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

// ============================================================================
// 1-Wire Konfiguration
// ============================================================================

/// GPIO-Pin für die 1-Wire Datenleitung (DS18B20 DQ)
/// Externer 4.7 kΩ Pull-Up nach 3.3 V ist Pflicht, der Pin läuft als Open-Drain
/// ohne internen Pull
pub const ONEWIRE_GPIO_PIN: u8 = 4;

/// Wartezeit nach CONVERT T in Millisekunden
/// 750 ms = maximale Wandlungszeit bei 12 Bit Auflösung
pub const CONVERSION_WAIT_MS: u64 = esp_core::CONVERSION_TIME_MS;

/// Scratchpad-CRC prüfen (liest 9 statt 2 Bytes)
/// Aus: gestörte Transfers bleiben unerkannt
pub const VERIFY_SCRATCHPAD_CRC: bool = false;

// ============================================================================
// Sampling Konfiguration
// ============================================================================

/// Pause zwischen zwei Messzyklen in Sekunden
pub const SAMPLE_INTERVAL_SECS: u64 = 2;

/// Ab so vielen Fehlversuchen in Folge wird der Sensor als verloren gemeldet
pub const SENSOR_LOST_THRESHOLD: u32 = 5;

// ============================================================================
// Report Konfiguration
// ============================================================================

/// Geräte-Kennung in den Report-Logs
/// Wird zur Build-Zeit aus der Environment Variable DEVICE_ID geladen (optional)
/// Setze diese in .env file (siehe .env.example)
pub const DEVICE_ID: &str = match option_env!("DEVICE_ID") {
    Some(id) => id,
    None => "esp32c6-ds18b20",
};
