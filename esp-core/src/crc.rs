//! Dallas/Maxim CRC-8
//!
//! `CRC = X^8 + X^5 + X^4 + 1`, bitweise reflektiert (0x8C).

/// Berechnet die CRC-8 über `data`
///
/// Enthält `data` bereits die CRC als letztes Byte, ist das Ergebnis 0.
///
/// # Beispiele
///
/// ```
/// # use esp_core::crc8;
/// let scratchpad = [0x91, 0x01, 0x4B, 0x46, 0x7F, 0xFF, 0x0F, 0x10];
/// let crc = crc8(&scratchpad);
/// let mut with_crc = [0u8; 9];
/// with_crc[..8].copy_from_slice(&scratchpad);
/// with_crc[8] = crc;
/// assert_eq!(crc8(&with_crc), 0);
/// ```
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x01 != 0 {
                crc = (crc >> 1) ^ 0x8C;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}
