// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul implementiert die esp-core Traits mit esp-hal,
// die Protokoll-Logik selbst bleibt hardware-unabhängig und testbar.

pub mod onewire_line;

pub use onewire_line::{FlexLine, SystimerCounter};
