// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über Embassy Channels (Temperatur → Report).

pub mod report;
pub mod temperature;

// Re-export Tasks für einfachen Import
pub use report::report_task;
pub use temperature::temperature_task;
