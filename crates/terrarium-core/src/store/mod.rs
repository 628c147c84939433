// ── Per-kind load state ──

mod loader;

pub use loader::{LoadPhase, LoadState, LoadTicket, ResourceLoader};
