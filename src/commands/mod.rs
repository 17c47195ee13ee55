// Read-only probes
pub mod detect;
pub mod verify;

// Mutating commands
pub mod configure;
