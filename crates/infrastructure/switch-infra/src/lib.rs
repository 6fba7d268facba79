pub mod activate;
pub mod defer;
pub mod launcher;

// Re-exports for convenience
pub use activate::{process_name, ActivationMode, ActivationOutcome, WindowActivator};
pub use defer::{Deferred, DeferredHandle};
pub use launcher::{LaunchError, ProcessLauncher};
