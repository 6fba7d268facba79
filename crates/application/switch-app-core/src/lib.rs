pub mod actions;
pub mod capture;
pub mod launcher;
pub mod persistence;
pub mod ports;
pub mod profiles;

pub use actions::{
    is_available, quick_pick, resolve, ActionContext, ActionDispatcher, ActionError, QuickPick,
};
pub use capture::CaptureSession;
pub use launcher::{ActivatorImpl, LauncherImpl};
pub use ports::*;
pub use profiles::ProfileManager;
