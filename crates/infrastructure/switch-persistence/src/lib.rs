mod document;
mod error;
mod store;

pub use document::{normalize, SettingsDocument};
pub use error::*;
pub use store::FilePersistence;
