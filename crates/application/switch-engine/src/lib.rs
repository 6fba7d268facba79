pub mod engine;
pub mod memory;
pub mod queue;
pub mod registry;
pub mod report;

pub use engine::{Placement, ReconciliationEngine, RegisteredCommand, RegisteredEntry};
pub use memory::{InMemoryRegistry, RegistrySnapshot};
pub use queue::{QueueError, ReconcileQueue};
pub use registry::{CommandHandle, GroupPath, Registry, RegistryError};
pub use report::{ReconcileIssue, ReconcileReport};
