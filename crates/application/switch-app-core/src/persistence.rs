use switch_core::Profile;
use switch_engine::{ReconcileQueue, Registry};
use switch_persistence::FilePersistence;
use tracing::debug;

use crate::ports::{ProfilesRepo, ReconcilerPort};

impl ProfilesRepo for FilePersistence {
    fn load(&self) -> anyhow::Result<Vec<Profile>> {
        Ok(self.load_profiles()?)
    }

    fn save(&self, profiles: &[Profile]) -> anyhow::Result<()> {
        Ok(self.save_profiles(profiles)?)
    }
}

impl<R> ReconcilerPort for ReconcileQueue<R>
where
    R: Registry + Send + 'static,
{
    fn request(&self, desired: Vec<Profile>) -> anyhow::Result<()> {
        // The report is logged by the engine; nobody waits on it here.
        let pending = self.submit(desired)?;
        drop(pending);
        debug!("Reconciliation queued");
        Ok(())
    }
}
