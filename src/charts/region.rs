//! Display Region
//! A fixed UI area that owns at most one artifact at a time.

use crate::charts::Artifact;

struct Installed {
    id: u64,
    artifact: Artifact,
}

pub struct DisplayRegion {
    name: &'static str,
    slot: Option<Installed>,
    installed: u64,
}

impl DisplayRegion {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: None,
            installed: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Drop the current occupant, then install `artifact` and return it.
    pub fn replace(&mut self, artifact: Artifact) -> &Artifact {
        self.release();
        self.installed += 1;
        log::debug!(
            "{}: installed {} #{}",
            self.name,
            artifact.slug(),
            self.installed
        );
        &self
            .slot
            .insert(Installed {
                id: self.installed,
                artifact,
            })
            .artifact
    }

    /// Empty the region. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        self.release()
    }

    pub fn current(&self) -> Option<&Artifact> {
        self.slot.as_ref().map(|s| &s.artifact)
    }

    /// Id of the current occupant. Ids increase with every install.
    pub fn current_id(&self) -> Option<u64> {
        self.slot.as_ref().map(|s| s.id)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    fn release(&mut self) -> bool {
        match self.slot.take() {
            Some(previous) => {
                log::debug!(
                    "{}: released {} #{}",
                    self.name,
                    previous.artifact.slug(),
                    previous.id
                );
                true
            }
            None => false,
        }
    }
}
