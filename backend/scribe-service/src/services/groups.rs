use std::sync::Arc;

use crate::domain::Group;
use crate::error::Result;
use crate::repository::GroupRepository;

/// Group directory reads. Groups are provisioned out-of-band.
#[derive(Clone)]
pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    pub async fn list(&self) -> Result<Vec<Group>> {
        self.groups.list().await
    }
}
