//! Group Resolver
//!
//! Fetches the restricted/unrestricted group pair once and caches it.
//! Never fails: any problem yields the fallback pair `(0, 1)`.

use std::cell::Cell;
use std::rc::Rc;

use crate::api::DashboardApi;
use crate::models::GroupIdentifiers;

pub struct GroupResolver<A> {
    api: Rc<A>,
    resolved: Cell<Option<GroupIdentifiers>>,
}

impl<A: DashboardApi> GroupResolver<A> {
    pub fn new(api: Rc<A>) -> Self {
        Self {
            api,
            resolved: Cell::new(None),
        }
    }

    /// Resolve and cache. Later calls return the cached pair without a request.
    pub async fn resolve(&self) -> GroupIdentifiers {
        if let Some(ids) = self.resolved.get() {
            return ids;
        }

        let ids = match self.api.fetch_group_ids().await {
            Ok(ids) if ids.is_distinct() => ids,
            Ok(ids) => {
                log::warn!(
                    "Group IDs are not distinct ({} == {}), client functionality will use defaults",
                    ids.restricted,
                    ids.unrestricted
                );
                GroupIdentifiers::FALLBACK
            }
            Err(e) => {
                log::error!("Error fetching group IDs, client functionality will use defaults: {}", e);
                GroupIdentifiers::FALLBACK
            }
        };

        self.resolved.set(Some(ids));
        ids
    }

    /// Cached pair, or the fallback if `resolve` has not completed yet
    pub fn identifiers(&self) -> GroupIdentifiers {
        self.resolved.get().unwrap_or(GroupIdentifiers::FALLBACK)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}
