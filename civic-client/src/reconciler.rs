//! Mutation reconciliation
//!
//! Every write goes to the server first. Only a confirmed result touches the
//! local list; a failure leaves it exactly as it was and hands the error
//! back to the caller.
//!
//! ```text
//! set_status(id, s) ──▶ PUT /admin/complaints/{id}/status ──ok──▶ patch_one(id, {status: s})
//! delete(id)        ──▶ DELETE /admin/complaints/{id}     ──ok──▶ remove_one(id)
//! submit(new)       ──▶ POST /complaints                  ──ok──▶ insert(created)
//!                                                          └err─▶ store untouched
//! ```

use std::sync::Arc;

use shared::models::{Complaint, ComplaintStatus, NewComplaint};
use tokio::sync::RwLock;

use crate::api::CivicApi;
use crate::client::HttpClient;
use crate::error::ClientResult;
use crate::filter::{ComplaintQuery, project};
use crate::store::{ComplaintStore, FetchOutcome, StoreScope};
use crate::summary::{Summary, summarize};

pub use crate::store::Mutation;

/// Whether the status editor's Save control is enabled.
///
/// Every transition is allowed, including Resolved back to Pending; only
/// re-saving the current status is pointless.
pub fn can_save(current: ComplaintStatus, selected: ComplaintStatus) -> bool {
    current != selected
}

/// Complaint list for one screen, kept in step with the server
///
/// The store lock is never held across a request: each operation takes a
/// ticket, releases the lock, awaits the server and then re-locks to
/// reconcile.
#[derive(Debug, Clone)]
pub struct ComplaintBoard<H> {
    api: CivicApi<H>,
    store: Arc<RwLock<ComplaintStore>>,
}

impl<H: HttpClient> ComplaintBoard<H> {
    pub fn new(api: CivicApi<H>, scope: StoreScope) -> Self {
        Self {
            api,
            store: Arc::new(RwLock::new(ComplaintStore::new(scope))),
        }
    }

    /// Board for the signed-in citizen's own complaints
    pub fn citizen(api: CivicApi<H>) -> Self {
        Self::new(api, StoreScope::Citizen)
    }

    /// Board over every complaint (admin)
    pub fn admin(api: CivicApi<H>) -> Self {
        Self::new(api, StoreScope::Admin)
    }

    pub fn store(&self) -> &Arc<RwLock<ComplaintStore>> {
        &self.store
    }

    pub async fn scope(&self) -> StoreScope {
        self.store.read().await.scope()
    }

    /// Fetch the full list and replace the store with it
    pub async fn refresh(&self) -> ClientResult<FetchOutcome> {
        let (ticket, scope) = {
            let mut store = self.store.write().await;
            (store.begin_fetch(), store.scope())
        };

        let result = match scope {
            StoreScope::Citizen => self.api.my_complaints().await,
            StoreScope::Admin => self.api.admin_complaints().await,
        };

        let mut store = self.store.write().await;
        match result {
            Ok(list) => Ok(store.complete_fetch(ticket, list)),
            Err(e) => {
                store.abandon_fetch(ticket);
                Err(e)
            }
        }
    }

    /// File a new complaint and add the server's record to the list
    pub async fn submit(&self, complaint: &NewComplaint) -> ClientResult<Complaint> {
        let ticket = self.store.write().await.begin_mutation();
        let created = self.api.create_complaint(complaint).await?;
        tracing::info!(complaint_id = %created.id, status = %created.status, "complaint filed");
        self.store
            .write()
            .await
            .complete_mutation(ticket, Mutation::Created(created.clone()));
        Ok(created)
    }

    /// Set a complaint's status.
    ///
    /// Returns `false` without a request when the complaint is known to
    /// already have `status`.
    pub async fn set_status(&self, id: &str, status: ComplaintStatus) -> ClientResult<bool> {
        let ticket = {
            let mut store = self.store.write().await;
            if let Some(current) = store.get(id)
                && !can_save(current.status, status)
            {
                tracing::debug!(complaint_id = %id, %status, "status unchanged, nothing to save");
                return Ok(false);
            }
            store.begin_mutation()
        };

        self.api.update_status(id, status).await?;

        let patched = self.store.write().await.complete_mutation(
            ticket,
            Mutation::StatusUpdated {
                id: id.to_string(),
                status,
            },
        );
        tracing::debug!(complaint_id = %id, %status, patched, "status update reconciled");
        Ok(true)
    }

    /// Delete a complaint
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let ticket = self.store.write().await.begin_mutation();
        self.api.delete_complaint(id).await?;
        let removed = self
            .store
            .write()
            .await
            .complete_mutation(ticket, Mutation::Deleted { id: id.to_string() });
        tracing::debug!(complaint_id = %id, removed, "deletion reconciled");
        Ok(())
    }

    /// Copy of the full list
    pub async fn snapshot(&self) -> Vec<Complaint> {
        self.store.read().await.all().to_vec()
    }

    pub async fn get(&self, id: &str) -> Option<Complaint> {
        self.store.read().await.get(id).cloned()
    }

    /// Visible list for `query`
    pub async fn project(&self, query: &ComplaintQuery) -> Vec<Complaint> {
        project(self.store.read().await.all(), query)
    }

    pub async fn summary(&self) -> Summary {
        summarize(self.store.read().await.all())
    }

    pub async fn clear(&self) {
        self.store.write().await.clear();
    }
}
