//! ComplaintStore - the in-memory complaint list for one viewing context
//!
//! The store is the client's only source of truth between fetches. It is
//! replaced wholesale when a fetch lands and patched in place when a
//! mutation is confirmed by the server.
//!
//! # Ordering
//!
//! Every request that touches the list takes a ticket from the store's
//! sequence counter before it is sent:
//!
//! ```text
//! begin_fetch()    -> FetchTicket(seq)      complete_fetch(ticket, list)
//! begin_mutation() -> MutationTicket(seq)   complete_mutation(ticket, mutation)
//! ```
//!
//! A fetch result is applied unless a fetch issued later has already been
//! applied (last-fetch-wins). A mutation is always applied when it resolves;
//! if a fetch is still in flight, that fetch's `replace_all` will land after
//! it and win. Patch and removal are idempotent and creation dedups by id,
//! so applying a mutation on top of a list that already reflects it never
//! duplicates or drops a record.

use shared::models::{Complaint, ComplaintPatch, ComplaintStatus};

/// Which endpoint populates the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScope {
    /// The signed-in citizen's own complaints (`GET /my`)
    Citizen,
    /// Every complaint (`GET /admin/complaints`)
    Admin,
}

/// Ticket for an in-flight list fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Ticket for an in-flight mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MutationTicket(u64);

/// Whether a completed fetch was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A fetch issued later had already been applied; this result was dropped
    Stale,
}

/// A server-confirmed change to apply to the list
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    StatusUpdated { id: String, status: ComplaintStatus },
    Deleted { id: String },
    Created(Complaint),
}

#[derive(Debug, Clone)]
pub struct ComplaintStore {
    scope: StoreScope,
    complaints: Vec<Complaint>,
    next_seq: u64,
    /// Sequence of the most recently applied fetch
    applied_fetch: Option<u64>,
    /// Fetches issued that have neither landed nor been abandoned
    pending_fetches: usize,
}

impl ComplaintStore {
    pub fn new(scope: StoreScope) -> Self {
        Self {
            scope,
            complaints: Vec::new(),
            next_seq: 0,
            applied_fetch: None,
            pending_fetches: 0,
        }
    }

    /// Store pre-populated with `complaints` (as if a fetch had landed)
    pub fn with_complaints(scope: StoreScope, complaints: Vec<Complaint>) -> Self {
        let mut store = Self::new(scope);
        store.replace_all(complaints);
        store
    }

    pub fn scope(&self) -> StoreScope {
        self.scope
    }

    pub fn all(&self) -> &[Complaint] {
        &self.complaints
    }

    pub fn get(&self, id: &str) -> Option<&Complaint> {
        self.complaints.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.complaints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.complaints.is_empty()
    }

    // ========== Primitive operations ==========

    /// Replace the whole list (after a full fetch)
    pub fn replace_all(&mut self, complaints: Vec<Complaint>) {
        self.complaints = complaints;
    }

    /// Apply `patch` to the complaint with `id`.
    ///
    /// Unknown ids are a no-op: a deletion can race a status update.
    /// Returns whether a record was patched.
    pub fn patch_one(&mut self, id: &str, patch: &ComplaintPatch) -> bool {
        match self.complaints.iter_mut().find(|c| c.id == id) {
            Some(complaint) => {
                patch.apply(complaint);
                true
            }
            None => {
                tracing::debug!(complaint_id = %id, "patch on unknown complaint ignored");
                false
            }
        }
    }

    /// Remove the complaint with `id`; unknown ids are a no-op.
    pub fn remove_one(&mut self, id: &str) -> bool {
        let before = self.complaints.len();
        self.complaints.retain(|c| c.id != id);
        before != self.complaints.len()
    }

    /// Add a newly created complaint.
    ///
    /// Admin lists are newest-first, so the record is prepended; the citizen
    /// list is kept in server order and the record is appended. If the id
    /// is already present (a fetch got there first) the record is updated
    /// in place instead.
    pub fn insert(&mut self, complaint: Complaint) {
        if let Some(existing) = self.complaints.iter_mut().find(|c| c.id == complaint.id) {
            *existing = complaint;
            return;
        }
        match self.scope {
            StoreScope::Admin => self.complaints.insert(0, complaint),
            StoreScope::Citizen => self.complaints.push(complaint),
        }
    }

    /// Drop everything, including sequencing state (used on logout)
    pub fn clear(&mut self) {
        *self = Self::new(self.scope);
    }

    // ========== Sequenced completion ==========

    fn next(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        let seq = self.next();
        self.pending_fetches += 1;
        FetchTicket(seq)
    }

    pub fn begin_mutation(&mut self) -> MutationTicket {
        MutationTicket(self.next())
    }

    /// Whether any issued fetch has not landed or been abandoned yet
    pub fn fetch_in_flight(&self) -> bool {
        self.pending_fetches > 0
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        complaints: Vec<Complaint>,
    ) -> FetchOutcome {
        self.pending_fetches = self.pending_fetches.saturating_sub(1);
        if self.applied_fetch.is_some_and(|applied| applied > ticket.0) {
            tracing::info!(seq = ticket.0, "dropping stale complaint fetch");
            return FetchOutcome::Stale;
        }
        self.applied_fetch = Some(ticket.0);
        tracing::debug!(seq = ticket.0, count = complaints.len(), "complaint list replaced");
        self.replace_all(complaints);
        FetchOutcome::Applied
    }

    /// Forget a fetch that failed; the list is left as it was
    pub fn abandon_fetch(&mut self, ticket: FetchTicket) {
        self.pending_fetches = self.pending_fetches.saturating_sub(1);
        tracing::debug!(
            seq = ticket.0,
            pending = self.pending_fetches,
            "complaint fetch abandoned"
        );
    }

    /// Apply a server-confirmed mutation. Returns whether the list changed.
    pub fn complete_mutation(&mut self, ticket: MutationTicket, mutation: Mutation) -> bool {
        if self.applied_fetch.is_some_and(|applied| applied > ticket.0) {
            tracing::debug!(seq = ticket.0, "mutation resolved after a newer fetch landed");
        }
        match mutation {
            Mutation::StatusUpdated { id, status } => {
                self.patch_one(&id, &ComplaintPatch::status(status))
            }
            Mutation::Deleted { id } => self.remove_one(&id),
            Mutation::Created(complaint) => {
                self.insert(complaint);
                true
            }
        }
    }
}
