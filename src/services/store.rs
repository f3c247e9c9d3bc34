//! Record store seam between the HTTP layer and persistence
//!
//! Handlers only ever see `Arc<dyn RecordStore>`, built once at startup and
//! injected through `AppState`. The shipped implementation is the in-memory
//! store in [`crate::services::memory_store`]; a database-backed store would
//! implement this same trait.

use thiserror::Error;
use uuid::Uuid;

use namematch::CandidateRecord;

use crate::models::{
    Believer, BelieverFilter, BelieverPage, BelieverUpdate, NewBeliever, NewRank,
    NewRankAssignment, Rank, RankAssignmentWithBeliever, RankAssignmentWithRank, RankUpdate,
};

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The operation conflicts with existing data (duplicate code, entity
    /// still referenced).
    #[error("{0}")]
    Conflict(String),

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Standard Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

pub trait RecordStore: Send + Sync {
    // Believers
    fn create_believer(&self, data: NewBeliever) -> StoreResult<Believer>;
    fn get_believer(&self, id: Uuid) -> StoreResult<Believer>;
    fn update_believer(&self, id: Uuid, update: BelieverUpdate) -> StoreResult<Believer>;
    fn delete_believer(&self, id: Uuid) -> StoreResult<()>;
    fn list_believers(&self, filter: &BelieverFilter) -> StoreResult<BelieverPage>;
    /// All matching believers for the CSV export, ordered by full name.
    fn export_believers(&self, filter: &BelieverFilter) -> StoreResult<Vec<Believer>>;
    fn count_believers(&self) -> StoreResult<usize>;

    /// Candidate pool for the duplicate check: stored records whose
    /// normalized name contains `normalized_token` (the first token of the
    /// normalized query name), ordered by creation time.
    fn find_candidates_by_surname(
        &self,
        normalized_token: &str,
    ) -> StoreResult<Vec<CandidateRecord>>;

    // Ranks
    fn create_rank(&self, data: NewRank) -> StoreResult<Rank>;
    fn get_rank(&self, id: Uuid) -> StoreResult<Rank>;
    fn update_rank(&self, id: Uuid, update: RankUpdate) -> StoreResult<Rank>;
    fn delete_rank(&self, id: Uuid) -> StoreResult<()>;
    /// Ranks ordered by (group, order); inactive ones only when asked for.
    fn list_ranks(&self, include_inactive: bool) -> StoreResult<Vec<Rank>>;
    /// Inserts taxonomy entries whose codes are absent; returns how many
    /// were created.
    fn seed_default_ranks(&self) -> StoreResult<usize>;
    fn count_ranks(&self) -> StoreResult<usize>;

    // Rank assignments
    fn create_assignment(
        &self,
        believer_id: Uuid,
        data: NewRankAssignment,
    ) -> StoreResult<RankAssignmentWithRank>;
    fn delete_assignment(&self, believer_id: Uuid, assignment_id: Uuid) -> StoreResult<()>;
    /// Assignments of one believer, most recent decision first.
    fn assignments_for_believer(
        &self,
        believer_id: Uuid,
    ) -> StoreResult<Vec<RankAssignmentWithRank>>;
    /// Assignments referencing one rank, most recent decision first.
    fn assignments_for_rank(
        &self,
        rank_id: Uuid,
    ) -> StoreResult<Vec<RankAssignmentWithBeliever>>;
    fn count_assignments(&self) -> StoreResult<usize>;
}
