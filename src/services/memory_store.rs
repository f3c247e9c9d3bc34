//! In-memory record store
//!
//! Backs the service with `RwLock`-guarded maps. Durable storage is out of
//! scope for this service; everything a database-backed store would need to
//! honor is expressed by the `RecordStore` trait this module implements.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use namematch::CandidateRecord;

use crate::models::{
    Believer, BelieverFilter, BelieverPage, BelieverUpdate, NewBeliever, NewRank,
    NewRankAssignment, Pagination, Rank, RankAssignment, RankAssignmentWithBeliever,
    RankAssignmentWithRank, RankUpdate, SortKey, SortOrder,
};
use crate::services::store::{RecordStore, StoreError, StoreResult};

#[derive(Default)]
struct StoreInner {
    believers: HashMap<Uuid, Believer>,
    ranks: HashMap<Uuid, Rank>,
    assignments: HashMap<Uuid, RankAssignment>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

fn make_assignment(believer_id: Uuid, data: &NewRankAssignment) -> RankAssignment {
    RankAssignment {
        id: Uuid::new_v4(),
        believer_id,
        rank_id: data.rank_id,
        decision_number: data.decision_number.clone().unwrap_or_default(),
        decision_date: data.decision_date,
        created_at: Utc::now(),
    }
}

fn matches_filter(believer: &Believer, filter: &BelieverFilter, normalized_search: &str) -> bool {
    if !normalized_search.is_empty()
        && !believer.full_name_normalized.contains(normalized_search)
    {
        return false;
    }
    if filter.gender.is_some() && believer.gender != filter.gender {
        return false;
    }
    if filter.trai_ky.is_some() && believer.trai_ky != filter.trai_ky {
        return false;
    }
    if filter.tu_chan.is_some() && believer.tu_chan != filter.tu_chan {
        return false;
    }
    if !filter.ho_dao.is_empty()
        && !believer
            .ho_dao
            .as_deref()
            .is_some_and(|h| h.contains(&filter.ho_dao))
    {
        return false;
    }
    if !filter.xa_dao.is_empty()
        && !believer
            .xa_dao
            .as_deref()
            .is_some_and(|x| x.contains(&filter.xa_dao))
    {
        return false;
    }
    true
}

fn compare_by_key(a: &Believer, b: &Believer, key: SortKey) -> Ordering {
    match key {
        SortKey::FullName => a.full_name.cmp(&b.full_name),
        SortKey::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
        SortKey::Gender => a.gender.cmp(&b.gender),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

impl RecordStore for MemoryStore {
    fn create_believer(&self, data: NewBeliever) -> StoreResult<Believer> {
        let mut inner = self.write()?;

        let believer = Believer::new(&data);
        inner.believers.insert(believer.id, believer.clone());

        // Assignments are created after the believer, without a transaction:
        // a bad rank id fails the request but keeps the created record.
        for assignment in &data.rank_assignments {
            if !inner.ranks.contains_key(&assignment.rank_id) {
                return Err(StoreError::NotFound("rank"));
            }
            let record = make_assignment(believer.id, assignment);
            inner.assignments.insert(record.id, record);
        }

        Ok(believer)
    }

    fn get_believer(&self, id: Uuid) -> StoreResult<Believer> {
        self.read()?
            .believers
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("believer"))
    }

    fn update_believer(&self, id: Uuid, update: BelieverUpdate) -> StoreResult<Believer> {
        let mut inner = self.write()?;
        let believer = inner
            .believers
            .get_mut(&id)
            .ok_or(StoreError::NotFound("believer"))?;
        believer.apply_update(update);
        Ok(believer.clone())
    }

    fn delete_believer(&self, id: Uuid) -> StoreResult<()> {
        let mut inner = self.write()?;
        inner
            .believers
            .remove(&id)
            .ok_or(StoreError::NotFound("believer"))?;
        inner.assignments.retain(|_, a| a.believer_id != id);
        Ok(())
    }

    fn list_believers(&self, filter: &BelieverFilter) -> StoreResult<BelieverPage> {
        let inner = self.read()?;
        let normalized_search = namematch::normalize(&filter.search);

        let mut rows: Vec<&Believer> = inner
            .believers
            .values()
            .filter(|b| matches_filter(b, filter, &normalized_search))
            .collect();

        rows.sort_by(|a, b| {
            let ordering = compare_by_key(a, b, filter.sort_by);
            match filter.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = rows.len();
        let page_size = filter.page_size.max(1);
        let page = filter.page.max(1);
        let total_pages = total.div_ceil(page_size);

        let data: Vec<Believer> = rows
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect();

        Ok(BelieverPage {
            data,
            pagination: Pagination {
                page,
                page_size,
                total,
                total_pages,
            },
        })
    }

    fn export_believers(&self, filter: &BelieverFilter) -> StoreResult<Vec<Believer>> {
        let inner = self.read()?;
        let normalized_search = namematch::normalize(&filter.search);

        let mut rows: Vec<Believer> = inner
            .believers
            .values()
            .filter(|b| matches_filter(b, filter, &normalized_search))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(rows)
    }

    fn count_believers(&self) -> StoreResult<usize> {
        Ok(self.read()?.believers.len())
    }

    fn find_candidates_by_surname(
        &self,
        normalized_token: &str,
    ) -> StoreResult<Vec<CandidateRecord>> {
        let inner = self.read()?;

        let mut matching: Vec<&Believer> = inner
            .believers
            .values()
            .filter(|b| b.full_name_normalized.contains(normalized_token))
            .collect();
        // Creation order keeps the ranker's tie-breaking deterministic.
        matching.sort_by_key(|b| (b.created_at, b.id));

        Ok(matching
            .into_iter()
            .map(|b| CandidateRecord {
                id: b.id.to_string(),
                full_name: b.full_name.clone(),
                date_of_birth: b.date_of_birth,
                xa_dao: b.xa_dao.clone(),
                ho_dao: b.ho_dao.clone(),
                father_name: b.father_name.clone(),
                mother_name: b.mother_name.clone(),
            })
            .collect())
    }

    fn create_rank(&self, data: NewRank) -> StoreResult<Rank> {
        let mut inner = self.write()?;

        if inner.ranks.values().any(|r| r.code == data.code) {
            return Err(StoreError::Conflict(format!(
                "rank code '{}' already exists",
                data.code
            )));
        }

        let rank = Rank::new(&data);
        inner.ranks.insert(rank.id, rank.clone());
        Ok(rank)
    }

    fn get_rank(&self, id: Uuid) -> StoreResult<Rank> {
        self.read()?
            .ranks
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("rank"))
    }

    fn update_rank(&self, id: Uuid, update: RankUpdate) -> StoreResult<Rank> {
        let mut inner = self.write()?;
        let rank = inner
            .ranks
            .get_mut(&id)
            .ok_or(StoreError::NotFound("rank"))?;
        rank.apply_update(update);
        Ok(rank.clone())
    }

    fn delete_rank(&self, id: Uuid) -> StoreResult<()> {
        let mut inner = self.write()?;

        if !inner.ranks.contains_key(&id) {
            return Err(StoreError::NotFound("rank"));
        }
        if inner.assignments.values().any(|a| a.rank_id == id) {
            return Err(StoreError::Conflict(
                "rank is still assigned to believers".to_string(),
            ));
        }

        inner.ranks.remove(&id);
        Ok(())
    }

    fn list_ranks(&self, include_inactive: bool) -> StoreResult<Vec<Rank>> {
        let inner = self.read()?;
        let mut ranks: Vec<Rank> = inner
            .ranks
            .values()
            .filter(|r| include_inactive || r.is_active)
            .cloned()
            .collect();
        ranks.sort_by_key(|r| (r.group, r.order));
        Ok(ranks)
    }

    fn seed_default_ranks(&self) -> StoreResult<usize> {
        let mut inner = self.write()?;
        let mut created = 0;

        for entry in Rank::default_taxonomy() {
            if inner.ranks.values().any(|r| r.code == entry.code) {
                continue;
            }
            let rank = Rank::new(&entry);
            inner.ranks.insert(rank.id, rank);
            created += 1;
        }

        Ok(created)
    }

    fn count_ranks(&self) -> StoreResult<usize> {
        Ok(self.read()?.ranks.len())
    }

    fn create_assignment(
        &self,
        believer_id: Uuid,
        data: NewRankAssignment,
    ) -> StoreResult<RankAssignmentWithRank> {
        let mut inner = self.write()?;

        if !inner.believers.contains_key(&believer_id) {
            return Err(StoreError::NotFound("believer"));
        }
        let rank = inner
            .ranks
            .get(&data.rank_id)
            .cloned()
            .ok_or(StoreError::NotFound("rank"))?;

        let assignment = make_assignment(believer_id, &data);
        inner.assignments.insert(assignment.id, assignment.clone());

        Ok(RankAssignmentWithRank { assignment, rank })
    }

    fn delete_assignment(&self, believer_id: Uuid, assignment_id: Uuid) -> StoreResult<()> {
        let mut inner = self.write()?;

        let belongs = inner
            .assignments
            .get(&assignment_id)
            .is_some_and(|a| a.believer_id == believer_id);
        if !belongs {
            return Err(StoreError::NotFound("rank assignment"));
        }

        inner.assignments.remove(&assignment_id);
        Ok(())
    }

    fn assignments_for_believer(
        &self,
        believer_id: Uuid,
    ) -> StoreResult<Vec<RankAssignmentWithRank>> {
        let inner = self.read()?;

        let mut assignments: Vec<&RankAssignment> = inner
            .assignments
            .values()
            .filter(|a| a.believer_id == believer_id)
            .collect();
        assignments.sort_by(|a, b| b.decision_date.cmp(&a.decision_date));

        let mut joined = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            let rank = inner
                .ranks
                .get(&assignment.rank_id)
                .cloned()
                .ok_or(StoreError::NotFound("rank"))?;
            joined.push(RankAssignmentWithRank {
                assignment: assignment.clone(),
                rank,
            });
        }
        Ok(joined)
    }

    fn assignments_for_rank(
        &self,
        rank_id: Uuid,
    ) -> StoreResult<Vec<RankAssignmentWithBeliever>> {
        let inner = self.read()?;

        let mut assignments: Vec<&RankAssignment> = inner
            .assignments
            .values()
            .filter(|a| a.rank_id == rank_id)
            .collect();
        assignments.sort_by(|a, b| b.decision_date.cmp(&a.decision_date));

        let mut joined = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            let believer = inner
                .believers
                .get(&assignment.believer_id)
                .cloned()
                .ok_or(StoreError::NotFound("believer"))?;
            joined.push(RankAssignmentWithBeliever {
                assignment: assignment.clone(),
                believer,
            });
        }
        Ok(joined)
    }

    fn count_assignments(&self) -> StoreResult<usize> {
        Ok(self.read()?.assignments.len())
    }
}
