//! Duplicate-candidate ranking for new believer registrations
//!
//! Given the fields of a record about to be created and a pool of stored
//! records pre-filtered by surname token, scores every stored record against
//! the new one and returns the strongest suspects. The policy is a small
//! rule table instead of nested conditionals:
//!
//! - names matching near-exactly (>= 0.95) start at 100 and climb an
//!   escalation ladder: same birth date -> 200, plus same chapter -> 300;
//! - names matching approximately (>= 0.80) start at 50 and collect
//!   independent bonuses: +50 birth date, +30 chapter, +40 father name;
//! - weaker name matches are never candidates.
//!
//! This is a screening aid for the registration form, not a uniqueness
//! constraint. Results are warnings a person has to confirm.

use chrono::NaiveDate;
use serde::Serialize;

use crate::similarity::similarity;

/// Name similarity at or above this counts as a near-exact match.
const NEAR_EXACT_THRESHOLD: f64 = 0.95;
/// Name similarity at or above this (and below near-exact) is a near match.
const NEAR_THRESHOLD: f64 = 0.80;
/// Father names count as matching at or above this similarity.
const FATHER_NAME_THRESHOLD: f64 = 0.90;
/// Candidates below this final score are discarded.
const MIN_SCORE: i32 = 50;
/// At most this many candidates are returned.
pub const MAX_CANDIDATES: usize = 5;

/// Fields of the record being registered
#[derive(Debug, Clone, Default)]
pub struct DuplicateQuery {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub xa_dao: Option<String>,
    pub ho_dao: Option<String>,
    pub father_name: Option<String>,
    /// Collected from the form but not consulted by any scoring rule.
    pub mother_name: Option<String>,
}

/// Stored record supplied by the caller's surname pre-filter
#[derive(Debug, Clone)]
pub struct CandidateRecord {
    pub id: String,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub xa_dao: Option<String>,
    pub ho_dao: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
}

/// A scored duplicate suspect, ready for the confirmation dialog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCandidate {
    pub id: String,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub ho_dao: Option<String>,
    pub xa_dao: Option<String>,
    pub reason: String,
    /// Integer tier score (100/200/300 ladder, or 50 plus bonuses), kept
    /// under the wire name the registration form expects.
    pub similarity: i32,
}

type Predicate = fn(&DuplicateQuery, &CandidateRecord) -> bool;

/// Escalation step for near-exact name matches. Steps run in order and each
/// one requires every earlier step to have matched; its reason replaces the
/// previous one.
struct EscalationRule {
    applies: Predicate,
    score: i32,
    reason: &'static str,
}

/// Additive bonus for near name matches. Bonuses are independent; each match
/// adds its points to the score and its suffix to the reason.
struct BonusRule {
    applies: Predicate,
    points: i32,
    reason_suffix: &'static str,
}

const EXACT_NAME_ESCALATIONS: &[EscalationRule] = &[
    EscalationRule {
        applies: same_birth_date,
        score: 200,
        reason: "Trùng họ tên và ngày sinh",
    },
    EscalationRule {
        applies: same_chapter,
        score: 300,
        reason: "Trùng họ tên, ngày sinh và họ đạo",
    },
];

const NEAR_NAME_BONUSES: &[BonusRule] = &[
    BonusRule {
        applies: same_birth_date,
        points: 50,
        reason_suffix: ", cùng ngày sinh",
    },
    BonusRule {
        applies: same_chapter,
        points: 30,
        reason_suffix: ", cùng họ đạo",
    },
    BonusRule {
        applies: similar_father_name,
        points: 40,
        reason_suffix: ", cùng tên cha",
    },
];

fn same_birth_date(query: &DuplicateQuery, record: &CandidateRecord) -> bool {
    matches!(
        (query.date_of_birth, record.date_of_birth),
        (Some(a), Some(b)) if a == b
    )
}

// Chapter names are compared exactly as entered, no normalization.
fn same_chapter(query: &DuplicateQuery, record: &CandidateRecord) -> bool {
    matches!(
        (query.ho_dao.as_deref(), record.ho_dao.as_deref()),
        (Some(a), Some(b)) if a == b
    )
}

fn similar_father_name(query: &DuplicateQuery, record: &CandidateRecord) -> bool {
    match (query.father_name.as_deref(), record.father_name.as_deref()) {
        (Some(a), Some(b)) => similarity(a, b) >= FATHER_NAME_THRESHOLD,
        _ => false,
    }
}

/// Ranks `pool` against `query`, strongest candidates first
///
/// Returns at most [`MAX_CANDIDATES`] entries sorted by descending score;
/// records with equal scores keep their pool order. An empty `full_name`
/// short-circuits to no candidates. Never fails: records that score below
/// the floor are simply excluded.
pub fn find_duplicates(
    query: &DuplicateQuery,
    pool: &[CandidateRecord],
) -> Vec<DuplicateCandidate> {
    if query.full_name.trim().is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<DuplicateCandidate> = pool
        .iter()
        .filter_map(|record| score_candidate(query, record))
        .collect();

    // sort_by is stable, so equal scores keep pool order.
    candidates.sort_by(|a, b| b.similarity.cmp(&a.similarity));
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

fn score_candidate(
    query: &DuplicateQuery,
    record: &CandidateRecord,
) -> Option<DuplicateCandidate> {
    let sim = similarity(&query.full_name, &record.full_name);

    tracing::debug!(
        "comparing '{}' vs '{}' -> score {:.3}",
        query.full_name,
        record.full_name,
        sim
    );

    let (score, reason) = if sim >= NEAR_EXACT_THRESHOLD {
        let mut score = 100;
        let mut reason = "Trùng họ tên".to_string();
        for rule in EXACT_NAME_ESCALATIONS {
            if !(rule.applies)(query, record) {
                break;
            }
            score = rule.score;
            reason = rule.reason.to_string();
        }
        (score, reason)
    } else if sim >= NEAR_THRESHOLD {
        let mut score = 50;
        let mut reason = format!("Họ tên gần giống ({}%)", (sim * 100.0).round() as i32);
        for rule in NEAR_NAME_BONUSES {
            if (rule.applies)(query, record) {
                score += rule.points;
                reason.push_str(rule.reason_suffix);
            }
        }
        (score, reason)
    } else {
        return None;
    };

    if score < MIN_SCORE {
        return None;
    }

    Some(DuplicateCandidate {
        id: record.id.clone(),
        full_name: record.full_name.clone(),
        date_of_birth: record.date_of_birth,
        ho_dao: record.ho_dao.clone(),
        xa_dao: record.xa_dao.clone(),
        reason,
        similarity: score,
    })
}
