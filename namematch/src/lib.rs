//! Vietnamese name matching for the believer roster
//!
//! This crate provides the matching core used by the registration flow:
//!
//! - Name normalization (case/diacritic/whitespace-insensitive search keys)
//! - Similarity scoring (normalized Levenshtein over normalized names)
//! - Duplicate-candidate ranking (tiered scoring policy)
//!
//! All operations are pure, synchronous and total: no shared state, no I/O,
//! no failure modes on well-typed input. Independent requests can call into
//! this crate concurrently without coordination.
//!
//! # Example
//!
//! ```
//! use namematch::{find_duplicates, normalize, CandidateRecord, DuplicateQuery};
//!
//! let query = DuplicateQuery {
//!     full_name: "Nguyễn Văn A".to_string(),
//!     ..Default::default()
//! };
//! let pool = vec![CandidateRecord {
//!     id: "b-1".to_string(),
//!     full_name: "Nguyen Van A".to_string(),
//!     date_of_birth: None,
//!     xa_dao: None,
//!     ho_dao: None,
//!     father_name: None,
//!     mother_name: None,
//! }];
//!
//! let candidates = find_duplicates(&query, &pool);
//! assert_eq!(candidates.len(), 1);
//! assert_eq!(candidates[0].similarity, 100);
//! assert_eq!(normalize("Nguyễn Văn A"), "nguyen van a");
//! ```

pub mod normalize;
pub mod ranker;
pub mod similarity;

pub use normalize::{normalize, surname_token};
pub use ranker::{
    find_duplicates, CandidateRecord, DuplicateCandidate, DuplicateQuery, MAX_CANDIDATES,
};
pub use similarity::similarity;
