//! Wire types for the duplicate-check endpoint

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use namematch::{DuplicateCandidate, DuplicateQuery};

/// Request body for `POST /believers/duplicate-check`
///
/// `full_name` is optional on the wire: a missing or blank name is answered
/// with an empty candidate list, never an error. Dates that fail to parse
/// are rejected by deserialization before any scoring runs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCheckRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub xa_dao: Option<String>,
    #[serde(default)]
    pub ho_dao: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
}

impl DuplicateCheckRequest {
    /// Converts the request into a ranker query
    pub fn into_query(self) -> DuplicateQuery {
        DuplicateQuery {
            full_name: self.full_name.unwrap_or_default(),
            date_of_birth: self.date_of_birth,
            xa_dao: self.xa_dao,
            ho_dao: self.ho_dao,
            father_name: self.father_name,
            mother_name: self.mother_name,
        }
    }
}

/// Response body: ranked candidates, strongest first, at most five
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateCheckResponse {
    pub candidates: Vec<DuplicateCandidate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_minimal_body() {
        let request: DuplicateCheckRequest = serde_json::from_str("{}").unwrap();
        assert!(request.full_name.is_none());
        assert!(request.date_of_birth.is_none());
    }

    #[test]
    fn test_request_parses_camel_case_fields() {
        let request: DuplicateCheckRequest = serde_json::from_value(serde_json::json!({
            "fullName": "Nguyễn Văn A",
            "dateOfBirth": "1990-01-01",
            "hoDao": "Họ Đạo Thái Bình",
            "fatherName": "Nguyễn Văn B"
        }))
        .unwrap();

        assert_eq!(request.full_name.as_deref(), Some("Nguyễn Văn A"));
        assert_eq!(
            request.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 1, 1)
        );
        assert_eq!(request.ho_dao.as_deref(), Some("Họ Đạo Thái Bình"));
    }

    #[test]
    fn test_unparseable_date_is_rejected() {
        let result: Result<DuplicateCheckRequest, _> =
            serde_json::from_value(serde_json::json!({
                "fullName": "Nguyễn Văn A",
                "dateOfBirth": "not-a-date"
            }));
        assert!(result.is_err());
    }
}
