//! Rank taxonomy and rank assignments
//!
//! Ranks are honorific titles grouped under the three administrative bodies,
//! ordered for display within each group. Assignments tie a believer to a
//! rank together with the decree that granted it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::believer::Believer;

/// The three administrative bodies a rank belongs to
///
/// Declaration order is the canonical display order of the groups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankGroup {
    CuuTrungDai,
    PhuocThien,
    HiepThienDai,
}

impl RankGroup {
    /// Wire name, also used as the key of the grouped listing
    pub fn as_str(&self) -> &'static str {
        match self {
            RankGroup::CuuTrungDai => "CUU_TRUNG_DAI",
            RankGroup::PhuocThien => "PHUOC_THIEN",
            RankGroup::HiepThienDai => "HIEP_THIEN_DAI",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankGroup::CuuTrungDai => "Cửu Trùng Đài",
            RankGroup::PhuocThien => "Phước Thiện",
            RankGroup::HiepThienDai => "Hiệp Thiên Đài",
        }
    }
}

/// An honorific title in the taxonomy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    pub id: Uuid,
    pub group: RankGroup,
    /// Stable identifier, unique across the taxonomy.
    pub code: String,
    pub display_name: String,
    /// Display position within the group.
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rank {
    pub fn new(data: &NewRank) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            group: data.group,
            code: data.code.clone(),
            display_name: data.display_name.clone(),
            order: data.order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update; absent fields stay unchanged
    pub fn apply_update(&mut self, update: RankUpdate) {
        if let Some(display_name) = update.display_name {
            self.display_name = display_name;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }

    /// The default taxonomy seeded into an empty roster
    pub fn default_taxonomy() -> Vec<NewRank> {
        let entries: &[(RankGroup, &str, &str)] = &[
            (RankGroup::CuuTrungDai, "TIN_DO", "Tín Đồ"),
            (RankGroup::CuuTrungDai, "CHANH_TRI_SU", "Chánh Trị Sự"),
            (RankGroup::CuuTrungDai, "PHO_TRI_SU", "Phó Trị Sự"),
            (RankGroup::CuuTrungDai, "THONG_SU", "Thông Sự"),
            (RankGroup::CuuTrungDai, "LE_SANH", "Lễ Sanh"),
            (RankGroup::CuuTrungDai, "QUYEN_GIAO_HUU", "Quyền Giáo Hữu"),
            (RankGroup::CuuTrungDai, "GIAO_HUU", "Giáo Hữu"),
            (RankGroup::PhuocThien, "DU_THIEN", "Dự Thiện"),
            (RankGroup::PhuocThien, "THINH_THIEN", "Thính Thiện"),
            (RankGroup::PhuocThien, "HANH_THIEN", "Hành Thiện"),
            (RankGroup::HiepThienDai, "TUNG_SI_QUAN", "Tùng Sĩ Quân"),
            (RankGroup::HiepThienDai, "LUAT_SU", "Luật Sự"),
        ];

        let mut taxonomy = Vec::with_capacity(entries.len());
        let mut order_in_group = std::collections::HashMap::new();
        for (group, code, display_name) in entries {
            let order = order_in_group.entry(*group).or_insert(0);
            *order += 1;
            taxonomy.push(NewRank {
                group: *group,
                code: (*code).to_string(),
                display_name: (*display_name).to_string(),
                order: *order,
            });
        }
        taxonomy
    }
}

/// Request body for `POST /ranks`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRank {
    pub group: RankGroup,
    pub code: String,
    pub display_name: String,
    pub order: i32,
}

/// Partial update body for `PATCH /ranks/:id`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankUpdate {
    pub display_name: Option<String>,
    pub is_active: Option<bool>,
}

/// A granted rank, with the decree that granted it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankAssignment {
    pub id: Uuid,
    pub believer_id: Uuid,
    pub rank_id: Uuid,
    /// Decree number; may be empty when the paperwork is pending.
    pub decision_number: String,
    pub decision_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating an assignment
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRankAssignment {
    pub rank_id: Uuid,
    pub decision_number: Option<String>,
    pub decision_date: Option<NaiveDate>,
}

/// Assignment joined with its rank, for believer views
#[derive(Debug, Clone, Serialize)]
pub struct RankAssignmentWithRank {
    #[serde(flatten)]
    pub assignment: RankAssignment,
    pub rank: Rank,
}

/// Assignment joined with its believer, for the rank detail view
#[derive(Debug, Clone, Serialize)]
pub struct RankAssignmentWithBeliever {
    #[serde(flatten)]
    pub assignment: RankAssignment,
    pub believer: Believer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_shape() {
        let taxonomy = Rank::default_taxonomy();
        assert_eq!(taxonomy.len(), 12);

        let cuu_trung_dai: Vec<_> = taxonomy
            .iter()
            .filter(|r| r.group == RankGroup::CuuTrungDai)
            .collect();
        assert_eq!(cuu_trung_dai.len(), 7);
        // Orders restart at 1 within each group.
        assert_eq!(cuu_trung_dai[0].order, 1);
        assert_eq!(cuu_trung_dai[6].order, 7);

        let phuoc_thien: Vec<_> = taxonomy
            .iter()
            .filter(|r| r.group == RankGroup::PhuocThien)
            .collect();
        assert_eq!(phuoc_thien[0].order, 1);
        assert_eq!(phuoc_thien[0].code, "DU_THIEN");
    }

    #[test]
    fn test_default_taxonomy_codes_are_unique() {
        let taxonomy = Rank::default_taxonomy();
        let mut codes: Vec<_> = taxonomy.iter().map(|r| r.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), taxonomy.len());
    }

    #[test]
    fn test_rank_update_is_partial() {
        let mut rank = Rank::new(&NewRank {
            group: RankGroup::CuuTrungDai,
            code: "LE_SANH".to_string(),
            display_name: "Lễ Sanh".to_string(),
            order: 5,
        });
        assert!(rank.is_active);

        rank.apply_update(RankUpdate {
            is_active: Some(false),
            ..Default::default()
        });
        assert!(!rank.is_active);
        assert_eq!(rank.display_name, "Lễ Sanh");
    }

    #[test]
    fn test_group_wire_values() {
        assert_eq!(
            serde_json::to_value(RankGroup::CuuTrungDai).unwrap(),
            serde_json::json!("CUU_TRUNG_DAI")
        );
        assert_eq!(RankGroup::HiepThienDai.as_str(), "HIEP_THIEN_DAI");
    }

    #[test]
    fn test_assignment_with_rank_flattens() {
        let rank = Rank::new(&NewRank {
            group: RankGroup::PhuocThien,
            code: "HANH_THIEN".to_string(),
            display_name: "Hành Thiện".to_string(),
            order: 3,
        });
        let assignment = RankAssignment {
            id: Uuid::new_v4(),
            believer_id: Uuid::new_v4(),
            rank_id: rank.id,
            decision_number: "123/QĐ".to_string(),
            decision_date: None,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(RankAssignmentWithRank {
            assignment,
            rank,
        })
        .unwrap();
        assert!(value.get("decisionNumber").is_some());
        assert!(value.get("rank").is_some());
        assert_eq!(value["rank"]["code"], "HANH_THIEN");
    }
}
