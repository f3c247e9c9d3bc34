//! Believer records and the request/query types around them

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::rank::NewRankAssignment;

/// A registered member of the roster
///
/// `full_name_normalized` is the search key every lookup and duplicate check
/// relies on; it must always equal `namematch::normalize(full_name)` at
/// rest, which [`Believer::new`] and [`Believer::apply_update`] maintain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Believer {
    pub id: Uuid,
    pub full_name: String,
    pub full_name_normalized: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    /// Commune-level affiliation (xã đạo).
    pub xa_dao: Option<String>,
    /// Chapter-level affiliation (họ đạo).
    pub ho_dao: Option<String>,
    pub ngay_nhap_mon: Option<NaiveDate>,
    pub ngay_tam_thanh: Option<NaiveDate>,
    pub trai_ky: Option<TraiKy>,
    pub tu_chan: Option<TuChan>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub ngay_quy_lieu: Option<NaiveDate>,
    pub note: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Believer {
    /// Creates a believer from a registration request, computing the
    /// normalized search key
    pub fn new(data: &NewBeliever) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name_normalized: namematch::normalize(&data.full_name),
            full_name: data.full_name.clone(),
            date_of_birth: data.date_of_birth,
            gender: data.gender,
            xa_dao: data.xa_dao.clone(),
            ho_dao: data.ho_dao.clone(),
            ngay_nhap_mon: data.ngay_nhap_mon,
            ngay_tam_thanh: data.ngay_tam_thanh,
            trai_ky: data.trai_ky,
            tu_chan: data.tu_chan,
            father_name: data.father_name.clone(),
            mother_name: data.mother_name.clone(),
            ngay_quy_lieu: data.ngay_quy_lieu,
            note: data.note.clone(),
            phone: data.phone.clone(),
            email: data.email.clone(),
            address: data.address.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update; absent fields stay unchanged
    ///
    /// Renaming recomputes `full_name_normalized` so the search key never
    /// goes stale.
    pub fn apply_update(&mut self, update: BelieverUpdate) {
        if let Some(full_name) = update.full_name {
            self.full_name_normalized = namematch::normalize(&full_name);
            self.full_name = full_name;
        }
        if let Some(date_of_birth) = update.date_of_birth {
            self.date_of_birth = Some(date_of_birth);
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(xa_dao) = update.xa_dao {
            self.xa_dao = Some(xa_dao);
        }
        if let Some(ho_dao) = update.ho_dao {
            self.ho_dao = Some(ho_dao);
        }
        if let Some(ngay_nhap_mon) = update.ngay_nhap_mon {
            self.ngay_nhap_mon = Some(ngay_nhap_mon);
        }
        if let Some(ngay_tam_thanh) = update.ngay_tam_thanh {
            self.ngay_tam_thanh = Some(ngay_tam_thanh);
        }
        if let Some(trai_ky) = update.trai_ky {
            self.trai_ky = Some(trai_ky);
        }
        if let Some(tu_chan) = update.tu_chan {
            self.tu_chan = Some(tu_chan);
        }
        if let Some(father_name) = update.father_name {
            self.father_name = Some(father_name);
        }
        if let Some(mother_name) = update.mother_name {
            self.mother_name = Some(mother_name);
        }
        if let Some(ngay_quy_lieu) = update.ngay_quy_lieu {
            self.ngay_quy_lieu = Some(ngay_quy_lieu);
        }
        if let Some(note) = update.note {
            self.note = Some(note);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        self.updated_at = Utc::now();
    }
}

/// Registration request body for `POST /believers`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBeliever {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub xa_dao: Option<String>,
    pub ho_dao: Option<String>,
    pub ngay_nhap_mon: Option<NaiveDate>,
    pub ngay_tam_thanh: Option<NaiveDate>,
    pub trai_ky: Option<TraiKy>,
    pub tu_chan: Option<TuChan>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub ngay_quy_lieu: Option<NaiveDate>,
    pub note: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub rank_assignments: Vec<NewRankAssignment>,
}

/// Partial update body for `PATCH /believers/:id`
///
/// One `Option` per field: `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BelieverUpdate {
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub xa_dao: Option<String>,
    pub ho_dao: Option<String>,
    pub ngay_nhap_mon: Option<NaiveDate>,
    pub ngay_tam_thanh: Option<NaiveDate>,
    pub trai_ky: Option<TraiKy>,
    pub tu_chan: Option<TuChan>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub ngay_quy_lieu: Option<NaiveDate>,
    pub note: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Vietnamese display label used by the CSV export
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Nam",
            Gender::Female => "Nữ",
            Gender::Other => "Khác",
        }
    }
}

/// Fasting regimen (trai kỳ)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraiKy {
    SixDays,
    TenDays,
    SixteenDays,
    Full,
}

impl TraiKy {
    pub fn label(&self) -> &'static str {
        match self {
            TraiKy::SixDays => "6 ngày",
            TraiKy::TenDays => "10 ngày",
            TraiKy::SixteenDays => "16 ngày",
            TraiKy::Full => "Trường",
        }
    }
}

/// Cultivation standing (tu chân)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TuChan {
    Linh,
    Truong,
    Tam,
    Tbhc,
}

impl TuChan {
    pub fn label(&self) -> &'static str {
        match self {
            TuChan::Linh => "Linh",
            TuChan::Truong => "Trường",
            TuChan::Tam => "Tâm",
            TuChan::Tbhc => "TBHC",
        }
    }
}

/// Query string for `GET /believers` and `GET /believers/export`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BelieverListQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
    pub gender: Option<Gender>,
    pub trai_ky: Option<TraiKy>,
    pub tu_chan: Option<TuChan>,
    pub ho_dao: Option<String>,
    pub xa_dao: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl BelieverListQuery {
    pub fn into_filter(self, default_page_size: usize) -> BelieverFilter {
        BelieverFilter {
            search: self.search.unwrap_or_default(),
            gender: self.gender,
            trai_ky: self.trai_ky,
            tu_chan: self.tu_chan,
            ho_dao: self.ho_dao.unwrap_or_default(),
            xa_dao: self.xa_dao.unwrap_or_default(),
            sort_by: SortKey::from_param(self.sort_by.as_deref()),
            sort_order: SortOrder::from_param(self.sort_order.as_deref()),
            page: self.page.unwrap_or(1).max(1),
            page_size: self.page_size.unwrap_or(default_page_size).max(1),
        }
    }
}

/// Resolved filter handed to the record store
#[derive(Debug, Clone)]
pub struct BelieverFilter {
    /// Raw search text; the store normalizes it before matching against
    /// `full_name_normalized`.
    pub search: String,
    pub gender: Option<Gender>,
    pub trai_ky: Option<TraiKy>,
    pub tu_chan: Option<TuChan>,
    pub ho_dao: String,
    pub xa_dao: String,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    FullName,
    DateOfBirth,
    Gender,
    CreatedAt,
    UpdatedAt,
}

impl SortKey {
    /// Unknown sort keys fall back to creation time instead of erroring, the
    /// behavior the roster UI has always relied on.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("fullName") => SortKey::FullName,
            Some("dateOfBirth") => SortKey::DateOfBirth,
            Some("gender") => SortKey::Gender,
            Some("updatedAt") => SortKey::UpdatedAt,
            _ => SortKey::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Pagination envelope returned alongside list results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// One page of believers plus its pagination envelope
#[derive(Debug, Clone)]
pub struct BelieverPage {
    pub data: Vec<Believer>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_believer(full_name: &str) -> NewBeliever {
        NewBeliever {
            full_name: full_name.to_string(),
            date_of_birth: None,
            gender: None,
            xa_dao: None,
            ho_dao: None,
            ngay_nhap_mon: None,
            ngay_tam_thanh: None,
            trai_ky: None,
            tu_chan: None,
            father_name: None,
            mother_name: None,
            ngay_quy_lieu: None,
            note: None,
            phone: None,
            email: None,
            address: None,
            rank_assignments: Vec::new(),
        }
    }

    #[test]
    fn test_new_believer_computes_normalized_name() {
        let believer = Believer::new(&new_believer("Nguyễn Văn Hùng"));
        assert_eq!(believer.full_name, "Nguyễn Văn Hùng");
        assert_eq!(believer.full_name_normalized, "nguyen van hung");
    }

    #[test]
    fn test_rename_keeps_normalized_name_in_sync() {
        let mut believer = Believer::new(&new_believer("Nguyễn Văn A"));
        believer.apply_update(BelieverUpdate {
            full_name: Some("Trần Thị Đẹp".to_string()),
            ..Default::default()
        });
        assert_eq!(believer.full_name, "Trần Thị Đẹp");
        assert_eq!(believer.full_name_normalized, "tran thi dep");
    }

    #[test]
    fn test_update_leaves_absent_fields_unchanged() {
        let mut data = new_believer("Nguyễn Văn A");
        data.phone = Some("0901234567".to_string());
        let mut believer = Believer::new(&data);

        believer.apply_update(BelieverUpdate {
            note: Some("đã chuyển họ đạo".to_string()),
            ..Default::default()
        });

        assert_eq!(believer.phone.as_deref(), Some("0901234567"));
        assert_eq!(believer.note.as_deref(), Some("đã chuyển họ đạo"));
        assert_eq!(believer.full_name, "Nguyễn Văn A");
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let believer = Believer::new(&new_believer("Nguyễn Văn A"));
        let value = serde_json::to_value(&believer).unwrap();
        assert!(value.get("fullName").is_some());
        assert!(value.get("fullNameNormalized").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("full_name").is_none());
    }

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(
            serde_json::to_value(Gender::Male).unwrap(),
            serde_json::json!("MALE")
        );
        assert_eq!(
            serde_json::to_value(TraiKy::SixteenDays).unwrap(),
            serde_json::json!("SIXTEEN_DAYS")
        );
        assert_eq!(
            serde_json::to_value(TuChan::Tbhc).unwrap(),
            serde_json::json!("TBHC")
        );
    }

    #[test]
    fn test_sort_key_fallback() {
        assert_eq!(SortKey::from_param(Some("fullName")), SortKey::FullName);
        assert_eq!(SortKey::from_param(Some("createdAt")), SortKey::CreatedAt);
        assert_eq!(SortKey::from_param(Some("nonsense")), SortKey::CreatedAt);
        assert_eq!(SortKey::from_param(None), SortKey::CreatedAt);
        assert_eq!(SortOrder::from_param(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("upside-down")), SortOrder::Desc);
    }
}
