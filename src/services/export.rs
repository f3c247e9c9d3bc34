//! CSV export of the believer roster
//!
//! Produces a UTF-8 CSV with a BOM so spreadsheet tools pick up the encoding
//! of the Vietnamese headers and values.

use chrono::NaiveDate;

use crate::models::Believer;

const BOM: char = '\u{FEFF}';

const HEADERS: [&str; 13] = [
    "Họ và tên",
    "Ngày sinh",
    "Giới tính",
    "Xã Đạo",
    "Họ Đạo",
    "Ngày nhập môn",
    "Ngày Tam Thanh",
    "Trai Kỳ",
    "Tu Chấn",
    "Tên cha",
    "Tên mẹ",
    "Ngày quy liễu",
    "Ghi chú",
];

/// Renders believers as CSV, header row first
pub fn believers_to_csv(believers: &[Believer]) -> String {
    let mut lines = Vec::with_capacity(believers.len() + 1);
    lines.push(
        HEADERS
            .iter()
            .map(|h| escape_cell(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for believer in believers {
        let cells = [
            believer.full_name.clone(),
            format_date(believer.date_of_birth),
            believer.gender.map(|g| g.label()).unwrap_or("").to_string(),
            believer.xa_dao.clone().unwrap_or_default(),
            believer.ho_dao.clone().unwrap_or_default(),
            format_date(believer.ngay_nhap_mon),
            format_date(believer.ngay_tam_thanh),
            believer.trai_ky.map(|t| t.label()).unwrap_or("").to_string(),
            believer.tu_chan.map(|t| t.label()).unwrap_or("").to_string(),
            believer.father_name.clone().unwrap_or_default(),
            believer.mother_name.clone().unwrap_or_default(),
            format_date(believer.ngay_quy_lieu),
            believer.note.clone().unwrap_or_default(),
        ];
        lines.push(
            cells
                .iter()
                .map(|c| escape_cell(c))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    format!("{}{}", BOM, lines.join("\n"))
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

// Cells containing commas, quotes or newlines are quoted, with inner quotes
// doubled.
fn escape_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, NewBeliever, TraiKy, TuChan};

    fn believer(full_name: &str) -> Believer {
        Believer::new(&NewBeliever {
            full_name: full_name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 1, 15),
            gender: Some(Gender::Male),
            xa_dao: Some("Xã Đạo Tân Hội".to_string()),
            ho_dao: Some("Họ Đạo Thái Bình".to_string()),
            ngay_nhap_mon: NaiveDate::from_ymd_opt(2000, 5, 20),
            ngay_tam_thanh: None,
            trai_ky: Some(TraiKy::TenDays),
            tu_chan: Some(TuChan::Linh),
            father_name: Some("Nguyễn Văn B".to_string()),
            mother_name: Some("Trần Thị C".to_string()),
            ngay_quy_lieu: None,
            note: None,
            phone: None,
            email: None,
            address: None,
            rank_assignments: Vec::new(),
        })
    }

    #[test]
    fn test_csv_starts_with_bom_and_headers() {
        let csv = believers_to_csv(&[]);
        assert!(csv.starts_with('\u{FEFF}'));
        assert!(csv.contains("Họ và tên,Ngày sinh,Giới tính"));
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_csv_renders_labels_and_dates() {
        let csv = believers_to_csv(&[believer("Nguyễn Văn A")]);
        let row = csv.lines().nth(1).unwrap();

        assert!(row.starts_with("Nguyễn Văn A,15/01/1980,Nam,"));
        assert!(row.contains("10 ngày"));
        assert!(row.contains("Linh"));
        assert!(row.contains("20/05/2000"));
    }

    #[test]
    fn test_csv_escapes_special_cells() {
        let mut b = believer("Nguyễn Văn A");
        b.note = Some("ghi chú, có \"dấu ngoặc\"".to_string());
        let csv = believers_to_csv(&[b]);

        assert!(csv.contains("\"ghi chú, có \"\"dấu ngoặc\"\"\""));
    }

    #[test]
    fn test_csv_one_row_per_believer() {
        let rows = [believer("Nguyễn Văn A"), believer("Trần Thị B")];
        let csv = believers_to_csv(&rows);
        assert_eq!(csv.lines().count(), 3);
    }
}
