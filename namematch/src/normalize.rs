//! Normalization of Vietnamese person names for comparison and search
//!
//! Stored believer records carry a precomputed `full_name_normalized` search
//! key built with [`normalize`]; duplicate checks and list search run user
//! input through the same function so both sides of every comparison agree.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Letters canonical decomposition leaves untouched. NFD splits every
/// accented Vietnamese vowel into base letter plus combining marks, but the
/// stroked letter has no decomposition and must be mapped by hand.
const STROKED_LETTERS: &[(char, char)] = &[('đ', 'd'), ('Đ', 'd')];

/// Normalizes a Vietnamese name for comparison
///
/// - Converts to lowercase
/// - Trims and collapses runs of whitespace to single spaces
/// - Decomposes accented letters (NFD) and drops the combining marks
/// - Maps `đ`/`Đ` to `d`
///
/// Pure, total and idempotent; empty input yields empty output.
///
/// # Examples
///
/// ```
/// use namematch::normalize;
///
/// assert_eq!(normalize("Nguyễn Văn Hùng"), "nguyen van hung");
/// assert_eq!(normalize("Trần Thị Đẹp"), "tran thi dep");
/// assert_eq!(normalize("  Nguyễn   Văn  A "), "nguyen van a");
/// ```
pub fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    collapsed
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            STROKED_LETTERS
                .iter()
                .find(|(stroked, _)| *stroked == c)
                .map(|(_, base)| *base)
                .unwrap_or(c)
        })
        .collect()
}

/// First whitespace-delimited token of the normalized name
///
/// Candidate lookups in the record store narrow by this token before any
/// scoring happens. Name variants that differ in the leading token are
/// therefore never surfaced by the lookup.
///
/// # Examples
///
/// ```
/// use namematch::surname_token;
///
/// assert_eq!(surname_token("Nguyễn Văn A"), Some("nguyen".to_string()));
/// assert_eq!(surname_token("   "), None);
/// ```
pub fn surname_token(name: &str) -> Option<String> {
    normalize(name)
        .split_whitespace()
        .next()
        .map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Nguyễn Văn Hùng"), "nguyen van hung");
        assert_eq!(normalize("Trần Thị Đẹp"), "tran thi dep");
        assert_eq!(normalize("Lê Hoàng Phước Thiện"), "le hoang phuoc thien");
        assert_eq!(normalize("ĐẶNG VĂN LỄ"), "dang van le");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Nguyễn   Văn  A "), "nguyen van a");
        assert_eq!(normalize("\tTrần\n Văn  B"), "tran van b");
    }

    #[test]
    fn test_normalize_is_total() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("123 ABC"), "123 abc");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in ["Nguyễn Văn A", "TRẦN THỊ ĐẸP", "  Phạm   Hữu  Lộc ", ""] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", name);
        }
    }

    #[test]
    fn test_normalize_case_and_diacritic_insensitive() {
        assert_eq!(normalize("Nguyễn"), normalize("nguyen"));
        assert_eq!(normalize("Nguyễn"), "nguyen");
    }

    // Every letter of the Vietnamese alphabet must reduce to its unaccented
    // base letter, in both cases. NFD covers the vowels; the substitution
    // table must cover the rest.
    #[test]
    fn test_full_vietnamese_alphabet() {
        let families = [
            ("aàáảãạăằắẳẵặâầấẩẫậ", 'a'),
            ("eèéẻẽẹêềếểễệ", 'e'),
            ("iìíỉĩị", 'i'),
            ("oòóỏõọôồốổỗộơờớởỡợ", 'o'),
            ("uùúủũụưừứửữự", 'u'),
            ("yỳýỷỹỵ", 'y'),
            ("dđ", 'd'),
        ];

        for (letters, base) in families {
            for letter in letters.chars() {
                assert_eq!(
                    normalize(&letter.to_string()),
                    base.to_string(),
                    "lowercase '{}' did not reduce to '{}'",
                    letter,
                    base
                );
            }
            for letter in letters.to_uppercase().chars() {
                assert_eq!(
                    normalize(&letter.to_string()),
                    base.to_string(),
                    "uppercase '{}' did not reduce to '{}'",
                    letter,
                    base
                );
            }
        }
    }

    #[test]
    fn test_surname_token() {
        assert_eq!(surname_token("Nguyễn Văn A"), Some("nguyen".to_string()));
        assert_eq!(surname_token("Đỗ"), Some("do".to_string()));
        assert_eq!(surname_token(""), None);
        assert_eq!(surname_token("   "), None);
    }
}
