//! ISBN normalization
//!
//! Scanned and typed ISBNs arrive with dashes and spaces in unpredictable
//! places. Every code path that keys on an ISBN (lookup, existence check,
//! insert) must normalize through this one function, otherwise the
//! find-or-create check and the stored value drift apart and duplicates
//! accumulate silently.

/// Strip dashes and whitespace from an ISBN.
///
/// No checksum or length validation happens here; the normalized string is
/// treated as an opaque key by the lookup pipeline.
pub fn normalize(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_dashes() {
        assert_eq!(normalize("978-3-16-148410-0"), "9783161484100");
    }

    #[test]
    fn strips_whitespace() {
        assert_eq!(normalize(" 978 3161 484100 "), "9783161484100");
    }

    #[test]
    fn plain_isbn_unchanged() {
        assert_eq!(normalize("9783161484100"), "9783161484100");
    }

    #[test]
    fn dashed_and_plain_agree() {
        assert_eq!(normalize("978-3-16-148410-0"), normalize("9783161484100"));
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
    }
}
