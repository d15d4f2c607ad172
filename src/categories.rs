use crate::{books, LectioError};

/// Curated life-situation categories, each mapping to an ordered list of
/// the book ids most relevant to it.
const LIFE_CATEGORIES: [(&str, &[i32]); 8] = [
    // Philippians, Psalms, Matthew, 1 Peter
    ("anxiety", &[50, 19, 40, 60]),
    ("faith", &[58, 45, 59, 48]),
    ("forgiveness", &[42, 49, 51, 62]),
    ("grief", &[19, 25, 43, 52, 66]),
    ("hope", &[45, 24, 23, 66]),
    ("love", &[62, 46, 22, 43]),
    ("strength", &[23, 19, 49, 50]),
    ("wisdom", &[20, 21, 18, 59]),
];

/// Looks up the thematic category for a book id.
pub fn book_category(book_id: i32) -> Result<&'static str, LectioError> {
    match book_id {
        1..=5 => Ok("Law"),
        6..=17 => Ok("History"),
        18..=22 => Ok("Wisdom"),
        23..=27 => Ok("Major Prophets"),
        28..=39 => Ok("Minor Prophets"),
        40..=43 => Ok("Gospels"),
        44 => Ok("History"),
        45..=57 => Ok("Pauline Epistles"),
        58..=65 => Ok("General Epistles"),
        66 => Ok("Apocalyptic"),
        _ => Err(LectioError::CategoryNotFound {
            category: book_id.to_string(),
        }),
    }
}

/// Same lookup for a book name or abbreviation; the name is resolved
/// through the book catalog first.
pub fn book_category_by_name(book: &str) -> Result<&'static str, LectioError> {
    let id = books::resolve_book_id(book)?;
    book_category(id)
}

/// Looks up the ordered book list for a life category. Absence is always
/// an error; there is no fallback.
pub fn books_by_life_category(name: &str) -> Result<Vec<i32>, LectioError> {
    let needle = name.trim().to_lowercase();
    LIFE_CATEGORIES
        .iter()
        .find(|(key, _)| *key == needle)
        .map(|(_, ids)| ids.to_vec())
        .ok_or_else(|| LectioError::CategoryNotFound {
            category: name.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_book_has_a_category() {
        for id in 1..=66 {
            assert!(book_category(id).is_ok(), "book {}", id);
        }
    }

    #[test]
    fn category_boundaries() {
        assert_eq!(book_category(1).unwrap(), "Law");
        assert_eq!(book_category(18).unwrap(), "Wisdom");
        assert_eq!(book_category(40).unwrap(), "Gospels");
        assert_eq!(book_category(44).unwrap(), "History");
        assert_eq!(book_category(45).unwrap(), "Pauline Epistles");
        assert_eq!(book_category(66).unwrap(), "Apocalyptic");
    }

    #[test]
    fn out_of_range_ids_fail() {
        for id in [0, -3, 67, 1000] {
            match book_category(id) {
                Err(LectioError::CategoryNotFound { .. }) => {}
                other => panic!("expected CategoryNotFound, got {:?}", other),
            }
        }
    }

    #[test]
    fn names_resolve_through_the_catalog() {
        assert_eq!(book_category_by_name("gen").unwrap(), "Law");
        assert_eq!(book_category_by_name("Revelation").unwrap(), "Apocalyptic");
        match book_category_by_name("Gandalf") {
            Err(LectioError::BookNotFound { .. }) => {}
            other => panic!("expected BookNotFound, got {:?}", other),
        }
    }

    #[test]
    fn life_categories_are_ordered_and_case_insensitive() {
        assert_eq!(
            books_by_life_category("Anxiety").unwrap(),
            vec![50, 19, 40, 60]
        );
        assert_eq!(
            books_by_life_category("  grief ").unwrap(),
            books_by_life_category("GRIEF").unwrap()
        );
        match books_by_life_category("prosperity") {
            Err(LectioError::CategoryNotFound { .. }) => {}
            other => panic!("expected CategoryNotFound, got {:?}", other),
        }
    }
}
