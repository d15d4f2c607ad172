use crate::LectioError;

/// Canonical book names in Bible order. A book's id is its 1-based position
/// in this table, stable across the whole system.
///
/// Declaration order is part of the lookup contract: the substring fallback
/// in [resolve_book_id](resolve_book_id) returns the first containing name.
pub const BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Hand-curated book abbreviations. These are checked before the substring
/// fallback so that short inputs like "jud" resolve to their curated book
/// instead of partially matching another one.
const ABBREVIATIONS: [(&str, i32); 107] = [
    ("gen", 1),
    ("ge", 1),
    ("exo", 2),
    ("exod", 2),
    ("ex", 2),
    ("lev", 3),
    ("le", 3),
    ("num", 4),
    ("nu", 4),
    ("deut", 5),
    ("deu", 5),
    ("dt", 5),
    ("josh", 6),
    ("jos", 6),
    ("judg", 7),
    ("jdg", 7),
    ("rut", 8),
    ("ru", 8),
    ("1sam", 9),
    ("1sa", 9),
    ("2sam", 10),
    ("2sa", 10),
    ("1kin", 11),
    ("1ki", 11),
    ("1kgs", 11),
    ("2kin", 12),
    ("2ki", 12),
    ("2kgs", 12),
    ("1chr", 13),
    ("1ch", 13),
    ("2chr", 14),
    ("2ch", 14),
    ("ezr", 15),
    ("neh", 16),
    ("est", 17),
    ("psa", 19),
    ("ps", 19),
    ("psalm", 19),
    ("prov", 20),
    ("pro", 20),
    ("ecc", 21),
    ("eccl", 21),
    ("song", 22),
    ("sos", 22),
    ("isa", 23),
    ("jer", 24),
    ("lam", 25),
    ("ezek", 26),
    ("eze", 26),
    ("dan", 27),
    ("hos", 28),
    ("joe", 29),
    ("amo", 30),
    ("oba", 31),
    ("jon", 32),
    ("mic", 33),
    ("nah", 34),
    ("hab", 35),
    ("zeph", 36),
    ("zep", 36),
    ("hag", 37),
    ("zech", 38),
    ("zec", 38),
    ("mal", 39),
    ("matt", 40),
    ("mat", 40),
    ("mt", 40),
    ("mar", 41),
    ("mk", 41),
    ("luk", 42),
    ("lk", 42),
    ("joh", 43),
    ("jhn", 43),
    ("jn", 43),
    ("act", 44),
    ("rom", 45),
    ("1cor", 46),
    ("1co", 46),
    ("2cor", 47),
    ("2co", 47),
    ("gal", 48),
    ("eph", 49),
    ("phil", 50),
    ("php", 50),
    ("col", 51),
    ("1thess", 52),
    ("1th", 52),
    ("2thess", 53),
    ("2th", 53),
    ("1tim", 54),
    ("1ti", 54),
    ("2tim", 55),
    ("2ti", 55),
    ("tit", 56),
    ("phlm", 57),
    ("phm", 57),
    ("heb", 58),
    ("jas", 59),
    ("jam", 59),
    ("1pet", 60),
    ("1pe", 60),
    ("2pet", 61),
    ("2pe", 61),
    ("1jn", 62),
    ("2jn", 63),
    ("3jn", 64),
    ("jud", 65),
];

/// Resolves a book name, abbreviation, or partial name to its book id.
///
/// Resolution order, case-insensitive with surrounding whitespace trimmed:
/// exact canonical name, curated abbreviation, then substring containment
/// against the canonical table in declaration order. The last step is
/// intentionally permissive and can pick an unintended book for very short
/// inputs.
pub fn resolve_book_id(input: &str) -> Result<i32, LectioError> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Err(LectioError::BookNotFound {
            book: input.to_string(),
        });
    }

    if let Some(pos) = BOOKS.iter().position(|b| b.to_lowercase() == needle) {
        return Ok(pos as i32 + 1);
    }

    if let Some((_, id)) = ABBREVIATIONS
        .iter()
        .find(|(abbreviation, _)| *abbreviation == needle)
    {
        return Ok(*id);
    }

    BOOKS
        .iter()
        .position(|b| b.to_lowercase().contains(&needle))
        .map(|pos| pos as i32 + 1)
        .ok_or_else(|| LectioError::BookNotFound {
            book: input.trim().to_string(),
        })
}

/// Looks up the canonical name for a book id.
pub fn book_name(id: i32) -> Option<&'static str> {
    if (1..=BOOKS.len() as i32).contains(&id) {
        Some(BOOKS[(id - 1) as usize])
    } else {
        None
    }
}

/// Returns the canonical book name for any resolvable input, or the trimmed
/// input unchanged so callers can still display what the user typed.
pub fn normalize_book_name(input: &str) -> String {
    match resolve_book_id(input) {
        Ok(id) => BOOKS[(id - 1) as usize].to_string(),
        Err(_) => input.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_resolve_in_any_case() {
        for (i, name) in BOOKS.iter().enumerate() {
            let id = i as i32 + 1;
            assert_eq!(resolve_book_id(name).unwrap(), id);
            assert_eq!(resolve_book_id(&name.to_uppercase()).unwrap(), id);
            assert_eq!(resolve_book_id(&format!(" {} ", name)).unwrap(), id);
        }
    }

    #[test]
    fn abbreviations_resolve_to_their_book() {
        for (abbreviation, id) in ABBREVIATIONS.iter() {
            assert_eq!(
                resolve_book_id(abbreviation).unwrap(),
                *id,
                "abbreviation {}",
                abbreviation
            );
            assert_eq!(
                resolve_book_id(abbreviation).unwrap(),
                resolve_book_id(book_name(*id).unwrap()).unwrap()
            );
        }
    }

    #[test]
    fn job_is_exact_before_fuzzy() {
        assert_eq!(resolve_book_id("job").unwrap(), 18);
        assert_eq!(resolve_book_id("jud").unwrap(), 65);
        assert_eq!(resolve_book_id("judg").unwrap(), 7);
    }

    #[test]
    fn substring_fallback_takes_first_in_table_order() {
        // "1 Corinthians" is declared before "2 Corinthians"
        assert_eq!(resolve_book_id("corinth").unwrap(), 46);
        assert_eq!(resolve_book_id("Solomon").unwrap(), 22);
    }

    #[test]
    fn unknown_book_fails() {
        for input in ["", "   ", "Gandalf", "4 Kings"] {
            match resolve_book_id(input) {
                Err(LectioError::BookNotFound { .. }) => {}
                other => panic!("expected BookNotFound, got {:?}", other),
            }
        }
    }

    #[test]
    fn normalize_returns_canonical_or_passthrough() {
        assert_eq!(normalize_book_name("psalm"), "Psalms");
        assert_eq!(normalize_book_name("JN"), "John");
        assert_eq!(normalize_book_name("  Gandalf "), "Gandalf");
    }
}
