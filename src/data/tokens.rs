use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::model::Table;

// ---------------------------------------------------------------------------
// Stopwords
// ---------------------------------------------------------------------------

/// German short function words, stored uppercase because normalization
/// uppercases tokens before the lookup.
const GERMAN_STOPWORDS: &[&str] = &[
    "UND", "FÜR", "FUR", "VON", "DER", "DIE", "MIT", "AUF", "IM", "AM", "DEN", "EIN", "EINE",
    "DES", "IN", "AN",
];

const ENGLISH_STOPWORDS: &[&str] = &[
    "AND", "THE", "TO", "FOR", "OF", "IN", "AT", "ON", "BY", "MY", "PAY",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    GERMAN_STOPWORDS
        .iter()
        .chain(ENGLISH_STOPWORDS)
        .copied()
        .collect()
});

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Split free text into uppercase tokens for frequency analysis.
///
/// Every character that is not a word character (letters including
/// diacritics, digits, underscore) or whitespace becomes a space, so
/// punctuation splits adjacent words rather than gluing them together.
/// Tokens shorter than `min_len` characters and stopwords are dropped.
pub fn normalize(text: &str, min_len: usize) -> Vec<String> {
    let cleaned: String = text
        .to_uppercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= min_len && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Frequency counter
// ---------------------------------------------------------------------------

/// One ranked keyword: its occurrence count and its share of all kept
/// tokens in the scanned column (so top-k shares need not sum to 1).
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordFrequency {
    pub keyword: String,
    pub count: usize,
    pub share: f64,
}

/// The `k` most frequent tokens of a column, descending by count, ties
/// broken by first-encountered order. Null cells contribute no tokens.
/// An unknown column or a fully filtered-out column yields an empty vec.
///
/// Pure over `(table contents, column, k, min_len)`, which is what makes
/// the host-side memoization in [`crate::state::AppState`] safe.
pub fn most_common(table: &Table, column: &str, k: usize, min_len: usize) -> Vec<KeywordFrequency> {
    let Some(col) = table.column(column) else {
        return Vec::new();
    };

    // Bag in first-insertion order, with a side index for O(1) updates.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut bag: Vec<(String, usize)> = Vec::new();
    for cell in col {
        if cell.is_null() {
            continue;
        }
        for token in normalize(&cell.as_text(), min_len) {
            match index.get(&token) {
                Some(&i) => bag[i].1 += 1,
                None => {
                    index.insert(token.clone(), bag.len());
                    bag.push((token, 1));
                }
            }
        }
    }

    let total: usize = bag.iter().map(|(_, c)| c).sum();
    if total == 0 {
        return Vec::new();
    }

    // Stable sort keeps insertion order among equal counts.
    bag.sort_by(|a, b| b.1.cmp(&a.1));
    bag.truncate(k);
    bag.into_iter()
        .map(|(keyword, count)| KeywordFrequency {
            keyword,
            count,
            share: count as f64 / total as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn desc_table(values: &[Option<&str>]) -> Table {
        let mut t = Table::new();
        t.push_column(
            "desc",
            values
                .iter()
                .map(|v| match v {
                    Some(s) => CellValue::Text((*s).to_string()),
                    None => CellValue::Null,
                })
                .collect(),
        );
        t
    }

    #[test]
    fn normalize_uppercases_and_strips_punctuation() {
        assert_eq!(normalize("Uber *Trip, Berlin!", 2), ["UBER", "TRIP", "BERLIN"]);
        // punctuation splits words instead of joining them
        assert_eq!(normalize("e-mail", 2), ["MAIL"]);
    }

    #[test]
    fn normalize_drops_stopwords_and_short_tokens() {
        assert_eq!(normalize("the cat and a dog", 2), ["CAT", "DOG"]);
        assert_eq!(normalize("Miete für die Wohnung", 2), ["MIETE", "WOHNUNG"]);
    }

    #[test]
    fn normalize_keeps_diacritics_and_digits() {
        assert_eq!(normalize("Café Müller 24", 2), ["CAFÉ", "MÜLLER", "24"]);
    }

    #[test]
    fn most_common_ranks_cat_and_dog() {
        let t = desc_table(&[Some("the cat"), Some("cat and dog"), Some("dog")]);
        let rows = most_common(&t, "desc", 2, 2);
        assert_eq!(rows.len(), 2);
        let keywords: Vec<&str> = rows.iter().map(|r| r.keyword.as_str()).collect();
        assert!(keywords.contains(&"CAT") && keywords.contains(&"DOG"));
        assert!(rows.iter().all(|r| r.count == 2));
    }

    #[test]
    fn ties_break_by_first_insertion_order() {
        let t = desc_table(&[Some("beta alpha"), Some("alpha beta")]);
        let rows = most_common(&t, "desc", 10, 2);
        assert_eq!(rows[0].keyword, "BETA");
        assert_eq!(rows[1].keyword, "ALPHA");
    }

    #[test]
    fn share_uses_the_whole_bag_total() {
        let t = desc_table(&[Some("aa aa aa bb bb cc")]);
        let rows = most_common(&t, "desc", 2, 2);
        // total kept tokens = 6 even though only the top 2 are returned
        assert_eq!(rows[0].count, 3);
        assert!((rows[0].share - 0.5).abs() < 1e-12);
        assert!((rows[1].share - 2.0 / 6.0).abs() < 1e-12);
        assert!(rows.iter().all(|r| (0.0..=1.0).contains(&r.share)));
    }

    #[test]
    fn null_cells_and_filtered_columns_yield_empty() {
        let t = desc_table(&[None, None]);
        assert!(most_common(&t, "desc", 5, 2).is_empty());

        let t = desc_table(&[Some("the and to")]);
        assert!(most_common(&t, "desc", 5, 2).is_empty());

        assert!(most_common(&t, "missing", 5, 2).is_empty());
    }

    #[test]
    fn counts_sum_to_total_kept_tokens() {
        let t = desc_table(&[Some("rewe markt rewe"), Some("amazon payments"), None]);
        let rows = most_common(&t, "desc", 100, 2);
        let total: usize = rows.iter().map(|r| r.count).sum();
        assert_eq!(total, 5);
        let share_sum: f64 = rows.iter().map(|r| r.share).sum();
        assert!((share_sum - 1.0).abs() < 1e-12);
    }
}
