use super::model::{RowMask, Table};
use super::tag::CATEGORY;

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// True for rows whose `Category` is null, empty, or whitespace-only.
///
/// A table without a `Category` column counts as entirely untagged; the
/// normalizer guarantees the column exists after ingestion, so that branch
/// only matters for hand-built tables.
pub fn untagged_mask(table: &Table) -> RowMask {
    match table.column(CATEGORY) {
        Some(col) => col.iter().map(|v| v.as_text().trim().is_empty()).collect(),
        None => vec![true; table.n_rows()],
    }
}

/// True for rows whose value in `column`, coerced to a string (null → ""),
/// contains `keyword` as a case-insensitive literal substring. No wildcard
/// or regex semantics. An unknown column selects nothing.
pub fn keyword_mask(table: &Table, column: &str, keyword: &str) -> RowMask {
    let needle = keyword.to_lowercase();
    match table.column(column) {
        Some(col) => col
            .iter()
            .map(|v| v.as_text().to_lowercase().contains(&needle))
            .collect(),
        None => vec![false; table.n_rows()],
    }
}

/// The tagging workflow's effective mask: untagged rows, narrowed by the
/// keyword when one is given. An empty keyword leaves the untagged mask
/// untouched, so keyword filtering never widens the selection.
pub fn search_mask(table: &Table, column: &str, keyword: &str) -> RowMask {
    let base = untagged_mask(table);
    if keyword.is_empty() {
        return base;
    }
    base.iter()
        .zip(keyword_mask(table, column, keyword))
        .map(|(&a, b)| a && b)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table_with_category(values: Vec<CellValue>) -> Table {
        let mut t = Table::new();
        t.push_column(CATEGORY, values);
        t
    }

    #[test]
    fn untagged_mask_truth_table() {
        let t = table_with_category(vec![
            CellValue::Text("".into()),
            CellValue::Text("x".into()),
            CellValue::Text(" ".into()),
            CellValue::Null,
        ]);
        assert_eq!(untagged_mask(&t), [true, false, true, true]);
    }

    #[test]
    fn untagged_mask_without_category_column() {
        let mut t = Table::new();
        t.push_column("A", vec![CellValue::Number(1.0), CellValue::Number(2.0)]);
        assert_eq!(untagged_mask(&t), [true, true]);
    }

    #[test]
    fn keyword_mask_is_case_insensitive() {
        let mut t = Table::new();
        t.push_column(
            "Desc",
            vec![
                CellValue::Text("Apple Store".into()),
                CellValue::Text("banana".into()),
                CellValue::Null,
            ],
        );
        assert_eq!(keyword_mask(&t, "Desc", "apple"), [true, false, false]);
        assert_eq!(keyword_mask(&t, "Desc", "AN"), [false, true, false]);
    }

    #[test]
    fn keyword_mask_treats_special_characters_literally() {
        let mut t = Table::new();
        t.push_column(
            "Desc",
            vec![
                CellValue::Text("uber *trip".into()),
                CellValue::Text("uber trip".into()),
            ],
        );
        // "*" must match only the literal asterisk, not act as a wildcard
        assert_eq!(keyword_mask(&t, "Desc", "*trip"), [true, false]);
        assert_eq!(keyword_mask(&t, "Desc", "u.er"), [false, false]);
    }

    #[test]
    fn keyword_mask_matches_numeric_cells_via_string_form() {
        let mut t = Table::new();
        t.push_column(
            "Amount",
            vec![CellValue::Number(12.5), CellValue::Number(3.0)],
        );
        assert_eq!(keyword_mask(&t, "Amount", "12.5"), [true, false]);
    }

    #[test]
    fn empty_keyword_leaves_untagged_mask_alone() {
        let mut t = table_with_category(vec![
            CellValue::Text("".into()),
            CellValue::Text("Private".into()),
            CellValue::Null,
        ]);
        t.push_column(
            "Desc",
            vec![
                CellValue::Text("coffee".into()),
                CellValue::Text("coffee".into()),
                CellValue::Text("rent".into()),
            ],
        );
        assert_eq!(search_mask(&t, "Desc", ""), untagged_mask(&t));
    }

    #[test]
    fn search_mask_narrows_within_untagged_rows_only() {
        let mut t = table_with_category(vec![
            CellValue::Text("".into()),
            CellValue::Text("Private".into()),
            CellValue::Null,
        ]);
        t.push_column(
            "Desc",
            vec![
                CellValue::Text("coffee".into()),
                CellValue::Text("coffee".into()),
                CellValue::Text("rent".into()),
            ],
        );
        // row 1 matches the keyword but is already tagged
        assert_eq!(search_mask(&t, "Desc", "coffee"), [true, false, false]);
    }
}
