use super::model::{CellValue, RowMask, Table};

/// Reserved tag columns, guaranteed present after ingestion.
pub const CATEGORY: &str = "Category";
pub const SUBCATEGORY: &str = "Subcategory";

// ---------------------------------------------------------------------------
// Tag-column normalizer
// ---------------------------------------------------------------------------

/// Make sure `Category` and `Subcategory` exist, adding full-length
/// empty-string columns when missing. Existing columns are left untouched,
/// nulls included. Idempotent.
pub fn ensure_tag_columns(table: &mut Table) {
    let n_rows = table.n_rows();
    for name in [CATEGORY, SUBCATEGORY] {
        if !table.has_column(name) {
            table.push_column(name, vec![CellValue::Text(String::new()); n_rows]);
        }
    }
}

// ---------------------------------------------------------------------------
// Tagger
// ---------------------------------------------------------------------------

/// Write the trimmed category/subcategory pair into every masked row,
/// overwriting prior values. Returns the number of rows mutated.
///
/// "Nothing to tag" (blank label after trimming, an all-false mask, or a
/// mask of the wrong length) is a quiet no-op returning 0, not an error.
/// Preconditions are checked before any cell is touched, so a refused call
/// leaves the table exactly as it was.
pub fn apply_tag(table: &mut Table, mask: &RowMask, category: &str, subcategory: &str) -> usize {
    let category = category.trim();
    let subcategory = subcategory.trim();
    if category.is_empty() || subcategory.is_empty() {
        return 0;
    }
    if mask.len() != table.n_rows() || !mask.iter().any(|&m| m) {
        return 0;
    }

    let tagged = table.set_where(CATEGORY, mask, CellValue::Text(category.to_string()));
    table.set_where(SUBCATEGORY, mask, CellValue::Text(subcategory.to_string()));
    tagged
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
