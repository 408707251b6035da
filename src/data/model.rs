use std::borrow::Cow;
use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the loose typing of a CSV column.
///
/// Numeric cells are always `f64`; anything that fails float conversion during
/// ingestion stays a `Text`. An empty CSV field is `Null`, not `Text("")`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// String coercion used for substring search and display.
    /// `Null` coerces to the empty string, never to a `"null"` placeholder.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Text(s) => Cow::Borrowed(s),
            CellValue::Number(v) => Cow::Owned(format!("{v}")),
            CellValue::Null => Cow::Borrowed(""),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

// -- Manual Hash (f64 via to_bits) so whole tables can be content-hashed --

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Number(v) => v.to_bits().hash(state),
            CellValue::Null => {}
        }
    }
}

// ---------------------------------------------------------------------------
// RowMask – boolean row selection
// ---------------------------------------------------------------------------

/// Boolean sequence parallel to the table's rows; `true` marks a selected
/// row. Masks are combined by logical AND.
pub type RowMask = Vec<bool>;

// ---------------------------------------------------------------------------
// Table – the in-memory tabular store
// ---------------------------------------------------------------------------

/// Column-major table: ordered column names with parallel value vectors.
///
/// Invariant: every column has the same length (the row count). The struct
/// only exposes operations that preserve this.
#[derive(Debug, Clone, Default)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new() -> Self {
        Table::default()
    }

    /// Number of rows (0 for a table with no columns).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Column names in insertion (header) order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Cells of a column, or `None` if no such column exists.
    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.index_of(name).map(|i| self.columns[i].as_slice())
    }

    /// Append a column. Its length must equal the current row count
    /// (any length is accepted for the first column).
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<CellValue>) {
        debug_assert!(
            self.columns.is_empty() || values.len() == self.n_rows(),
            "column length must match row count"
        );
        self.names.push(name.into());
        self.columns.push(values);
    }

    /// Masked in-place assignment: write `value` into every selected row of
    /// the named column. Returns the number of rows written (0 when the
    /// column is unknown or the mask length does not match).
    pub fn set_where(&mut self, name: &str, mask: &RowMask, value: CellValue) -> usize {
        let Some(idx) = self.index_of(name) else {
            return 0;
        };
        let col = &mut self.columns[idx];
        if mask.len() != col.len() {
            return 0;
        }
        let mut written = 0;
        for (cell, &selected) in col.iter_mut().zip(mask) {
            if selected {
                *cell = value.clone();
                written += 1;
            }
        }
        written
    }

    /// Names of columns that hold free text: at least one `Text` cell.
    /// All-numeric and all-null columns are excluded.
    pub fn text_columns(&self) -> Vec<String> {
        self.names
            .iter()
            .zip(&self.columns)
            .filter(|(_, col)| col.iter().any(|v| matches!(v, CellValue::Text(_))))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Sorted set of distinct non-blank string values in a column.
    pub fn unique_text_values(&self, name: &str) -> BTreeSet<String> {
        self.column(name)
            .into_iter()
            .flatten()
            .filter(|v| !v.is_null())
            .map(|v| v.as_text().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Hash over column names and every cell, in order. Identical contents
    /// always hash identically, so the result can key a memoization cache.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for (name, col) in self.names.iter().zip(&self.columns) {
            name.hash(&mut hasher);
            col.hash(&mut hasher);
        }
        hasher.finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut t = Table::new();
        t.push_column(
            "Desc",
            vec![
                CellValue::Text("coffee".into()),
                CellValue::Null,
                CellValue::Text("rent".into()),
            ],
        );
        t.push_column(
            "Amount",
            vec![
                CellValue::Number(3.5),
                CellValue::Number(12.0),
                CellValue::Number(800.0),
            ],
        );
        t
    }

    #[test]
    fn column_access_preserves_header_order() {
        let t = sample_table();
        assert_eq!(t.column_names(), ["Desc", "Amount"]);
        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.column("Amount").unwrap()[2], CellValue::Number(800.0));
        assert!(t.column("Nope").is_none());
    }

    #[test]
    fn set_where_writes_only_masked_rows() {
        let mut t = sample_table();
        let mask = vec![true, false, true];
        let n = t.set_where("Desc", &mask, CellValue::Text("x".into()));
        assert_eq!(n, 2);
        let col = t.column("Desc").unwrap();
        assert_eq!(col[0], CellValue::Text("x".into()));
        assert_eq!(col[1], CellValue::Null);
        assert_eq!(col[2], CellValue::Text("x".into()));
    }

    #[test]
    fn set_where_rejects_bad_mask_or_column() {
        let mut t = sample_table();
        assert_eq!(t.set_where("Desc", &vec![true], CellValue::Null), 0);
        assert_eq!(t.set_where("Nope", &vec![true; 3], CellValue::Null), 0);
        // table unchanged
        assert_eq!(
            t.column("Desc").unwrap()[0],
            CellValue::Text("coffee".into())
        );
    }

    #[test]
    fn text_columns_excludes_numeric() {
        let t = sample_table();
        assert_eq!(t.text_columns(), ["Desc"]);
    }

    #[test]
    fn null_coerces_to_empty_string() {
        assert_eq!(CellValue::Null.as_text(), "");
        assert_eq!(CellValue::Number(1.5).as_text(), "1.5");
    }

    #[test]
    fn content_hash_tracks_contents() {
        let a = sample_table();
        let b = sample_table();
        assert_eq!(a.content_hash(), b.content_hash());

        let mut c = sample_table();
        c.set_where("Desc", &vec![true, false, false], CellValue::Text("y".into()));
        assert_ne!(a.content_hash(), c.content_hash());
    }
}
