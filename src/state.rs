use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::data::filter::{search_mask, untagged_mask};
use crate::data::ingest::to_csv;
use crate::data::model::{RowMask, Table};
use crate::data::tag::{apply_tag, ensure_tag_columns, CATEGORY};
use crate::data::tokens::{most_common, KeywordFrequency};

/// Cache key for the keyword panel: table content hash plus the scalar
/// arguments of [`most_common`]. The counter itself is pure, so caching on
/// exactly these inputs is safe.
type FreqKey = (u64, String, usize, usize);

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering: the session-scoped table
/// and mask plus the user's current inputs.
pub struct AppState {
    /// Loaded table (None until the user opens a file).
    pub table: Option<Table>,

    /// Rows currently shown: untagged, optionally narrowed by keyword.
    pub mask: RowMask,

    /// Which text column the keyword search runs over.
    pub search_column: String,

    /// Case-insensitive literal search keyword ("" = no narrowing).
    pub keyword: String,

    /// Tag inputs applied to all visible rows.
    pub category: String,
    pub subcategory: String,

    /// Whether the keyword-discovery panel is open.
    pub show_keywords: bool,

    /// Keyword-discovery configuration.
    pub freq_column: String,
    pub freq_top_k: usize,
    pub freq_min_len: usize,

    /// Memoized frequency results, keyed on table contents + arguments.
    freq_cache: HashMap<FreqKey, Vec<KeywordFrequency>>,

    /// Colours for the categories assigned so far.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            mask: Vec::new(),
            search_column: String::new(),
            keyword: String::new(),
            category: String::new(),
            subcategory: String::new(),
            show_keywords: false,
            freq_column: String::new(),
            freq_top_k: 30,
            freq_min_len: 2,
            freq_cache: HashMap::new(),
            color_map: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Install a freshly ingested table, replacing any previous session.
    /// Normalizes the tag columns and resets the mask to all untagged rows.
    pub fn set_table(&mut self, mut table: Table) {
        ensure_tag_columns(&mut table);
        self.mask = untagged_mask(&table);

        let text_cols = table.text_columns();
        self.search_column = text_cols.first().cloned().unwrap_or_default();
        self.freq_column = self.search_column.clone();
        self.keyword.clear();
        self.freq_cache.clear();

        self.table = Some(table);
        self.rebuild_color_map();
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute the mask from the current search inputs: untagged rows,
    /// narrowed by the keyword when one is set.
    pub fn run_search(&mut self) {
        if let Some(table) = &self.table {
            self.mask = search_mask(table, &self.search_column, &self.keyword);
        }
    }

    /// Tag every visible row with the current category/subcategory pair.
    ///
    /// On success the mask resets to a fresh untagged mask, deliberately
    /// dropping the active keyword so every row that still needs tagging
    /// becomes visible.
    pub fn tag_visible(&mut self) {
        let Some(table) = self.table.as_mut() else {
            return;
        };
        let tagged = apply_tag(table, &self.mask, &self.category, &self.subcategory);
        if tagged == 0 {
            self.status_message = Some("Nothing to tag: need a category, a subcategory and at least one visible row".into());
            return;
        }

        let label = format!("{}/{}", self.category.trim(), self.subcategory.trim());
        log::info!("Tagged {tagged} rows as {label}");
        self.mask = untagged_mask(table);
        self.status_message = Some(format!("Tagged {tagged} row(s) as {label}"));
        self.rebuild_color_map();
    }

    /// Rebuild the category colour map from the tagged values.
    pub fn rebuild_color_map(&mut self) {
        self.color_map = self
            .table
            .as_ref()
            .map(|t| ColorMap::new(&t.unique_text_values(CATEGORY)));
    }

    /// Indices of the rows selected by the current mask.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, &selected)| selected)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Ranked keywords for the discovery panel, memoized per table contents
    /// and panel configuration.
    pub fn keyword_frequencies(&mut self) -> Vec<KeywordFrequency> {
        let Some(table) = &self.table else {
            return Vec::new();
        };
        let key = (
            table.content_hash(),
            self.freq_column.clone(),
            self.freq_top_k,
            self.freq_min_len,
        );
        if let Some(cached) = self.freq_cache.get(&key) {
            return cached.clone();
        }
        let rows = most_common(table, &self.freq_column, self.freq_top_k, self.freq_min_len);
        self.freq_cache.insert(key, rows.clone());
        rows
    }

    /// Serialize the session's table for download.
    pub fn export_csv(&self) -> Result<Vec<u8>> {
        let table = self.table.as_ref().context("no table loaded")?;
        to_csv(table).context("serializing CSV")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
