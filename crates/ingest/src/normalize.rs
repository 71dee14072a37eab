use crate::coerce;
use crate::table::RawTable;
use adlens_core::{fields, AdLensError, AdLensResult};
use tracing::{debug, info};

/// Source labels renamed to canonical field names. Applied after the
/// lower-case/underscore pass, so the keys are already in canonical shape.
const RENAMES: [(&str, &str); 4] = [
    ("amount_spent_(ngn)", fields::AMOUNT_SPENT),
    ("cpc_(cost_per_link_click)", fields::CPC),
    ("ctr_(all)", fields::CTR),
    // Spreadsheet tools deduplicate a repeated ad-set-name column with a
    // numeric suffix. Mapping it back makes the later occurrence win.
    ("ad_set_name.1", fields::AD_SET_NAME),
];

/// What normalization resolved for a source: the canonical column labels in
/// source order, the renames that fired, the columns outside the known
/// schema, and whether the leading export-artifact row was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSchema {
    pub columns: Vec<String>,
    pub renamed: Vec<(String, String)>,
    pub extra: Vec<String>,
    pub artifact_row_dropped: bool,
}

/// A table whose labels are canonical and whose leading artifact row, when
/// recognized, has been removed. Cells are still uninterpreted strings.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub rows: Vec<Vec<String>>,
    pub schema: TableSchema,
}

impl NormalizedTable {
    /// The table re-expressed as a raw one, canonical labels as headers.
    pub fn to_raw(&self) -> RawTable {
        RawTable {
            headers: self.schema.columns.clone(),
            rows: self.rows.clone(),
        }
    }
}

/// Canonicalize labels, apply the fixed renames, verify the required
/// columns, and drop the leading export-artifact row if one is present.
///
/// A required column that is still missing after renaming is a fatal
/// schema error; everything else degrades per cell instead.
pub fn normalize_schema(table: &RawTable) -> AdLensResult<NormalizedTable> {
    if table.headers.is_empty() {
        return Err(AdLensError::Schema(
            "source has no header row".to_string(),
        ));
    }

    let mut columns = Vec::with_capacity(table.headers.len());
    let mut renamed = Vec::new();
    for raw_label in &table.headers {
        let canonical = canonicalize_label(raw_label);
        let resolved = apply_renames(&canonical);
        if resolved != canonical {
            renamed.push((raw_label.clone(), resolved.clone()));
        }
        if columns.contains(&resolved) {
            debug!(column = %resolved, "duplicate column label, later occurrence wins per cell");
        }
        columns.push(resolved);
    }

    for field in fields::REQUIRED {
        if !columns.iter().any(|c| c == field) {
            return Err(AdLensError::MissingColumn {
                field: field.to_string(),
            });
        }
    }

    let extra: Vec<String> = columns
        .iter()
        .filter(|c| !fields::is_known(c))
        .cloned()
        .collect();

    let mut rows = table.rows.clone();
    let artifact_row_dropped = rows
        .first()
        .map_or(false, |row| is_artifact_row(&columns, row));
    if artifact_row_dropped {
        info!("dropping leading artifact row with header-like cells in numeric columns");
        rows.remove(0);
    }

    debug!(
        columns = columns.len(),
        renamed = renamed.len(),
        extra = extra.len(),
        "schema normalized"
    );

    Ok(NormalizedTable {
        rows,
        schema: TableSchema {
            columns,
            renamed,
            extra,
            artifact_row_dropped,
        },
    })
}

/// Lower-case a raw label, strip a UTF-8 BOM and surrounding whitespace,
/// and collapse embedded whitespace runs to single underscores.
fn canonicalize_label(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn apply_renames(label: &str) -> String {
    for (source, target) in RENAMES {
        if label == source {
            return target.to_string();
        }
    }
    label.to_string()
}

/// Export tools prepend a second header-like row. It is recognized, not
/// assumed: every non-empty cell under a known numeric column must fail to
/// parse, and at least one such cell must exist. A row of real data never
/// matches; a genuinely all-empty row is kept for the cell-level pass.
fn is_artifact_row(columns: &[String], row: &[String]) -> bool {
    let mut saw_unparseable = false;
    for (idx, label) in columns.iter().enumerate() {
        if !fields::NUMERIC.contains(&label.as_str()) {
            continue;
        }
        let cell = row.get(idx).map(String::as_str).unwrap_or("");
        if cell.is_empty() {
            continue;
        }
        if coerce::parse_numeric(cell).is_some() {
            return false;
        }
        saw_unparseable = true;
    }
    saw_unparseable
}
