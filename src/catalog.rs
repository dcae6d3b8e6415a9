//! Product catalog: category metadata and spreadsheet-backed product lists.
//!
//! The catalog has two halves. The category list is static, hand-maintained
//! code — it drives navigation, the products index, and routing, and its order
//! is display order. Product rows live outside the binary in one `.xlsx`
//! workbook per category under the data directory, so the sales team can edit
//! listings without touching code.
//!
//! ## Workbook Convention
//!
//! - One workbook per category, named per [`spreadsheet_file`]
//! - First worksheet is the data source
//! - First row is the header row; it defines the field names of every record
//! - Empty cells are omitted from the record (a row can be sparse)
//!
//! ## Failure Policy
//!
//! [`load_product_data`] never fails. An unknown category key, a missing
//! workbook, or a malformed workbook all collapse to an empty table plus a
//! `tracing` diagnostic. A product page with an empty list is preferable to a
//! build or request that dies because a spreadsheet was renamed.

use calamine::{Data, Reader, open_workbook_auto};
use std::path::{Path, PathBuf};
use tracing::warn;

/// A product category as shown on the products index and in routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductCategory {
    /// Slug used in routes and the workbook mapping (e.g. `ir-pellets`).
    pub key: &'static str,
    /// Display title.
    pub title: &'static str,
    /// One-line description shown on the products index.
    pub description: &'static str,
    /// Site-relative route to the category page.
    pub route: &'static str,
}

/// All product categories, in display order.
pub fn categories() -> &'static [ProductCategory] {
    &[
        ProductCategory {
            key: "ir-pellets",
            title: "IR Pellets",
            description: "Immediate Release",
            route: "/products/ir-pellets",
        },
        ProductCategory {
            key: "sr-cr-pr-pellets",
            title: "SR/CR/PR Pellets",
            description: "Sustained/Controlled/Prolonged Release",
            route: "/products/sr-cr-pr-pellets",
        },
        ProductCategory {
            key: "dr-ec-pellets",
            title: "EC/DR Pellets",
            description: "Enteric-Coated/Delayed Release",
            route: "/products/dr-ec-pellets",
        },
        ProductCategory {
            key: "granules",
            title: "Granules",
            description: "High-quality pharmaceutical granules",
            route: "/products/granules",
        },
        ProductCategory {
            key: "combinations",
            title: "Combinations",
            description: "Custom multi-layered pellet and granule formulations, \
                          blends and therapeutic combinations",
            route: "/products/combinations",
        },
        ProductCategory {
            key: "inert-core-pellets",
            title: "Inert Core Pellets",
            description: "High-quality Inert Core Pellets",
            route: "/products/inert-core-pellets",
        },
    ]
}

/// Look up a category by its slug.
pub fn find_category(key: &str) -> Option<&'static ProductCategory> {
    categories().iter().find(|c| c.key == key)
}

/// Workbook filename backing a category key.
///
/// Every key in [`categories`] must have an entry here; the reverse is not
/// required (a mapping may exist before its category page does).
pub fn spreadsheet_file(key: &str) -> Option<&'static str> {
    Some(match key {
        "ir-pellets" => "IR Pellets.xlsx",
        "sr-cr-pr-pellets" => "SR,CR,PR Pellets.xlsx",
        "dr-ec-pellets" => "EC,DR Pellets.xlsx",
        "granules" => "Granules.xlsx",
        "combinations" => "Combinations.xlsx",
        "inert-core-pellets" => "Inert Core Pellets.xlsx",
        _ => return None,
    })
}

/// Full path of the workbook backing a category, if the key is known.
pub fn spreadsheet_path(data_dir: &Path, key: &str) -> Option<PathBuf> {
    spreadsheet_file(key).map(|name| data_dir.join(name))
}

/// One product row: field name → cell text, in worksheet column order.
///
/// There is no fixed schema — the header row of the source workbook decides
/// the field names (commonly `PRODUCT` and `STRENGTH/CONCENTRATION`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRecord {
    fields: Vec<(String, String)>,
}

impl ProductRecord {
    /// Build a record from `(field name, cell text)` pairs in column order.
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Cell text for a field name, if the row has that cell.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate fields in column order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Product rows plus the header row that named their fields.
///
/// Headers are kept separately so a page can render consistent table columns
/// even when individual rows are sparse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductTable {
    pub headers: Vec<String>,
    pub rows: Vec<ProductRecord>,
}

impl ProductTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Load the product rows for a category from its backing workbook.
///
/// Reads the first worksheet, treating the first row as headers. All failure
/// modes (unknown key, missing file, unreadable workbook) degrade to an empty
/// table with a logged warning — callers always get something renderable.
pub fn load_product_data(data_dir: &Path, category: &str) -> ProductTable {
    let Some(path) = spreadsheet_path(data_dir, category) else {
        warn!(category, "unknown product category");
        return ProductTable::default();
    };

    if !path.exists() {
        warn!(category, path = %path.display(), "product workbook not found");
        return ProductTable::default();
    }

    let mut workbook = match open_workbook_auto(&path) {
        Ok(wb) => wb,
        Err(err) => {
            warn!(category, path = %path.display(), %err, "failed to open workbook");
            return ProductTable::default();
        }
    };

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(err)) => {
            warn!(category, path = %path.display(), %err, "failed to read first worksheet");
            return ProductTable::default();
        }
        None => {
            warn!(category, path = %path.display(), "workbook has no worksheets");
            return ProductTable::default();
        }
    };

    let mut rows = range.rows();
    let mut headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();
    // Trailing blank header columns carry no data
    while headers.last().is_some_and(|h| h.is_empty()) {
        headers.pop();
    }

    let records = rows
        .map(|row| {
            let fields = headers
                .iter()
                .zip(row.iter())
                .filter(|(header, cell)| !header.is_empty() && !matches!(cell, Data::Empty))
                .map(|(header, cell)| (header.clone(), cell_text(cell)))
                .collect();
            ProductRecord { fields }
        })
        .filter(|record| !record.is_empty())
        .collect();

    ProductTable {
        headers,
        rows: records,
    }
}

/// Cell value as display text.
///
/// Excel stores integers as floats, so `20` comes back as `20.0`; print whole
/// floats without the fraction to match what the sheet shows.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
