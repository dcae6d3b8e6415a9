//! Starter workbook generation.
//!
//! Writes one sample workbook per category into the data directory so a fresh
//! checkout can build and serve real-looking pages immediately. The files use
//! the exact names [`crate::catalog::spreadsheet_file`] expects; the sales
//! team then edits them in place.
//!
//! Existing workbooks are overwritten — this is a scaffolding command, not a
//! data migration.

use crate::catalog;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataGenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Sample rows per category key: header row first.
fn sample_rows(key: &str) -> &'static [&'static [&'static str]] {
    match key {
        "ir-pellets" => &[
            &["PRODUCT", "STRENGTH/CONCENTRATION"],
            &["Omeprazole IR Pellets", "20mg"],
            &["Esomeprazole IR Pellets", "40mg"],
            &["Pantoprazole IR Pellets", "20mg"],
        ],
        "sr-cr-pr-pellets" => &[
            &["PRODUCT", "STRENGTH/CONCENTRATION"],
            &["Tramadol SR Pellets", "100mg"],
            &["Metformin CR Pellets", "500mg"],
            &["Venlafaxine XR Pellets", "75mg"],
        ],
        "dr-ec-pellets" => &[
            &["PRODUCT", "STRENGTH/CONCENTRATION"],
            &["Omeprazole EC Pellets", "20mg"],
            &["Pantoprazole DR Pellets", "40mg"],
            &["Esomeprazole DR Pellets", "20mg"],
        ],
        "granules" => &[
            &["PRODUCT", "STRENGTH/CONCENTRATION"],
            &["Paracetamol Granules", "500mg"],
            &["Ibuprofen Granules", "200mg"],
            &["Caffeine Granules", "50mg"],
        ],
        "combinations" => &[
            &["PRODUCT", "STRENGTH/CONCENTRATION"],
            &["Omeprazole + Domperidone Pellets", "20mg/30mg"],
            &["Amoxicillin + Clavulanate Granules", "400mg/57mg"],
        ],
        "inert-core-pellets" => &[
            &["PRODUCT"],
            &["Sugar Spheres NF (16-20 mesh)"],
            &["Sugar Spheres NF (18-25 mesh)"],
            &["Microcrystalline Cellulose Spheres (20-35 mesh)"],
            &["Tartaric Acid Pellets (14-18 mesh)"],
        ],
        _ => &[],
    }
}

/// Write a starter workbook for every category. Returns the written paths.
pub fn write_sample_workbooks(data_dir: &Path) -> Result<Vec<PathBuf>, DataGenError> {
    std::fs::create_dir_all(data_dir)?;

    let mut written = Vec::new();
    for category in catalog::categories() {
        let Some(path) = catalog::spreadsheet_path(data_dir, category.key) else {
            continue;
        };
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet().set_name("Products")?;
        for (r, row) in sample_rows(category.key).iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *cell)?;
            }
        }
        workbook.save(&path)?;
        written.push(path);
    }
    Ok(written)
}
