//! Bulk ingredient import from a JSON catalogue.
//!
//! The file holds an array of `{"name": ..., "measurement_unit": ...}`
//! objects. Ingredients already in the catalogue are skipped.

use std::{error::Error, path::Path};

use engine::{Engine, EngineError};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct IngredientRecord {
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub skipped: usize,
}

pub fn parse(raw: &str) -> Result<Vec<IngredientRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}

pub async fn import_file(
    engine: &Engine,
    path: &Path,
) -> Result<ImportReport, Box<dyn Error + Send + Sync>> {
    let raw = std::fs::read_to_string(path)?;
    let records = parse(&raw)?;

    let mut report = ImportReport::default();
    for record in records {
        match engine
            .create_ingredient(&record.name, &record.measurement_unit)
            .await
        {
            Ok(_) => report.created += 1,
            Err(EngineError::ExistingKey(_)) => report.skipped += 1,
            Err(err) => {
                return Err(
                    format!("{} ({}): {err}", record.name, record.measurement_unit).into(),
                );
            }
        }
    }

    Ok(report)
}
