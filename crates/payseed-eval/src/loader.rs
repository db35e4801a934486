use std::path::Path;

use payseed_core::{Dataset, EntityKind};
use payseed_generate::{GenerationReport, REPORT_FILE_NAME};

use crate::errors::EvalError;
use crate::metrics::WarningItem;

/// Tables read back from a generation output directory.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    /// Report written alongside the tables, when present and readable.
    pub generation_report: Option<GenerationReport>,
    pub warnings: Vec<WarningItem>,
}

/// Load every `<table>.json` in `dir`.
///
/// A missing table file is a warning and loads as an empty table; a file
/// that does not parse fails the load.
pub fn load_dataset(dir: &Path) -> Result<LoadedDataset, EvalError> {
    if !dir.is_dir() {
        return Err(EvalError::InvalidDataset(format!(
            "dataset directory not found: {}",
            dir.display()
        )));
    }

    let mut dataset = Dataset::default();
    let mut warnings = Vec::new();

    for kind in EntityKind::ALL {
        let table = kind.table_name();
        let path = dir.join(format!("{table}.json"));
        if !path.exists() {
            warnings.push(WarningItem {
                code: "missing_table_file".to_string(),
                path: table.to_string(),
                message: format!("{} not found", path.display()),
                hint: Some("evaluate the directory a generation run wrote to".to_string()),
            });
            continue;
        }

        let bytes = std::fs::read(&path)?;
        dataset
            .load_table_json(kind, &bytes)
            .map_err(|err| EvalError::InvalidDataset(format!("{table}.json: {err}")))?;
    }

    let generation_report = read_generation_report(dir, &mut warnings);

    Ok(LoadedDataset {
        dataset,
        generation_report,
        warnings,
    })
}

fn read_generation_report(dir: &Path, warnings: &mut Vec<WarningItem>) -> Option<GenerationReport> {
    let path = dir.join(REPORT_FILE_NAME);
    let contents = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(report) => Some(report),
        Err(err) => {
            warnings.push(WarningItem {
                code: "unreadable_generation_report".to_string(),
                path: REPORT_FILE_NAME.to_string(),
                message: err.to_string(),
                hint: None,
            });
            None
        }
    }
}
