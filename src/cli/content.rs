// Bulk import from the command line

use std::fs;
use std::path::Path;

use crate::app_data::AppData;
use crate::providers::bulk_import::{self, ImportReport};
use crate::errors::InternalError;

/// Validate and store one import file
pub async fn import_file(app_data: &AppData, path: &Path) -> Result<ImportReport, Box<dyn std::error::Error>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    bulk_import::check_file_name(&file_name).map_err(InternalError::from)?;

    let text = fs::read_to_string(path)?;
    let report = bulk_import::import_batch(&text, app_data.clock.now());
    app_data
        .content_provider
        .store_imported(report.accepted.clone())
        .await?;

    Ok(report)
}

/// `import` command
pub async fn import(app_data: &AppData, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let report = import_file(app_data, path).await?;

    println!("✓ Imported {} article(s)", report.accepted.len());
    if !report.errors.is_empty() {
        println!("❌ {} problem(s):", report.errors.len());
        for error in &report.errors {
            println!("   {}", error);
        }
    }

    Ok(())
}

/// `template` command; writes the example file to `output` or stdout
pub fn template(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(path, bulk_import::TEMPLATE)?;
            println!("✓ Template written to {}", path.display());
        }
        None => println!("{}", bulk_import::TEMPLATE),
    }
    Ok(())
}
