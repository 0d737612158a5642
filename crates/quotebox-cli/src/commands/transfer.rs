//! Export and import command handlers

use std::path::PathBuf;

use anyhow::Result;

use quotebox_core::transfer::IMPORTED_MESSAGE;
use quotebox_core::{Config, Widget};

use super::user_error;
use crate::output::Output;

/// Write the collection to `quotes.json`
pub fn export(
    widget: &Widget,
    config: &Config,
    dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.export_dir.clone());
    let artifact = widget.export_to_file(&dir).map_err(user_error)?;
    output.print_export(&artifact);
    Ok(())
}

/// Append the quotes from a JSON file
pub async fn import(widget: &mut Widget, file: Option<PathBuf>, output: &Output) -> Result<()> {
    let summary = widget.import_from_file(file).await.map_err(user_error)?;
    output.print_import(&summary, IMPORTED_MESSAGE);
    Ok(())
}
