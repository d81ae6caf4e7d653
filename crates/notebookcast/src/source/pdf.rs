use crate::error::{PipelineError, Result};
use std::path::Path;

/// Extension check only, case-insensitive.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Text of every page, pages separated by a blank line.
pub async fn extract_pdf_text(path: &Path) -> Result<String> {
    let display = path.display().to_string();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PipelineError::PdfRead(format!("{display}: {e}")))?;

    let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&bytes))
        .await
        .map_err(|e| PipelineError::PdfRead(format!("{display}: {e}")))?
        .map_err(|e| PipelineError::PdfRead(format!("{display}: {e}")))?;

    log::debug!("Extracted {} page(s) from {display}", pages.len());
    Ok(pages.join("\n\n"))
}
