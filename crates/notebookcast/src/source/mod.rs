//! Where podcast source text comes from: uploaded PDFs and web pages.

pub mod pdf;
pub mod reader;

pub use pdf::{extract_pdf_text, is_pdf};
pub use reader::{JinaReader, ReaderError, WebReader};
