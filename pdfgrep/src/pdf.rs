//! The two collaborators the match engine leans on: a content sniffer that decides
//! whether a file is a PDF at all, and a text extractor that turns PDF bytes into
//! per-page text. Both are traits so the engine can be driven by fakes in tests.

use lopdf::Document;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, trace};

use crate::results::PageText;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_EMPTY: &str = "inode/x-empty";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_BINARY: &str = "application/octet-stream";

/// How many leading bytes the sniffer inspects
const SNIFF_LEN: usize = 1024;

/// Classifies a file by content, not by name
pub trait ContentSniffer {
    fn classify(&self, path: &Path) -> io::Result<&'static str>;
}

/// Looks at the leading bytes of a file for the `%PDF-` signature
#[derive(Debug, Clone, Copy, Default)]
pub struct MagicSniffer;

impl MagicSniffer {
    /// Classifies an already-read file head
    pub fn classify_bytes(head: &[u8]) -> &'static str {
        if head.is_empty() {
            MIME_EMPTY
        } else if head.starts_with(b"%PDF-") {
            MIME_PDF
        } else if std::str::from_utf8(head).is_ok() {
            MIME_TEXT
        } else {
            MIME_BINARY
        }
    }
}

impl ContentSniffer for MagicSniffer {
    fn classify(&self, path: &Path) -> io::Result<&'static str> {
        let mut head = Vec::with_capacity(SNIFF_LEN);
        File::open(path)?
            .take(SNIFF_LEN as u64)
            .read_to_end(&mut head)?;
        let mime = Self::classify_bytes(&head);
        trace!("Sniffed {} as {}", path.display(), mime);
        Ok(mime)
    }
}

/// The extractor could not make sense of the document
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ExtractError(pub String);

/// Turns a whole PDF into page texts, in document order.
///
/// Extraction is all-or-nothing: a document that fails anywhere yields an error and
/// no pages.
pub trait TextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, ExtractError>;
}

/// Text extraction backed by `lopdf`
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, ExtractError> {
        let doc = Document::load_mem(bytes).map_err(|e| ExtractError(e.to_string()))?;
        let pages = doc.get_pages();
        debug!("Extracting text from {} pages", pages.len());

        // Page numbers from lopdf are 1-based and come back in document order
        let mut texts = Vec::with_capacity(pages.len());
        for (index, page_number) in pages.keys().enumerate() {
            let text = doc
                .extract_text(&[*page_number])
                .map_err(|e| ExtractError(format!("page {}: {}", page_number, e)))?;
            texts.push(PageText::new(index + 1, text));
        }
        Ok(texts)
    }
}
