// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open scanned PDFs, read their embedded text layer, and merge
// several scans into a single document using the `lopdf` crate.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use scandex_core::error::{Result, ScandexError};
use tracing::{debug, info, instrument, warn};

/// Page attributes a page may inherit from the `Pages` nodes above it.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Deepest page tree walked when resolving inherited attributes.
const MAX_TREE_DEPTH: usize = 64;

/// Reads existing PDF files.
///
/// Wraps `lopdf::Document`; scans that went through OCR carry their text in
/// the content streams, which is what [`PdfReader::extract_text`] returns.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let document = Document::load(path_ref).map_err(|err| {
            ScandexError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            ScandexError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;
        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Text of all pages, in page order. Empty for PDFs without a text layer.
    #[instrument(skip(self), fields(source = self.source_path.as_deref().unwrap_or("<memory>")))]
    pub fn extract_text(&self) -> Result<String> {
        let page_numbers: Vec<u32> = self.document.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Ok(String::new());
        }
        let text = self.document.extract_text(&page_numbers).map_err(|err| {
            ScandexError::PdfError(format!("failed to extract text: {}", err))
        })?;
        debug!(pages = page_numbers.len(), chars = text.len(), "Text extracted");
        Ok(text)
    }

    // -- Merging --------------------------------------------------------------

    /// Concatenate the pages of `readers`, in order, into one PDF and return
    /// its serialised bytes.
    #[instrument(skip_all, fields(documents = readers.len()))]
    pub fn merge(readers: Vec<PdfReader>) -> Result<Vec<u8>> {
        if readers.is_empty() {
            return Err(ScandexError::PdfError("nothing to merge".into()));
        }

        let mut next_id = 1;
        let mut pages: Vec<(ObjectId, Object)> = Vec::new();
        let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

        for reader in readers {
            let mut document = reader.document;
            // Give every document its own id space before pooling the objects.
            document.renumber_objects_with(next_id);
            next_id = document.max_id + 1;

            for page_id in document.get_pages().into_values() {
                let page = document.get_object(page_id).map_err(|err| {
                    ScandexError::PdfError(format!("cannot read page {:?}: {}", page_id, err))
                })?;
                let mut page = page.clone();
                // The source page tree is dropped below.
                if let Ok(dict) = page.as_dict_mut() {
                    inherit_attributes(&document, dict);
                }
                pages.push((page_id, page));
            }
            objects.extend(document.objects);
        }

        let mut merged = Document::with_version("1.5");
        merged.max_id = next_id;

        // Page trees and catalogs are rebuilt below; pages are re-added with
        // their new parent.
        for (id, object) in objects {
            let kind = object.type_name().unwrap_or(b"");
            if matches!(kind, b"Catalog" | b"Pages" | b"Page" | b"Outlines" | b"Outline") {
                continue;
            }
            merged.objects.insert(id, object);
        }

        let pages_id = merged.new_object_id();
        let mut kids = Vec::with_capacity(pages.len());
        for (page_id, mut page) in pages {
            if let Ok(dict) = page.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
            merged.objects.insert(page_id, page);
            kids.push(Object::Reference(page_id));
        }

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Count", Object::Integer(kids.len() as i64));
        pages_dict.set("Kids", Object::Array(kids));
        merged.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = merged.add_object(Object::Dictionary(catalog));
        merged.trailer.set("Root", Object::Reference(catalog_id));

        merged.renumber_objects();
        merged.compress();

        let mut output = Vec::new();
        merged.save_to(&mut output).map_err(|err| {
            ScandexError::PdfError(format!("failed to serialise merged PDF: {}", err))
        })?;

        info!(output_bytes = output.len(), "Merge complete");
        Ok(output)
    }

    /// Open every path and merge them into one PDF.
    pub fn merge_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<u8>> {
        let readers = paths
            .iter()
            .map(PdfReader::open)
            .collect::<Result<Vec<_>>>()?;
        Self::merge(readers)
    }
}

/// Copy every inheritable attribute `page` lacks from the nearest ancestor
/// in `document`'s page tree that defines it.
fn inherit_attributes(document: &Document, page: &mut Dictionary) {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;
    while let Some(node_id) = parent {
        if depth == MAX_TREE_DEPTH {
            warn!(node = ?node_id, "Page tree too deep, inherited attributes may be lost");
            return;
        }
        let Ok(node) = document.get_dictionary(node_id) else {
            return;
        };
        for key in INHERITABLE {
            if page.has(key) {
                continue;
            }
            if let Ok(value) = node.get(key) {
                page.set(key, value.clone());
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }
}
