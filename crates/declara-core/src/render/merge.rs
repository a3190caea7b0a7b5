//! Stamping an overlay onto the first page of the template.
//!
//! The overlay's content stream is appended after the template's own
//! content, which is wrapped in `q ... Q` so none of its graphics state
//! reaches the overlay. Every page but the first is removed.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::canvas::{Canvas, Font};
use crate::error::DeclaraError;

/// A4 in points.
pub const A4: [f32; 2] = [595.2756, 841.8898];

/// Maximum depth followed when walking up the page tree for inherited keys.
const MAX_TREE_DEPTH: usize = 16;

/// Merge `canvas` onto page 1 of the PDF in `template` and return the
/// single-page result.
pub fn stamp_first_page(template: &[u8], canvas: &Canvas) -> Result<Vec<u8>, DeclaraError> {
    let mut doc = Document::load_mem(template)
        .map_err(|e| DeclaraError::TemplateMerge(format!("failed to parse template: {e}")))?;

    let pages = doc.get_pages();
    let Some((&first_number, &page_id)) = pages.iter().next() else {
        return Err(DeclaraError::EmptyDocument);
    };

    if let Some(size) = page_size(&doc, page_id) {
        if (size[0] - A4[0]).abs() > 1.0 || (size[1] - A4[1]).abs() > 1.0 {
            tracing::warn!(
                width = size[0],
                height = size[1],
                "template page is not A4; overlay coordinates may be off"
            );
        }
    }

    let extra: Vec<u32> = pages.keys().copied().filter(|&n| n != first_number).collect();
    if !extra.is_empty() {
        doc.delete_pages(&extra);
    }

    add_fonts(&mut doc, page_id)?;
    append_overlay(&mut doc, page_id, canvas)?;
    doc.prune_objects();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| DeclaraError::TemplateMerge(format!("failed to save PDF: {e}")))?;

    Ok(output)
}

/// Register the overlay fonts in the page's resources.
///
/// Inherited resources are copied onto the page so the additions do not
/// leak to other pages sharing the same dictionary.
fn add_fonts(doc: &mut Document, page_id: ObjectId) -> Result<(), DeclaraError> {
    let mut resources = inherited_dictionary(doc, page_id, b"Resources").unwrap_or_default();
    let mut fonts = resources
        .get(b"Font")
        .ok()
        .and_then(|f| resolve_dictionary(doc, f))
        .cloned()
        .unwrap_or_default();

    for font in Font::ALL {
        let font_id = doc.add_object(font.dictionary());
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }
    resources.set("Font", Object::Dictionary(fonts));

    page_dictionary_mut(doc, page_id)?.set("Resources", Object::Dictionary(resources));
    Ok(())
}

/// Append the overlay content stream after the page's existing content.
fn append_overlay(doc: &mut Document, page_id: ObjectId, canvas: &Canvas) -> Result<(), DeclaraError> {
    let overlay = canvas
        .to_content()
        .encode()
        .map_err(|e| DeclaraError::TemplateMerge(format!("failed to encode overlay: {e}")))?;

    let current = doc
        .get_dictionary(page_id)
        .map_err(|e| DeclaraError::TemplateMerge(format!("failed to get page: {e}")))?
        .get(b"Contents")
        .ok()
        .cloned();
    let existing: Vec<Object> = match current {
        Some(Object::Reference(id)) => match doc.get_object(id) {
            Ok(Object::Array(parts)) => parts.clone(),
            _ => vec![Object::Reference(id)],
        },
        Some(Object::Array(parts)) => parts,
        _ => Vec::new(),
    };

    let open_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
    let mut closing = b"Q\n".to_vec();
    closing.extend_from_slice(&overlay);
    let overlay_id = doc.add_object(Stream::new(Dictionary::new(), closing));

    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(open_id));
    contents.extend(existing);
    contents.push(Object::Reference(overlay_id));

    page_dictionary_mut(doc, page_id)?.set("Contents", Object::Array(contents));
    Ok(())
}

fn page_dictionary_mut(doc: &mut Document, page_id: ObjectId) -> Result<&mut Dictionary, DeclaraError> {
    doc.get_dictionary_mut(page_id)
        .map_err(|e| DeclaraError::TemplateMerge(format!("failed to get page: {e}")))
}

fn resolve_dictionary<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    match object {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        _ => None,
    }
}

/// Look up `key` on the page or, failing that, its ancestors.
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn inherited_dictionary(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Dictionary> {
    inherited(doc, page_id, key)
        .and_then(|value| resolve_dictionary(doc, value))
        .cloned()
}

/// Width and height of the page's MediaBox.
fn page_size(doc: &Document, page_id: ObjectId) -> Option<[f32; 2]> {
    let media_box = match inherited(doc, page_id, b"MediaBox")? {
        Object::Array(values) => values,
        Object::Reference(id) => match doc.get_object(*id).ok()? {
            Object::Array(values) => values,
            _ => return None,
        },
        _ => return None,
    };

    let values: Vec<f32> = media_box
        .iter()
        .filter_map(|o| match o {
            Object::Integer(i) => Some(*i as f32),
            Object::Real(r) => Some(*r),
            _ => None,
        })
        .collect();

    match values.as_slice() {
        [x0, y0, x1, y1] => Some([(x1 - x0).abs(), (y1 - y0).abs()]),
        _ => None,
    }
}
