//! FB2 (FictionBook 2.x) metadata and text extraction.
//!
//! Both entry points are total: any parse trouble degrades to a record
//! carrying only the filename-derived title. Errors never cross this
//! boundary.

pub mod xml;

use crate::library::book::BookRecord;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use roxmltree::{Document, Node};
use std::path::Path;

use self::xml::{children_named, first_child, local_name, text_content};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Fast path: extract only the display title of a book.
///
/// Parses the document but stops at the `title-info/book-title` lookup, so
/// large libraries can populate their trees without paying for full-text
/// extraction. Falls back to the filename stem on any failure.
pub fn extract_title(path: &Path) -> String {
    let Ok(content) = std::fs::read_to_string(path) else {
        return BookRecord::file_stem(path);
    };
    let Ok(doc) = Document::parse(&content) else {
        return BookRecord::file_stem(path);
    };

    first_child(doc.root_element(), "description")
        .and_then(|d| first_child(d, "title-info"))
        .and_then(|t| first_child(t, "book-title"))
        .map(|bt| text_content(bt).trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| BookRecord::file_stem(path))
}

/// Extract the complete metadata record for a book.
///
/// Always produces a usable [`BookRecord`]; on unparsable input only the
/// filename-derived title is populated and every other field stays absent.
pub fn extract_full(path: &Path) -> BookRecord {
    let mut record = BookRecord::new(path);

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Failed to read book file");
            return record;
        }
    };
    let doc = match Document::parse(&content) {
        Ok(d) => d,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Failed to parse FB2 document");
            return record;
        }
    };

    let root = doc.root_element();
    let description = first_child(root, "description");
    let title_info = description.and_then(|d| first_child(d, "title-info"));
    let publish_info = description.and_then(|d| first_child(d, "publish-info"));

    if let Some(title_info) = title_info {
        if let Some(book_title) = first_child(title_info, "book-title") {
            let text = text_content(book_title).trim().to_string();
            if !text.is_empty() {
                record.title = text;
            }
        }

        for author in children_named(title_info, "author") {
            let name = author_name(author);
            if !name.is_empty() {
                record.authors.push(name);
            }
        }

        for genre in children_named(title_info, "genre") {
            let text = text_content(genre).trim().to_string();
            if !text.is_empty() {
                record.genres.push(text);
            }
        }

        if let Some(lang) = first_child(title_info, "lang") {
            record.language = non_empty(text_content(lang));
        }

        if let Some(annotation) = first_child(title_info, "annotation") {
            let paragraphs = collect_paragraphs(annotation);
            if !paragraphs.is_empty() {
                record.description = Some(paragraphs.join("\n\n"));
            }
        }
    }

    if let Some(publish_info) = publish_info {
        if let Some(publisher) = first_child(publish_info, "publisher") {
            record.publisher = non_empty(text_content(publisher));
        }
        if let Some(year) = first_child(publish_info, "year") {
            record.date = non_empty(text_content(year));
        }
    }

    // Some books only carry a date in title-info.
    if record.date.is_none()
        && let Some(title_info) = title_info
        && let Some(date) = first_child(title_info, "date")
    {
        record.date = non_empty(text_content(date));
    }

    if let Some(title_info) = title_info
        && let Some(id) = cover_reference(title_info)
    {
        record.cover = resolve_cover(root, &id);
    }

    let mut paragraphs = Vec::new();
    for body in children_named(root, "body") {
        paragraphs.extend(collect_paragraphs(body));
    }
    if !paragraphs.is_empty() {
        record.full_text = Some(paragraphs.join("\n\n"));
    }

    record
}

/// Assemble a display name from first/middle/last name parts, space-joined,
/// skipping absent or blank parts.
fn author_name(author: Node) -> String {
    ["first-name", "middle-name", "last-name"]
        .into_iter()
        .filter_map(|part| first_child(author, part))
        .map(|n| text_content(n).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed text of every descendant `p` element, document order, blanks
/// dropped.
fn collect_paragraphs(node: Node) -> Vec<String> {
    node.descendants()
        .filter(|n| n.is_element() && local_name(n.tag_name().name()) == "p")
        .map(|p| text_content(p).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Cover cross-reference id from `coverpage/image`, accepting either a bare
/// or an XLink-namespaced `href` attribute, with any leading `#` stripped.
fn cover_reference(title_info: Node) -> Option<String> {
    let image = first_child(title_info, "coverpage").and_then(|c| first_child(c, "image"))?;
    let href = image
        .attribute("href")
        .or_else(|| image.attribute((XLINK_NS, "href")))
        .or_else(|| {
            image
                .attributes()
                .find(|a| local_name(a.name()) == "href")
                .map(|a| a.value())
        })?;
    non_empty(href.trim_start_matches('#').to_string())
}

/// Find the first `binary` element anywhere in the document whose `id`
/// matches and decode its base64 payload. Any failure yields no cover.
fn resolve_cover(root: Node, cover_id: &str) -> Option<Vec<u8>> {
    let binary = root.descendants().find(|n| {
        n.is_element()
            && local_name(n.tag_name().name()) == "binary"
            && n.attribute("id") == Some(cover_id)
    })?;

    // Payloads in the wild are line-wrapped base64.
    let payload: String = text_content(binary)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if payload.is_empty() {
        return None;
    }

    match STANDARD.decode(payload) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::debug!(id = cover_id, error = %e, "Failed to decode cover image");
            None
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
