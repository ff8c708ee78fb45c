//! Reads a PIT-style `mutations.xml` report.
//!
//! ```xml
//! <mutations>
//!   <mutation detected='false' status='SURVIVED' numberOfTestsRun='3'>
//!     <sourceFile>Service.java</sourceFile>
//!     <mutatedClass>com.example.Service</mutatedClass>
//!     <mutatedMethod>accept</mutatedMethod>
//!     <lineNumber>24</lineNumber>
//!     <description>negated conditional</description>
//!     ...
//!   </mutation>
//! </mutations>
//! ```
//!
//! Only the fields the score and the findings need are kept; everything
//! else (`mutator`, `killingTest`, `indexes`, `blocks`, ...) is skipped.

use roxmltree::{Document, Node};
use std::path::Path;

use crate::error::{Error, Result};
use crate::mutants::{MutantStatus, MutationRecord};

const ROOT_TAG: &str = "mutations";
const MUTATION_TAG: &str = "mutation";

/// Read and parse the report at `path`. The file is fully read and closed
/// before parsing starts; content that is not UTF-8 is a malformed report.
pub fn read_report(path: &Path) -> Result<Vec<MutationRecord>> {
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| malformed(path, e.to_string()))?;
    let records = parse_report(&text, path)?;
    tracing::debug!(path = %path.display(), records = records.len(), "parsed mutation report");
    Ok(records)
}

/// Parse report text. `path` is only used to label errors.
///
/// A root with no `<mutation>` children is a valid, empty report. Whether the
/// root holds one entry or many, the result is the same flat list in
/// document order.
pub fn parse_report(text: &str, path: &Path) -> Result<Vec<MutationRecord>> {
    let doc = Document::parse(text).map_err(|e| malformed(path, e.to_string()))?;
    let root = doc.root_element();
    if !root.has_tag_name(ROOT_TAG) {
        return Err(malformed(
            path,
            format!(
                "expected <{}> root element, found <{}>",
                ROOT_TAG,
                root.tag_name().name()
            ),
        ));
    }

    root.children()
        .filter(|n| n.has_tag_name(MUTATION_TAG))
        .map(|n| parse_mutation(n, path))
        .collect()
}

fn parse_mutation(node: Node, path: &Path) -> Result<MutationRecord> {
    let position = doc_position(node);

    let status = node
        .attribute("status")
        .map(|s| MutantStatus::parse(s.trim()))
        .ok_or_else(|| malformed(path, format!("mutation at {} has no status", position)))?;

    let detected = match node.attribute("detected") {
        Some(raw) => parse_bool(raw).ok_or_else(|| {
            malformed(
                path,
                format!("mutation at {}: detected={:?} is not a boolean", position, raw),
            )
        })?,
        None => status == MutantStatus::Killed,
    };

    let line_number = match child_text(node, "lineNumber") {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            malformed(
                path,
                format!("mutation at {}: lineNumber {:?} is not a number", position, raw),
            )
        })?,
        None => {
            return Err(malformed(
                path,
                format!("mutation at {} has no lineNumber", position),
            ));
        }
    };

    Ok(MutationRecord {
        source_file: child_string(node, "sourceFile"),
        mutated_class: child_string(node, "mutatedClass"),
        mutated_method: child_string(node, "mutatedMethod"),
        line_number,
        status,
        detected,
        description: child_string(node, "description"),
    })
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|c| c.has_tag_name(name))
        .and_then(|c| c.text())
        .map(str::trim)
}

fn child_string(node: Node, name: &str) -> String {
    child_text(node, name).unwrap_or_default().to_string()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn doc_position(node: Node) -> String {
    let pos = node.document().text_pos_at(node.range().start);
    format!("{}:{}", pos.row, pos.col)
}

fn malformed(path: &Path, reason: String) -> Error {
    Error::MalformedReport {
        path: path.to_path_buf(),
        reason,
    }
}
