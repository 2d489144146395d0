//! Document listing types, the upload allow-list, and display helpers.

use serde::{Deserialize, Serialize};

/// Extensions accepted by the knowledge base, lowercase, without dot.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "xlsx"];

/// One document in the knowledge base (`GET /api/documentos`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub nome: String,
    #[serde(default)]
    pub tipo: String,
    pub tamanho: u64,
    #[serde(default)]
    pub pasta: String,
}

/// Envelope for `GET /api/documentos`.
#[derive(Debug, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documentos: Vec<DocumentInfo>,
    #[serde(default)]
    pub total: usize,
}

/// Lowercased extension of a filename, if any.
fn extension(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

/// Whether a filename passes the upload allow-list (case-insensitive).
pub fn is_allowed(name: &str) -> bool {
    extension(name)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Icon glyph for a filename, by extension.
pub fn icon(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("pdf") => "\u{1f4c4}",
        Some("docx") | Some("doc") => "\u{1f4dd}",
        Some("xlsx") | Some("xls") => "\u{1f4ca}",
        _ => "\u{1f4c4}",
    }
}

/// Human display name for a document: allow-listed suffix stripped
/// (case-insensitive) and underscores replaced with spaces.
pub fn display_name(name: &str) -> String {
    let stem = match name.rsplit_once('.') {
        Some((stem, ext)) if ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) => stem,
        _ => name,
    };
    stem.replace('_', " ")
}

/// Format a byte count as "N.N KB" for file listings.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
