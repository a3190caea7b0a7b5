use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DeclaraError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("PDF has no pages")]
    EmptyDocument,

    #[error("failed to load template from {path}: {reason}")]
    TemplateLoad { path: PathBuf, reason: String },

    #[error("declaration template not found or unusable: {0}")]
    TemplateMissing(PathBuf),

    #[error("could not read file: {path}: {reason}")]
    InputRead { path: PathBuf, reason: String },

    #[error("failed to merge overlay onto template: {0}")]
    TemplateMerge(String),

    #[error("failed to load layout overrides from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
