//! Manifest loading: declarations, their existing comments and inferred
//! metadata, as handed over by the analysis/generation stage.
//!
//! A manifest is either a JSON array of declarations or an object with a
//! `declarations` array:
//!
//! ```json
//! [{
//!   "file": "src/user.js",
//!   "comment": "/** Loads a user. */",
//!   "metadata": { "kind": "function", "name": "loadUser", "params": [] }
//! }]
//! ```

use crate::extract::{self, RawComment};
use crate::model::InferredMetadata;
use crate::render;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub type ManifestResult<T> = Result<T, ManifestError>;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("manifest must be an array or an object with a `declarations` array")]
    UnexpectedShape,

    #[error("declaration #{index} has no name")]
    UnnamedDeclaration { index: usize },
}

/// One declaration to document.
#[derive(Debug, Clone, Deserialize)]
pub struct Declaration {
    /// Source file, for reporting only.
    #[serde(default)]
    pub file: Option<String>,
    /// Leading comment as source text, delimiters included.
    #[serde(default)]
    pub comment: Option<String>,
    /// Leading comments as reported by AST tooling.
    #[serde(default)]
    pub comments: Vec<RawComment>,
    pub metadata: InferredMetadata,
    /// Indentation of the declaration, reused for the rendered block.
    #[serde(default)]
    pub indent: Option<String>,
}

impl Declaration {
    /// All candidate comments, structured ones first.
    pub fn raw_comments(&self) -> Vec<RawComment> {
        let mut comments = self.comments.clone();
        if let Some(source) = self.comment.as_deref() {
            match RawComment::from_source(source) {
                Some(comment) => comments.push(comment),
                None => tracing::warn!(
                    declaration = %self.metadata.name(),
                    "`comment` is not a comment; treating documentation as absent"
                ),
            }
        }
        comments
    }

    /// Run the declaration through the pipeline.
    pub fn resolve(&self, default_indent: &str) -> Outcome {
        let comments = self.raw_comments();
        let existing = extract::extract(&comments);
        let lines = crate::document(&comments, &self.metadata);
        let indent = self.indent.as_deref().unwrap_or(default_indent);
        Outcome {
            name: self.metadata.name().to_string(),
            file: self.file.clone(),
            block: render::to_block(&lines, indent),
            existing,
            lines,
        }
    }
}

/// Result of documenting one declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Normalized lines of the existing doc block, if there was one.
    pub existing: Option<Vec<String>>,
    pub lines: Vec<String>,
    /// `lines` wrapped in comment syntax.
    pub block: String,
}

impl Outcome {
    /// Whether writing `block` back would modify the source.
    pub fn changed(&self) -> bool {
        match &self.existing {
            Some(existing) => *existing != self.lines,
            None => !self.lines.is_empty(),
        }
    }
}

/// Parse a manifest.
pub fn load(json: &str) -> ManifestResult<Vec<Declaration>> {
    let value: Value = serde_json::from_str(json)?;
    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove("declarations") {
            Some(list @ Value::Array(_)) => list,
            _ => return Err(ManifestError::UnexpectedShape),
        },
        _ => return Err(ManifestError::UnexpectedShape),
    };

    let declarations: Vec<Declaration> = serde_json::from_value(list)?;
    if let Some(index) = declarations
        .iter()
        .position(|d| d.metadata.name().trim().is_empty())
    {
        return Err(ManifestError::UnnamedDeclaration { index });
    }
    Ok(declarations)
}
