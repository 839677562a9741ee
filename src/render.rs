//! Renderers: wrap reconciled lines back into comment syntax, or report
//! them as JSON for tooling.

use crate::manifest::Outcome;
use anyhow::{anyhow, Result};

/// Wrap lines in a `/** ... */` block, each line prefixed by `indent`.
/// Empty input renders as an empty string.
pub fn to_block(lines: &[String], indent: &str) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = format!("{}/**\n", indent);
    for line in lines {
        if line.is_empty() {
            out.push_str(&format!("{} *\n", indent));
        } else {
            // A literal `*/` would end the comment early
            out.push_str(&format!("{} * {}\n", indent, line.replace("*/", "*\\/")));
        }
    }
    out.push_str(&format!("{} */", indent));
    out
}

/// Trait for rendering a batch of outcomes into one output format.
pub trait Renderer {
    fn render(&self, outcomes: &[Outcome]) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "block" | "js" => Ok(Box::new(BlockRenderer)),
        "json" => Ok(Box::new(JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use block or json", format)),
    }
}

/// Comment blocks, each introduced by a `// file: name` header.
pub struct BlockRenderer;

impl Renderer for BlockRenderer {
    fn render(&self, outcomes: &[Outcome]) -> String {
        let mut out = String::new();
        for outcome in outcomes {
            match &outcome.file {
                Some(file) => out.push_str(&format!("// {}: {}\n", file, outcome.name)),
                None => out.push_str(&format!("// {}\n", outcome.name)),
            }
            if outcome.block.is_empty() {
                out.push_str("// (no documentation)\n");
            } else {
                out.push_str(&outcome.block);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    fn file_extension(&self) -> &str {
        "js"
    }
}

/// Pretty-printed JSON array of outcomes.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, outcomes: &[Outcome]) -> String {
        let mut out =
            serde_json::to_string_pretty(outcomes).unwrap_or_else(|e| error_document(&e));
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn error_document(e: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}
