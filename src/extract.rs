//! Comment extraction: pick the documentation block attached to a
//! declaration and normalize it into lines.

use serde::{Deserialize, Serialize};

/// Character that follows the block-comment opener in a doc block, and
/// that starts each interior line by convention.
const DOC_MARKER: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    Block,
    Line,
}

/// A comment as reported by AST tooling: the body without its
/// `/*`/`*/` or `//` delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComment {
    pub kind: CommentKind,
    pub text: String,
}

impl RawComment {
    pub fn block(text: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Block,
            text: text.into(),
        }
    }

    pub fn line(text: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Line,
            text: text.into(),
        }
    }

    /// Build a comment from its source text, delimiters included.
    ///
    /// `/** body */` becomes a block comment with text `* body `, and
    /// `// body` a line comment. Anything else is not a comment.
    pub fn from_source(source: &str) -> Option<Self> {
        let source = source.trim();
        if let Some(rest) = source.strip_prefix("/*") {
            let body = rest.strip_suffix("*/")?;
            return Some(Self::block(body));
        }
        source.strip_prefix("//").map(Self::line)
    }

    fn is_doc_block(&self) -> bool {
        self.kind == CommentKind::Block && self.text.starts_with(DOC_MARKER)
    }
}

/// Normalize the first documentation block among `comments`.
///
/// Returns `None` when no candidate is a doc block, or when the block is
/// empty once normalized.
pub fn extract(comments: &[RawComment]) -> Option<Vec<String>> {
    let comment = comments.iter().find(|c| c.is_doc_block())?;
    let lines = normalize(&comment.text);
    if lines.iter().all(|l| l.is_empty()) {
        return None;
    }
    Some(lines)
}

fn normalize(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.lines().map(strip_continuation).collect();

    // `/**` followed by a newline leaves a blank first line
    if lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    // Whatever preceded `*/` on its own line
    if lines.last().is_some_and(|l| is_closing_remnant(l)) {
        lines.pop();
    }
    lines
}

/// Trim, then drop one leading `*` and one space after it.
fn strip_continuation(line: &str) -> String {
    let line = line.trim();
    let line = line.strip_prefix(DOC_MARKER).unwrap_or(line);
    let line = line.strip_prefix(' ').unwrap_or(line);
    line.trim_end().to_string()
}

fn is_closing_remnant(line: &str) -> bool {
    line.is_empty() || line == "/"
}
