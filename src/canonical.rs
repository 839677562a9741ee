//! Canonical tag lines and the text helpers shared by the fresh builder
//! and the reconciliation engine.

use crate::tags;
use crate::vocab::{self, ManagedTag, GENERIC_ERROR_KIND};
use regex::Regex;
use std::sync::LazyLock;

const FENCE: &str = "```";

static RE_FENCE_OPEN_LANG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```[A-Za-z0-9_+.-]*[ \t]*\n").unwrap());

static RE_FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*```").unwrap());

static RE_FENCE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```\s*$").unwrap());

/// `@tag` or `@tag text`.
fn tag_line(tag: ManagedTag, text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        format!("@{}", tag.name())
    } else {
        format!("@{} {}", tag.name(), text)
    }
}

/// `@param {type} name - description`, dash omitted when there is no
/// description.
pub fn param_line(prefix: &str, description: &str) -> String {
    let description = description.trim();
    if description.is_empty() {
        tag_line(ManagedTag::Param, prefix)
    } else {
        tag_line(ManagedTag::Param, &format!("{} - {}", prefix, description))
    }
}

pub fn returns_line(ty: &str, description: &str) -> String {
    tag_line(
        ManagedTag::Returns,
        &format!("{{{}}} {}", ty.trim(), description.trim()),
    )
}

pub fn throws_line(description: &str) -> String {
    tag_line(
        ManagedTag::Throws,
        &format!("{{{}}} {}", GENERIC_ERROR_KIND, description.trim()),
    )
}

pub fn constructor_line(description: &str) -> String {
    tag_line(ManagedTag::Constructor, description)
}

pub fn class_line() -> String {
    tag_line(ManagedTag::Class, "")
}

pub fn augments_line(parent: &str) -> String {
    tag_line(ManagedTag::Augments, parent)
}

pub fn example_line() -> String {
    tag_line(ManagedTag::Example, "")
}

/// Push multi-line text one line per element. Outer blank lines are
/// dropped and trailing whitespace is trimmed so re-parsing reproduces
/// the same text.
pub fn push_text(out: &mut Vec<String>, text: &str) {
    for line in text.trim().lines() {
        out.push(line.trim_end().to_string());
    }
}

/// Like [`push_text`], but trims each line fully, matching how the tag
/// parser reads leading description lines.
pub fn push_description(out: &mut Vec<String>, text: &str) {
    for line in text.trim().lines() {
        out.push(line.trim().to_string());
    }
}

/// Whether an example candidate carries a fenced code marker.
pub fn has_fence(text: &str) -> bool {
    text.contains(FENCE)
}

/// Strip fenced-code wrapper markers and surrounding blank lines.
pub fn normalize_example(text: &str) -> String {
    let body = if let Some(m) = RE_FENCE_OPEN_LANG.find(text) {
        &text[m.end()..]
    } else if let Some(m) = RE_FENCE_OPEN.find(text) {
        &text[m.end()..]
    } else {
        text
    };
    let body = match RE_FENCE_CLOSE.find(body) {
        Some(m) => &body[..m.start()],
        None => body,
    };
    body.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Normalized code of a generated example, or `None` when it cannot be
/// emitted: unfenced, empty, or holding a line that would read back as a
/// documentation tag.
pub fn example_code(candidate: &str) -> Option<String> {
    if !has_fence(candidate) {
        return None;
    }
    let code = normalize_example(candidate);
    if code.is_empty() {
        return None;
    }
    if code
        .lines()
        .filter_map(tags::tag_name)
        .any(vocab::is_known_tag)
    {
        tracing::debug!("dropping example whose code reads as documentation tags");
        return None;
    }
    Some(code)
}

/// Split a leading `{type}` group off tag content, honoring nested braces.
pub fn split_type(content: &str) -> (Option<&str>, &str) {
    let content = content.trim_start();
    if !content.starts_with('{') {
        return (None, content);
    }
    let mut depth = 0usize;
    for (i, c) in content.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (Some(&content[1..i]), &content[i + 1..]);
                }
            }
            _ => {}
        }
    }
    (None, content)
}

/// Description text after a leading `-`, if any.
pub fn strip_dash(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('-').map(str::trim).unwrap_or(text)
}

/// Description of a `@returns` entry, with its type group removed.
pub fn returns_description(content: &str) -> &str {
    let (_, rest) = split_type(content);
    strip_dash(rest)
}

/// Byte offset just past `prefix` in `content`, when it occurs on a token
/// boundary (`{string} name` must not match `{string} names`).
/// With `anchored`, the prefix must start the content.
pub fn find_prefix(content: &str, prefix: &str, anchored: bool) -> Option<usize> {
    for (start, _) in content.match_indices(prefix) {
        if anchored && start != 0 {
            return None;
        }
        let end = start + prefix.len();
        let bounded = content[end..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '$'));
        if bounded {
            return Some(end);
        }
    }
    None
}

/// Description following `prefix` in a `@param` entry.
pub fn trailing_description<'a>(content: &'a str, prefix: &str) -> &'a str {
    match find_prefix(content, prefix, false) {
        Some(end) => strip_dash(&content[end..]),
        None => "",
    }
}
