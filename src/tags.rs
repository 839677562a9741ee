//! Tag parser: split normalized comment lines into the leading
//! description and `@tag` entries.
//!
//! Managed tags are grouped by tag in an ordered multimap; everything
//! else lands in a single ordered "other" list so it can be passed
//! through untouched.

use crate::vocab::{self, ManagedTag};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

static RE_TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(\S*)\s*(.*)$").unwrap());

/// One `@tag` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    /// Tag name without `@`, with aliases resolved for managed tags.
    pub tag_name: String,
    /// Text after the tag name on the tag line, trimmed.
    pub content: String,
    /// The tag line exactly as it appeared.
    pub original_line: String,
    /// Bare lines following the tag line (multi-line examples and
    /// descriptions).
    pub continuation: Vec<String>,
}

impl TagEntry {
    /// Content including continuation lines, newline-joined.
    pub fn text(&self) -> String {
        if self.continuation.is_empty() {
            return self.content.clone();
        }
        let mut text = self.content.clone();
        for line in &self.continuation {
            text.push('\n');
            text.push_str(line);
        }
        text.trim().to_string()
    }

    /// The entry's source lines, for verbatim re-emission.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.original_line.as_str())
            .chain(self.continuation.iter().map(String::as_str))
    }
}

/// An existing comment broken into description and tags.
#[derive(Debug, Default)]
pub struct ParsedComment {
    pub main_description: String,
    pub groups: IndexMap<ManagedTag, Vec<TagEntry>>,
    pub other: Vec<TagEntry>,
}

impl ParsedComment {
    /// Entries for a managed tag, in source order.
    pub fn entries(&self, tag: ManagedTag) -> &[TagEntry] {
        self.groups.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Unmanaged entries whose tag is outside the known vocabulary.
    pub fn unknown_tags(&self) -> impl Iterator<Item = &TagEntry> {
        self.other
            .iter()
            .filter(|e| !vocab::is_known_tag(&e.tag_name))
    }
}

/// Tag name of an `@tag` line, without the `@`.
pub fn tag_name(line: &str) -> Option<&str> {
    RE_TAG_LINE
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Where the last parsed entry went, so continuation lines can follow it.
enum Slot {
    Managed(ManagedTag),
    Other,
}

/// Parse normalized lines. `declaration` names the documented symbol in
/// diagnostics.
pub fn parse(lines: &[String], declaration: &str) -> ParsedComment {
    let mut parsed = ParsedComment::default();
    let mut bare: Vec<&str> = Vec::new();
    let mut last: Option<Slot> = None;

    for line in lines {
        let trimmed = line.trim();

        // Inside an example body, `@Decorator()` and the like are code
        let tag_caps = RE_TAG_LINE.captures(trimmed).filter(|caps| {
            !matches!(last, Some(Slot::Managed(ManagedTag::Example)))
                || vocab::is_known_tag(&caps[1])
        });
        if let Some(caps) = tag_caps {
            let raw_name = &caps[1];
            let content = caps[2].trim().to_string();

            if let Some(tag) = ManagedTag::from_name(raw_name) {
                parsed.groups.entry(tag).or_default().push(TagEntry {
                    tag_name: tag.name().to_string(),
                    content,
                    original_line: trimmed.to_string(),
                    continuation: Vec::new(),
                });
                last = Some(Slot::Managed(tag));
            } else {
                if !vocab::is_known_tag(raw_name) {
                    tracing::warn!(
                        declaration = %declaration,
                        tag = %raw_name,
                        "unrecognized documentation tag; preserving it as-is"
                    );
                }
                parsed.other.push(TagEntry {
                    tag_name: raw_name.to_string(),
                    content,
                    original_line: trimmed.to_string(),
                    continuation: Vec::new(),
                });
                last = Some(Slot::Other);
            }
            continue;
        }

        let entry = match &last {
            None => {
                bare.push(trimmed);
                continue;
            }
            Some(Slot::Managed(tag)) => parsed.groups.get_mut(tag).and_then(|g| g.last_mut()),
            Some(Slot::Other) => parsed.other.last_mut(),
        };
        if let Some(entry) = entry {
            entry.continuation.push(line.trim_end().to_string());
        }
    }

    for entry in parsed
        .groups
        .values_mut()
        .flatten()
        .chain(parsed.other.iter_mut())
    {
        while entry.continuation.last().is_some_and(|l| l.trim().is_empty()) {
            entry.continuation.pop();
        }
    }

    parsed.main_description = bare.join("\n").trim().to_string();

    // `@description` stands in for (or extends) the leading text
    let tagged: Vec<String> = parsed
        .entries(ManagedTag::Description)
        .iter()
        .map(TagEntry::text)
        .filter(|t| !t.is_empty())
        .collect();
    for text in tagged {
        if parsed.main_description.is_empty() {
            parsed.main_description = text;
        } else {
            parsed.main_description.push_str("\n\n");
            parsed.main_description.push_str(&text);
        }
    }

    parsed
}
