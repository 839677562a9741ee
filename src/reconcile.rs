//! Reconciliation engine: merge an existing documentation comment with
//! inferred metadata, field by field.
//!
//! Human-written text wins over generated text; generator placeholders
//! lose to anything else. Unmanaged tags pass through unchanged after the
//! managed sections (their original interleaving is not kept).
//! Running the engine on its own output with the same metadata yields the
//! same lines.

use crate::canonical::{self, find_prefix, trailing_description};
use crate::model::{ClassMetadata, FunctionMetadata, InferredMetadata, ParamInfo};
use crate::tags::{self, ParsedComment, TagEntry};
use crate::vocab::{self, ManagedTag, CONSTRUCTOR_PLACEHOLDER, RETURNS_PLACEHOLDER, VOID_TYPE};

/// Merge `existing` comment lines with `metadata`. The result may be empty.
pub fn reconcile(existing: &[String], metadata: &InferredMetadata) -> Vec<String> {
    let parsed = tags::parse(existing, metadata.name());

    let mut body = Vec::new();
    match metadata {
        InferredMetadata::Class(class) => {
            class_aux(&mut body, &parsed, class);
            constructor_aux(&mut body, &parsed, class);
        }
        InferredMetadata::Function(func) => {
            params(&mut body, &parsed, &func.params);
            returns(&mut body, &parsed, func);
            throws(&mut body, &parsed, func);
        }
    }
    examples(&mut body, &parsed, metadata.examples());
    for entry in &parsed.other {
        push_verbatim(&mut body, entry);
    }

    let mut out = Vec::new();
    if let Some(description) = description(&parsed, metadata.description()) {
        canonical::push_description(&mut out, description);
        if !out.is_empty() && !body.is_empty() {
            out.push(String::new());
        }
    }
    out.extend(body);
    out
}

/// Pick the description to emit: existing human text, then generated
/// text, then whatever the existing comment had.
fn description<'a>(parsed: &'a ParsedComment, generated: Option<&'a str>) -> Option<&'a str> {
    let existing = parsed.main_description.as_str();
    let generated = generated
        .map(str::trim)
        .filter(|d| !d.is_empty() && !vocab::is_placeholder_description(d));

    match generated {
        Some(generated) => {
            if existing.is_empty() || vocab::is_placeholder_description(existing) {
                Some(generated)
            } else {
                Some(existing)
            }
        }
        None => (!existing.is_empty()).then_some(existing),
    }
}

fn class_aux(out: &mut Vec<String>, parsed: &ParsedComment, class: &ClassMetadata) {
    match parsed.entries(ManagedTag::Class).first() {
        Some(entry) => push_verbatim(out, entry),
        None => out.push(canonical::class_line()),
    }

    let Some(parent) = class
        .extends_class
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
    else {
        return;
    };
    match parsed
        .entries(ManagedTag::Augments)
        .iter()
        .find(|e| e.content == parent)
    {
        Some(entry) => push_verbatim(out, entry),
        None => out.push(canonical::augments_line(parent)),
    }
}

fn constructor_aux(out: &mut Vec<String>, parsed: &ParsedComment, class: &ClassMetadata) {
    let Some(generated) = class.constructor_description.as_deref().map(str::trim) else {
        return;
    };
    let entries = parsed.entries(ManagedTag::Constructor);

    let human = entries.iter().map(TagEntry::text).find(|text| {
        !text.is_empty() && text != CONSTRUCTOR_PLACEHOLDER
    });
    if let Some(text) = human {
        canonical::push_text(out, &canonical::constructor_line(&text));
    } else if !generated.is_empty() && generated != CONSTRUCTOR_PLACEHOLDER {
        canonical::push_text(out, &canonical::constructor_line(generated));
    } else if let Some(entry) = entries.first() {
        push_verbatim(out, entry);
    } else {
        out.push(canonical::constructor_line(generated));
    }

    for param in &class.constructor_params {
        let prefix = param.prefix();
        let placeholder = vocab::param_placeholder(&param.ty, &param.name);
        let kept = parsed
            .entries(ManagedTag::Param)
            .iter()
            .map(TagEntry::text)
            .find(|text| find_prefix(text, &prefix, true).is_some())
            .map(|text| trailing_description(&text, &prefix).to_string())
            .filter(|d| !d.is_empty() && *d != placeholder);
        emit_param(out, param, &prefix, kept.as_deref());
    }
}

fn params(out: &mut Vec<String>, parsed: &ParsedComment, params: &[ParamInfo]) {
    for param in params {
        let prefix = param.prefix();
        let placeholder = vocab::param_placeholder(&param.ty, &param.name);
        let kept = parsed
            .entries(ManagedTag::Param)
            .iter()
            .map(TagEntry::text)
            .find(|text| find_prefix(text, &prefix, false).is_some())
            .filter(|text| !text.contains(&placeholder))
            .map(|text| trailing_description(&text, &prefix).to_string())
            .filter(|d| !d.is_empty());
        emit_param(out, param, &prefix, kept.as_deref());
    }
}

fn emit_param(out: &mut Vec<String>, param: &ParamInfo, prefix: &str, kept: Option<&str>) {
    let description = kept.unwrap_or(&param.description);
    canonical::push_text(out, &canonical::param_line(prefix, description));
}

fn returns(out: &mut Vec<String>, parsed: &ParsedComment, func: &FunctionMetadata) {
    let Some(info) = &func.returns else {
        return;
    };
    let Some(ty) = info
        .ty
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != VOID_TYPE)
    else {
        return;
    };

    let kept = parsed
        .entries(ManagedTag::Returns)
        .first()
        .map(|e| canonical::returns_description(&e.text()).to_string())
        .filter(|d| !d.is_empty() && d != RETURNS_PLACEHOLDER);
    let description = kept.as_deref().unwrap_or(&info.description);
    canonical::push_text(out, &canonical::returns_line(ty, description));
}

fn throws(out: &mut Vec<String>, parsed: &ParsedComment, func: &FunctionMetadata) {
    let existing = parsed.entries(ManagedTag::Throws);
    for info in &func.throws {
        let description = info.description.trim();
        match existing.iter().find(|e| e.text().contains(description)) {
            Some(entry) => push_verbatim(out, entry),
            None => canonical::push_text(out, &canonical::throws_line(description)),
        }
    }
}

/// Existing examples stay as written; generated ones are appended when
/// they are fenced code that is not already present.
fn examples(out: &mut Vec<String>, parsed: &ParsedComment, generated: &[String]) {
    let existing = parsed.entries(ManagedTag::Example);
    let mut seen: Vec<String> = existing
        .iter()
        .map(|e| canonical::normalize_example(&e.text()))
        .collect();
    for entry in existing {
        push_verbatim(out, entry);
    }

    for candidate in generated {
        let Some(code) = canonical::example_code(candidate) else {
            continue;
        };
        if seen.contains(&code) {
            continue;
        }
        out.push(canonical::example_line());
        canonical::push_text(out, &code);
        seen.push(code);
    }
}

fn push_verbatim(out: &mut Vec<String>, entry: &TagEntry) {
    out.extend(entry.lines().map(str::to_string));
}
