//! Fresh builder: documentation lines from inferred metadata alone, for
//! declarations that have no documentation comment yet.

use crate::canonical;
use crate::model::{ClassMetadata, FunctionMetadata, InferredMetadata};
use crate::vocab::VOID_TYPE;

/// Build a documentation line sequence from `metadata`.
pub fn build_fresh(metadata: &InferredMetadata) -> Vec<String> {
    match metadata {
        InferredMetadata::Function(func) => build_function(func),
        InferredMetadata::Class(class) => build_class(class),
    }
}

fn build_function(func: &FunctionMetadata) -> Vec<String> {
    let mut params = Vec::new();
    for param in &func.params {
        canonical::push_text(
            &mut params,
            &canonical::param_line(&param.prefix(), &param.description),
        );
    }

    let mut tail = Vec::new();
    if let Some(info) = &func.returns {
        if let Some(ty) = info
            .ty
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != VOID_TYPE)
        {
            canonical::push_text(&mut tail, &canonical::returns_line(ty, &info.description));
        }
    }
    for info in &func.throws {
        canonical::push_text(&mut tail, &canonical::throws_line(&info.description));
    }
    push_examples(&mut tail, &func.examples);

    let mut out = Vec::new();
    if let Some(description) = func.description.as_deref() {
        canonical::push_description(&mut out, description);
    }
    if !out.is_empty() && !(params.is_empty() && tail.is_empty()) {
        out.push(String::new());
    }
    let separate = !params.is_empty() && !tail.is_empty();
    out.extend(params);
    if separate {
        out.push(String::new());
    }
    out.extend(tail);
    out
}

fn build_class(class: &ClassMetadata) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(description) = class.description.as_deref() {
        canonical::push_description(&mut out, description);
    }
    out.push(canonical::class_line());
    if let Some(parent) = class
        .extends_class
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        out.push(canonical::augments_line(parent));
    }

    let mut examples = Vec::new();
    push_examples(&mut examples, &class.examples);
    if !examples.is_empty() {
        out.push(String::new());
        out.extend(examples);
    }

    if let Some(description) = class.constructor_description.as_deref() {
        canonical::push_text(&mut out, &canonical::constructor_line(description));
        for param in &class.constructor_params {
            canonical::push_text(
                &mut out,
                &canonical::param_line(&param.prefix(), &param.description),
            );
        }
    }
    out
}

/// Fenced candidates only, fences stripped, duplicates dropped.
fn push_examples(out: &mut Vec<String>, candidates: &[String]) {
    let mut seen: Vec<String> = Vec::new();
    for candidate in candidates {
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
