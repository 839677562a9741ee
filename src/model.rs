//! Data model for inferred documentation, independent of comment syntax.

use serde::{Deserialize, Serialize};

/// Ordered comment lines: free text, blank separators, or `@tag content`.
pub type NormalizedLines = Vec<String>;

/// Documentation inferred for one declaration by static analysis plus
/// text generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InferredMetadata {
    #[serde(alias = "method")]
    Function(FunctionMetadata),
    Class(ClassMetadata),
}

impl InferredMetadata {
    /// Name of the declaration, used in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            InferredMetadata::Function(f) => &f.name,
            InferredMetadata::Class(c) => &c.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            InferredMetadata::Function(f) => f.description.as_deref(),
            InferredMetadata::Class(c) => c.description.as_deref(),
        }
    }

    pub fn examples(&self) -> &[String] {
        match self {
            InferredMetadata::Function(f) => &f.examples,
            InferredMetadata::Class(c) => &c.examples,
        }
    }
}

/// Metadata for a function or method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamInfo>,
    #[serde(default)]
    pub returns: Option<ReturnsInfo>,
    #[serde(default)]
    pub throws: Vec<ThrowsInfo>,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Metadata for a class and its constructor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "extends", alias = "extendsClass")]
    pub extends_class: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default, alias = "constructorDescription")]
    pub constructor_description: Option<String>,
    #[serde(default, alias = "constructorParams")]
    pub constructor_params: Vec<ParamInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub description: String,
}

impl ParamInfo {
    /// `{type} name`, the part of a `@param` line that identifies it.
    pub fn prefix(&self) -> String {
        format!("{{{}}} {}", self.ty, self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnsInfo {
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThrowsInfo {
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_function_with_defaults() {
        let json = r#"{"kind": "function", "name": "add", "params": [{"name": "a", "type": "number"}]}"#;
        let meta: InferredMetadata = serde_json::from_str(json).unwrap();
        let InferredMetadata::Function(f) = meta else {
            panic!("expected function metadata");
        };
        assert_eq!(f.name, "add");
        assert_eq!(f.params[0].prefix(), "{number} a");
        assert!(f.returns.is_none());
        assert!(f.examples.is_empty());
    }

    #[test]
    fn method_is_an_alias_for_function() {
        let json = r#"{"kind": "method", "name": "save"}"#;
        let meta: InferredMetadata = serde_json::from_str(json).unwrap();
        assert!(matches!(meta, InferredMetadata::Function(_)));
        assert_eq!(meta.name(), "save");
    }

    #[test]
    fn deserialize_class_with_camel_case_aliases() {
        let json = r#"{
            "kind": "class",
            "name": "User",
            "extendsClass": "Base",
            "constructorDescription": "Creates a user.",
            "constructorParams": [{"name": "id", "type": "string", "description": "The user ID."}]
        }"#;
        let meta: InferredMetadata = serde_json::from_str(json).unwrap();
        let InferredMetadata::Class(c) = meta else {
            panic!("expected class metadata");
        };
        assert_eq!(c.extends_class.as_deref(), Some("Base"));
        assert_eq!(c.constructor_description.as_deref(), Some("Creates a user."));
        assert_eq!(c.constructor_params.len(), 1);
    }
}
