//! Tag vocabulary tables: managed tags, the known-tag set and the
//! placeholder catalog.
//!
//! Placeholder matching is plain equality/substring comparison against a
//! handful of generator templates. Human text that happens to coincide
//! with a template is treated as filler.

/// Tags whose content the engine regenerates or reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedTag {
    Param,
    Returns,
    Throws,
    Example,
    Class,
    Description,
    Constructor,
    Augments,
}

impl ManagedTag {
    /// Resolve a tag name (without `@`), honoring the legacy aliases
    /// `return` and `extends`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "param" => Some(Self::Param),
            "returns" | "return" => Some(Self::Returns),
            "throws" => Some(Self::Throws),
            "example" => Some(Self::Example),
            "class" => Some(Self::Class),
            "description" => Some(Self::Description),
            "constructor" => Some(Self::Constructor),
            "augments" | "extends" => Some(Self::Augments),
            _ => None,
        }
    }

    /// Canonical tag name used when emitting new lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Param => "param",
            Self::Returns => "returns",
            Self::Throws => "throws",
            Self::Example => "example",
            Self::Class => "class",
            Self::Description => "description",
            Self::Constructor => "constructor",
            Self::Augments => "augments",
        }
    }
}

/// Conventional JSDoc, TSDoc and Closure tag names. The empty string
/// stands for bare lines.
pub const KNOWN_TAGS: &[&str] = &[
    "",
    "abstract",
    "access",
    "alias",
    "alpha",
    "arg",
    "argument",
    "async",
    "augments",
    "author",
    "beta",
    "borrows",
    "callback",
    "category",
    "class",
    "classdesc",
    "constant",
    "const",
    "constructor",
    "constructs",
    "copyright",
    "default",
    "defaultvalue",
    "defaultValue",
    "deprecated",
    "desc",
    "description",
    "emits",
    "enum",
    "event",
    "eventProperty",
    "example",
    "exception",
    "experimental",
    "exports",
    "extends",
    "external",
    "file",
    "fileoverview",
    "fires",
    "func",
    "function",
    "generator",
    "global",
    "hideconstructor",
    "host",
    "ignore",
    "implements",
    "import",
    "inheritdoc",
    "inheritDoc",
    "inner",
    "instance",
    "interface",
    "internal",
    "kind",
    "label",
    "lends",
    "license",
    "link",
    "linkcode",
    "linkplain",
    "listens",
    "member",
    "memberof",
    "method",
    "mixes",
    "mixin",
    "module",
    "name",
    "namespace",
    "override",
    "overload",
    "package",
    "packageDocumentation",
    "param",
    "private",
    "privateRemarks",
    "prop",
    "property",
    "protected",
    "public",
    "readonly",
    "remarks",
    "requires",
    "return",
    "returns",
    "satisfies",
    "see",
    "since",
    "static",
    "summary",
    "template",
    "this",
    "throws",
    "todo",
    "tutorial",
    "type",
    "typedef",
    "typeParam",
    "variation",
    "version",
    "virtual",
    "yield",
    "yields",
];

/// Whether a tag name belongs to the known vocabulary.
pub fn is_known_tag(name: &str) -> bool {
    KNOWN_TAGS.contains(&name)
}

/// Generic description sentinels emitted when text generation fails.
pub const DESCRIPTION_PLACEHOLDERS: &[&str] = &[
    "No description provided.",
    "TODO: Add description.",
    "Description not available.",
];

/// Generic `@returns` filler.
pub const RETURNS_PLACEHOLDER: &str = "The return value.";

/// Generic `@constructor` filler.
pub const CONSTRUCTOR_PLACEHOLDER: &str = "Creates a new instance.";

/// Type used for `@returns` when nothing is returned.
pub const VOID_TYPE: &str = "void";

/// Error kind label for synthesized `@throws` lines.
pub const GENERIC_ERROR_KIND: &str = "Error";

/// Whether a description is one of the cataloged sentinels.
pub fn is_placeholder_description(text: &str) -> bool {
    let text = text.trim();
    DESCRIPTION_PLACEHOLDERS.contains(&text)
}

/// Per-parameter filler, keyed by type and name.
pub fn param_placeholder(ty: &str, name: &str) -> String {
    format!("The {} value of {}.", ty, name)
}
