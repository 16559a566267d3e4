//! Identifier naming and escaping shared by the generators.
//!
//! | Target | Site | Rule |
//! |--------|------|------|
//! | TypeScript | property name | quoted when reserved or not an identifier |
//! | TypeScript | enum member | PascalCase of the literal, `_` prefix if it starts with a digit |
//! | Go | exported name | PascalCase, `X` prefix if empty or starting with a digit |
//! | Go | parameter name | camelCase, `_` prefix if reserved or taken |

use pocketgen_schema::ir::{to_camel_case, to_pascal_case};
use std::collections::HashSet;

/// TypeScript reserved words, including strict-mode and contextual type keywords.
pub const TYPESCRIPT_RESERVED: &[&str] = &[
    "any", "as", "boolean", "break", "case", "catch", "class", "const", "constructor", "continue",
    "debugger", "declare", "default", "delete", "do", "else", "enum", "export", "extends",
    "false", "finally", "for", "from", "function", "get", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "module", "never", "new", "null", "number", "object",
    "package", "private", "protected", "public", "require", "return", "set", "static", "string",
    "super", "switch", "symbol", "this", "throw", "true", "try", "type", "typeof", "undefined",
    "unknown", "var", "void", "while", "with", "yield",
];

/// Go keywords and predeclared identifiers.
pub const GO_RESERVED: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough", "for",
    "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var", "any", "append", "bool", "byte", "cap", "clear",
    "close", "comparable", "complex", "complex64", "complex128", "copy", "delete", "error",
    "false", "float32", "float64", "imag", "int", "int8", "int16", "int32", "int64", "iota",
    "len", "make", "max", "min", "new", "nil", "panic", "print", "println", "real", "recover",
    "rune", "string", "true", "uint", "uint8", "uint16", "uint32", "uint64", "uintptr",
];

/// Returns true if `name` is a TypeScript reserved word.
#[must_use]
pub fn is_typescript_reserved(name: &str) -> bool {
    TYPESCRIPT_RESERVED.contains(&name)
}

/// Returns true if `name` is a Go keyword or predeclared identifier.
#[must_use]
pub fn is_go_reserved(name: &str) -> bool {
    GO_RESERVED.contains(&name)
}

/// Returns true if `name` is a plain TypeScript identifier.
#[must_use]
pub fn is_typescript_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Escapes a property name for a TypeScript interface member.
#[must_use]
pub fn typescript_property_name(name: &str) -> String {
    if is_typescript_identifier(name) && !is_typescript_reserved(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Returns the TypeScript enum member name for an option literal.
#[must_use]
pub fn typescript_enum_member(literal: &str) -> String {
    let name = to_pascal_case(literal);
    match name.chars().next() {
        None => "_".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{}", name),
        Some(_) => name,
    }
}

/// Returns an exported Go identifier for a schema name.
#[must_use]
pub fn go_exported_name(name: &str) -> String {
    let pascal = to_pascal_case(name);
    match pascal.chars().next() {
        None => "X".to_string(),
        Some(c) if c.is_ascii_digit() => format!("X{}", pascal),
        Some(_) => pascal,
    }
}

/// Returns a Go parameter name for a schema name.
///
/// `taken` lists identifiers already bound in the enclosing scope, such as
/// the method receiver.
#[must_use]
pub fn go_param_name(name: &str, taken: &[&str]) -> String {
    let camel = to_camel_case(name);
    let starts_with_digit = camel.chars().next().is_none_or(|c| c.is_ascii_digit());

    if starts_with_digit || is_go_reserved(&camel) || taken.contains(&camel.as_str()) {
        format!("_{}", camel)
    } else {
        camel
    }
}

/// Renders a double-quoted string literal valid in both TypeScript and Go.
#[must_use]
pub fn string_literal(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    for c in value.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Hands out unique identifiers within one scope.
///
/// A name that is already taken gets the smallest numeric suffix, starting
/// at 2, that makes it unique.
#[derive(Debug, Default)]
pub struct Namespace {
    used: HashSet<String>,
}

impl Namespace {
    /// Creates an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a namespace with names already taken.
    #[must_use]
    pub fn with_reserved(names: &[&str]) -> Self {
        Self {
            used: names.iter().map(|n| (*n).to_string()).collect(),
        }
    }

    /// Claims `candidate`, or the first free suffixed variant of it.
    pub fn claim(&mut self, candidate: impl Into<String>) -> String {
        let candidate = candidate.into();
        if self.used.insert(candidate.clone()) {
            return candidate;
        }

        let mut suffix = 2;
        loop {
            let name = format!("{}{}", candidate, suffix);
            if self.used.insert(name.clone()) {
                return name;
            }
            suffix += 1;
        }
    }

    /// Claims every name `declare` derives from the first variant of `stem`
    /// whose names are all free, and returns that variant.
    pub fn claim_group<F>(&mut self, stem: &str, declare: F) -> String
    where
        F: Fn(&str) -> Vec<String>,
    {
        let mut suffix = 1;
        loop {
            let candidate = if suffix == 1 {
                stem.to_string()
            } else {
                format!("{}{}", stem, suffix)
            };

            let names = declare(&candidate);
            if names.iter().all(|name| !self.used.contains(name)) {
                self.used.extend(names);
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// Maps option literals to unique member names, preserving order.
#[must_use]
pub fn unique_names<F>(literals: &[String], transform: F) -> Vec<String>
where
    F: Fn(&str) -> String,
{
    let mut namespace = Namespace::new();
    literals
        .iter()
        .map(|literal| namespace.claim(transform(literal)))
        .collect()
}
