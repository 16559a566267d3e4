//! Target languages and rendering style options.

use crate::error::CodegenError;
use pocketgen_schema::InterpretOptions;
use std::fmt;
use std::str::FromStr;

/// Output target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// TypeScript interfaces and string enums.
    #[default]
    TypeScript,
    /// Go structs with JSON tags.
    GoStruct,
    /// Go record wrappers around `core.BaseRecordProxy` with accessors.
    GoRecord,
}

impl Target {
    /// All targets.
    pub const ALL: [Self; 3] = [Self::TypeScript, Self::GoStruct, Self::GoRecord];

    /// Returns the canonical target name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::GoStruct => "go",
            Self::GoRecord => "go-record",
        }
    }

    /// Parses a target from its name or alias.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "typescript" | "ts" => Some(Self::TypeScript),
            "go" | "go-struct" | "golang" => Some(Self::GoStruct),
            "go-record" | "record" => Some(Self::GoRecord),
            _ => None,
        }
    }

    /// Returns the usual file extension of generated files.
    #[must_use]
    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::GoStruct | Self::GoRecord => "go",
        }
    }

    /// Returns the default rendering style of the target.
    ///
    /// Go types mirror the JSON wire format, where relation fields carry
    /// record ids and resolved records only appear under `expand`.
    #[must_use]
    pub const fn default_spec(&self) -> TargetSpec {
        match self {
            Self::TypeScript => TargetSpec::new(),
            Self::GoStruct | Self::GoRecord => TargetSpec::new().relation_ids(true),
        }
    }

    /// Returns the interpret options matching what the target provides.
    ///
    /// Record wrappers run inside the backend, so hidden fields stay
    /// accessible and `id` comes from the embedded base record.
    #[must_use]
    pub fn interpret_options(&self) -> InterpretOptions {
        match self {
            Self::TypeScript | Self::GoStruct => InterpretOptions::new(),
            Self::GoRecord => InterpretOptions::new()
                .include_hidden(true)
                .exclude_field("id"),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CodegenError::unknown_target(s))
    }
}

/// Rendering style options.
///
/// `make_optional_fields_explicitly_optional` turns optional Go struct
/// fields into pointers; TypeScript always marks optional members with `?`.
/// `relation_as_foreign_key_string` renders relations as record ids in the
/// aggregate declaration, leaving resolved types to the expand declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TargetSpec {
    /// Encode optionality in the field type itself.
    pub make_optional_fields_explicitly_optional: bool,
    /// Render relations as foreign key strings.
    pub relation_as_foreign_key_string: bool,
}

impl TargetSpec {
    /// Creates the default style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            make_optional_fields_explicitly_optional: false,
            relation_as_foreign_key_string: false,
        }
    }

    /// Sets whether optional fields are encoded in the type.
    #[must_use]
    pub const fn explicit_optional(mut self, enabled: bool) -> Self {
        self.make_optional_fields_explicitly_optional = enabled;
        self
    }

    /// Sets whether relations render as foreign key strings.
    #[must_use]
    pub const fn relation_ids(mut self, enabled: bool) -> Self {
        self.relation_as_foreign_key_string = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_parse() {
        assert_eq!(Target::parse("ts"), Some(Target::TypeScript));
        assert_eq!(Target::parse("TypeScript"), Some(Target::TypeScript));
        assert_eq!(Target::parse("go"), Some(Target::GoStruct));
        assert_eq!(Target::parse("record"), Some(Target::GoRecord));
        assert_eq!(Target::parse("python"), None);
    }

    #[test]
    fn test_target_from_str_error() {
        let err = "kotlin".parse::<Target>().unwrap_err();
        assert!(matches!(err, CodegenError::UnknownTarget { ref name } if name == "kotlin"));
    }

    #[test]
    fn test_target_name_round_trips() {
        for target in Target::ALL {
            assert_eq!(Target::parse(target.name()), Some(target));
        }
    }

    #[test]
    fn test_record_target_excludes_id() {
        let options = Target::GoRecord.interpret_options();
        assert!(options.include_hidden);
        assert_eq!(options.excluded_fields, vec!["id"]);

        let options = Target::TypeScript.interpret_options();
        assert!(!options.include_hidden);
        assert!(options.excluded_fields.is_empty());
    }

    #[test]
    fn test_default_spec() {
        assert!(!Target::TypeScript.default_spec().relation_as_foreign_key_string);
        assert!(Target::GoStruct.default_spec().relation_as_foreign_key_string);
        assert!(Target::GoRecord.default_spec().relation_as_foreign_key_string);
    }

    #[test]
    fn test_target_spec_builders() {
        let spec = TargetSpec::new().explicit_optional(true).relation_ids(true);
        assert!(spec.make_optional_fields_explicitly_optional);
        assert!(spec.relation_as_foreign_key_string);
        assert_eq!(TargetSpec::default(), TargetSpec::new());
    }
}
