//! Main code generator.

use crate::golang::{RecordRenderer, StructRenderer};
use crate::symbols::Symbols;
use crate::target::{Target, TargetSpec};
use crate::typescript::InterfaceRenderer;
use pocketgen_schema::{CollectionModel, Interpretation, Interpreter, RawCollection};

/// Renders interpreted collections into target source text.
pub trait CollectionRenderer {
    /// Returns the text emitted once before all collections, if any.
    fn header(&self, _models: &[CollectionModel]) -> Option<String> {
        None
    }

    /// Renders one collection, taking top-level names from `symbols`.
    fn render(&self, model: &CollectionModel, symbols: &Symbols) -> String;
}

/// Default Go package name.
pub const DEFAULT_PACKAGE: &str = "models";

/// Main code generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    target: Target,
    spec: TargetSpec,
    package: String,
}

impl Generator {
    /// Creates a generator for the target with its default style.
    #[must_use]
    pub fn new(target: Target) -> Self {
        Self {
            target,
            spec: target.default_spec(),
            package: DEFAULT_PACKAGE.to_string(),
        }
    }

    /// Sets the rendering style.
    #[must_use]
    pub fn with_spec(mut self, spec: TargetSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Sets the Go package name.
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Returns the target.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the rendering style.
    #[must_use]
    pub fn spec(&self) -> TargetSpec {
        self.spec
    }

    /// Returns the Go package name.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the renderer for the configured target.
    ///
    /// Record wrappers read relation ids through the record and expose
    /// optional values as Go zero values, so they take no style options.
    #[must_use]
    pub fn renderer(&self) -> Box<dyn CollectionRenderer + '_> {
        match self.target {
            Target::TypeScript => Box::new(InterfaceRenderer::new(self.spec)),
            Target::GoStruct => Box::new(StructRenderer::new(self.spec, &self.package)),
            Target::GoRecord => Box::new(RecordRenderer::new(&self.package)),
        }
    }

    /// Interprets the selected collections with the target's options.
    #[must_use]
    pub fn interpret(&self, selected: &[&RawCollection], all: &[RawCollection]) -> Interpretation {
        Interpreter::new(all)
            .with_options(self.target.interpret_options())
            .interpret(selected.iter().copied())
    }

    /// Generates source text for interpreted collections.
    ///
    /// Collections are separated by a blank line in model order. The output
    /// ends with a newline, or is empty when there are no models.
    #[must_use]
    pub fn generate(&self, models: &[CollectionModel]) -> String {
        if models.is_empty() {
            return String::new();
        }

        if self.target == Target::GoRecord && self.spec != self.target.default_spec() {
            tracing::warn!("Style options do not apply to {} output", self.target);
        }

        let renderer = self.renderer();
        let symbols = self.symbols(models);
        let mut blocks = Vec::with_capacity(models.len() + 1);

        if let Some(header) = renderer.header(models) {
            blocks.push(header);
        }

        for model in models {
            tracing::debug!("Rendering {} as {}", model.name(), self.target);
            blocks.push(renderer.render(model, &symbols));
        }

        let mut output = blocks.join("\n\n");
        output.push('\n');
        output
    }

    /// Assigns the top-level names of one generated file.
    #[must_use]
    pub fn symbols(&self, models: &[CollectionModel]) -> Symbols {
        Symbols::new(models, self.target)
    }

    /// Interprets and generates the selected collections.
    #[must_use]
    pub fn generate_collections(&self, selected: &[&RawCollection], all: &[RawCollection]) -> String {
        let interpretation = self.interpret(selected, all);
        self.generate(&interpretation.models)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(Target::default())
    }
}
