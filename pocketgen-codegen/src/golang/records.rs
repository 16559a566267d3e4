//! Go record wrapper generation.
//!
//! Each collection becomes a type embedding `core.BaseRecordProxy`, with a
//! getter and setter per field, expand helpers for relations and a set of
//! lookup functions. Relation fields are stored as record ids; the expand
//! helpers load and wrap the referenced records.

use crate::generator::CollectionRenderer;
use crate::golang::enums::render_enum;
use crate::golang::{CORE_IMPORT, DBX_IMPORT, TYPES_IMPORT, file_header, uses_dates};
use crate::naming::{Namespace, go_exported_name, go_param_name, string_literal};
use crate::symbols::Symbols;
use pocketgen_schema::CollectionModel;
use pocketgen_schema::ir::Property;
use pocketgen_schema::types::PropertyKind;

/// Method and field names the generated code relies on.
const PROXY_MEMBERS: &[&str] = &[
    "Record",
    "ProxyRecord",
    "SetProxyRecord",
    "Get",
    "Set",
    "GetString",
    "GetFloat",
    "GetInt",
    "GetBool",
    "GetDateTime",
    "GetStringSlice",
    "UnmarshalJSONField",
    "ExpandedOne",
    "ExpandedAll",
];

/// Identifiers bound inside generated method bodies.
const LOCALS: &[&str] = &["p", "app", "i", "value", "values", "result", "err", "errs"];

/// Fields PocketBase maintains itself.
const READ_ONLY_FIELDS: &[&str] = &["created", "updated"];

/// Renders collections as PocketBase record wrappers.
#[derive(Debug, Clone, Copy)]
pub struct RecordRenderer<'a> {
    package: &'a str,
}

impl<'a> RecordRenderer<'a> {
    /// Creates a new record renderer.
    #[must_use]
    pub fn new(package: &'a str) -> Self {
        Self { package }
    }
}

impl CollectionRenderer for RecordRenderer<'_> {
    fn header(&self, models: &[CollectionModel]) -> Option<String> {
        let mut imports = vec![DBX_IMPORT, CORE_IMPORT];
        if uses_dates(models) {
            imports.push(TYPES_IMPORT);
        }
        Some(file_header(self.package, &imports))
    }

    fn render(&self, model: &CollectionModel, symbols: &Symbols) -> String {
        let name = symbols.type_name(model.name());
        let mut methods = Namespace::with_reserved(PROXY_MEMBERS);

        let mut blocks: Vec<String> = model
            .distinct_enums()
            .into_iter()
            .map(|property| render_enum(property, symbols))
            .collect();

        blocks.push(format!(
            "const {}CollectionName = {}",
            name,
            string_literal(model.name())
        ));
        blocks.push(format!("type {} struct {{\n\tcore.BaseRecordProxy\n}}", name));

        for property in model.properties() {
            let accessor = Accessor::new(&name, property, symbols);
            let method = methods.claim(go_exported_name(&property.name));

            blocks.push(accessor.getter(&method));

            if property.kind == PropertyKind::Number && !property.is_array {
                let int_method = methods.claim(format!("{}Int", method));
                blocks.push(accessor.int_getter(&int_method));
            }

            if !READ_ONLY_FIELDS.contains(&property.name.as_str()) {
                let setter = methods.claim(format!("Set{}", method));
                blocks.push(accessor.setter(&setter));
            }

            if property.is_relation() {
                let expand = methods.claim(format!("Expand{}", method));
                blocks.push(accessor.expand(&expand));
            }
        }

        blocks.push(crud_functions(&name));

        blocks.join("\n\n")
    }
}

/// Renders the accessors of one property.
struct Accessor<'a> {
    receiver: &'a str,
    property: &'a Property,
    symbols: &'a Symbols,
    field: String,
}

impl<'a> Accessor<'a> {
    fn new(receiver: &'a str, property: &'a Property, symbols: &'a Symbols) -> Self {
        Self {
            receiver,
            property,
            symbols,
            field: string_literal(&property.name),
        }
    }

    fn enum_name(&self) -> String {
        self.symbols.enum_name(self.property)
    }

    /// Go type of the stored value.
    fn value_type(&self) -> String {
        let element = match self.property.kind {
            PropertyKind::Number => "float64".to_string(),
            PropertyKind::Boolean => "bool".to_string(),
            PropertyKind::Date => "types.DateTime".to_string(),
            PropertyKind::Json => "map[string]any".to_string(),
            PropertyKind::Enum => self.enum_name(),
            PropertyKind::String | PropertyKind::File | PropertyKind::Relation => {
                "string".to_string()
            }
        };

        if self.property.is_array {
            format!("[]{}", element)
        } else {
            element
        }
    }

    fn getter(&self, method: &str) -> String {
        let field = &self.field;
        let body = match (self.property.kind, self.property.is_array) {
            (PropertyKind::Json, _) => format!(
                "\tvar value map[string]any\n\
                 \tif err := p.UnmarshalJSONField({field}, &value); err != nil {{\n\
                 \t\treturn nil\n\
                 \t}}\n\
                 \treturn value\n"
            ),
            (PropertyKind::Enum, true) => {
                let enum_name = self.enum_name();
                format!(
                    "\tvalues := p.GetStringSlice({field})\n\
                     \tresult := make([]{enum_name}, len(values))\n\
                     \tfor i, value := range values {{\n\
                     \t\tresult[i] = {enum_name}(value)\n\
                     \t}}\n\
                     \treturn result\n"
                )
            }
            (PropertyKind::Enum, false) => format!(
                "\treturn {}(p.GetString({field}))\n",
                self.enum_name()
            ),
            (PropertyKind::Number, _) => format!("\treturn p.GetFloat({field})\n"),
            (PropertyKind::Boolean, _) => format!("\treturn p.GetBool({field})\n"),
            (PropertyKind::Date, _) => format!("\treturn p.GetDateTime({field})\n"),
            (_, true) => format!("\treturn p.GetStringSlice({field})\n"),
            (_, false) => format!("\treturn p.GetString({field})\n"),
        };

        format!(
            "func (p *{}) {}() {} {{\n{}}}",
            self.receiver,
            method,
            self.value_type(),
            body
        )
    }

    fn int_getter(&self, method: &str) -> String {
        format!(
            "func (p *{}) {}() int {{\n\treturn p.GetInt({})\n}}",
            self.receiver, method, self.field
        )
    }

    fn setter(&self, method: &str) -> String {
        let field = &self.field;
        let param = go_param_name(&self.property.name, LOCALS);
        let body = match (self.property.kind, self.property.is_array) {
            (PropertyKind::Enum, true) => format!(
                "\tvalues := make([]string, len({param}))\n\
                 \tfor i, value := range {param} {{\n\
                 \t\tvalues[i] = string(value)\n\
                 \t}}\n\
                 \tp.Set({field}, values)\n"
            ),
            (PropertyKind::Enum, false) => format!("\tp.Set({field}, string({param}))\n"),
            _ => format!("\tp.Set({field}, {param})\n"),
        };

        format!(
            "func (p *{}) {}({} {}) {{\n{}}}",
            self.receiver,
            method,
            param,
            self.value_type(),
            body
        )
    }

    fn expand(&self, method: &str) -> String {
        let field = &self.field;
        let target = self
            .property
            .relation_target()
            .map(|target| self.symbols.type_name(target));

        let load = format!(
            "\terrs := app.ExpandRecord(p.Record, []string{{{field}}}, nil)\n\
             \tif err := errs[{field}]; err != nil {{\n\
             \t\treturn nil, err\n\
             \t}}\n"
        );

        let (result_type, body) = match (target, self.property.is_array) {
            (Some(target), true) => (
                format!("[]*{}", target),
                format!(
                    "\trecords := p.ExpandedAll({field})\n\
                     \tresult := make([]*{target}, len(records))\n\
                     \tfor i, record := range records {{\n\
                     \t\tresult[i] = Wrap{target}(record)\n\
                     \t}}\n\
                     \treturn result, nil\n"
                ),
            ),
            (Some(target), false) => (
                format!("*{}", target),
                format!(
                    "\trecord := p.ExpandedOne({field})\n\
                     \tif record == nil {{\n\
                     \t\treturn nil, nil\n\
                     \t}}\n\
                     \treturn Wrap{target}(record), nil\n"
                ),
            ),
            (None, true) => (
                "[]*core.Record".to_string(),
                format!("\treturn p.ExpandedAll({field}), nil\n"),
            ),
            (None, false) => (
                "*core.Record".to_string(),
                format!("\treturn p.ExpandedOne({field}), nil\n"),
            ),
        };

        format!(
            "func (p *{}) {}(app core.App) ({}, error) {{\n{}{}}}",
            self.receiver, method, result_type, load, body
        )
    }
}

/// Top-level names declared for a collection type name.
pub(crate) fn declarations(name: &str) -> Vec<String> {
    vec![
        name.to_string(),
        format!("{}CollectionName", name),
        format!("Wrap{}", name),
        format!("New{}", name),
        format!("Find{}ById", name),
        format!("FindFirst{}ByData", name),
        format!("Find{}ByFilter", name),
    ]
}

/// Renders the wrap, create and lookup functions of a collection.
fn crud_functions(name: &str) -> String {
    format!(
        "func Wrap{name}(record *core.Record) *{name} {{\n\
         \tresult := &{name}{{}}\n\
         \tresult.SetProxyRecord(record)\n\
         \treturn result\n\
         }}\n\
         \n\
         func New{name}(app core.App) (*{name}, error) {{\n\
         \tcollection, err := app.FindCachedCollectionByNameOrId({name}CollectionName)\n\
         \tif err != nil {{\n\
         \t\treturn nil, err\n\
         \t}}\n\
         \treturn Wrap{name}(core.NewRecord(collection)), nil\n\
         }}\n\
         \n\
         func Find{name}ById(app core.App, id string) (*{name}, error) {{\n\
         \trecord, err := app.FindRecordById({name}CollectionName, id)\n\
         \tif err != nil {{\n\
         \t\treturn nil, err\n\
         \t}}\n\
         \treturn Wrap{name}(record), nil\n\
         }}\n\
         \n\
         func FindFirst{name}ByData(app core.App, key string, value any) (*{name}, error) {{\n\
         \trecord, err := app.FindFirstRecordByData({name}CollectionName, key, value)\n\
         \tif err != nil {{\n\
         \t\treturn nil, err\n\
         \t}}\n\
         \treturn Wrap{name}(record), nil\n\
         }}\n\
         \n\
         func Find{name}ByFilter(app core.App, filter string, sort string, limit int, offset int, params ...dbx.Params) ([]*{name}, error) {{\n\
         \trecords, err := app.FindRecordsByFilter({name}CollectionName, filter, sort, limit, offset, params...)\n\
         \tif err != nil {{\n\
         \t\treturn nil, err\n\
         \t}}\n\
         \tresult := make([]*{name}, len(records))\n\
         \tfor i, record := range records {{\n\
         \t\tresult[i] = Wrap{name}(record)\n\
         \t}}\n\
         \treturn result, nil\n\
         }}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Target;
    use pocketgen_schema::{Interpreter, RawCollection, RawField};

    fn render(all: &[RawCollection], index: usize) -> String {
        let models = Interpreter::new(all)
            .with_options(Target::GoRecord.interpret_options())
            .interpret([&all[index]])
            .models;
        let symbols = Symbols::new(&models, Target::GoRecord);
        RecordRenderer::new("models").render(&models[0], &symbols)
    }

    fn blog() -> Vec<RawCollection> {
        vec![
            RawCollection::new("pbc_authors", "authors")
                .with_field(RawField::new("id", "text").required(true))
                .with_field(RawField::new("name", "text").required(true)),
            RawCollection::new("pbc_posts", "posts")
                .with_field(RawField::new("id", "text").required(true))
                .with_field(RawField::new("title", "text").required(true))
                .with_field(RawField::new("views", "number"))
                .with_field(
                    RawField::new("status", "select")
                        .with_max_select(1)
                        .with_values(["draft", "live"]),
                )
                .with_field(
                    RawField::new("tags", "select")
                        .with_max_select(3)
                        .with_values(["rust", "go"]),
                )
                .with_field(
                    RawField::new("author", "relation")
                        .with_collection_id("pbc_authors")
                        .with_max_select(1),
                )
                .with_field(
                    RawField::new("reviewers", "relation")
                        .with_collection_id("pbc_authors")
                        .with_max_select(5),
                )
                .with_field(RawField::new("created", "autodate"))
                .with_field(RawField::new("updated", "autodate")),
        ]
    }

    #[test]
    fn test_record_type_and_constant() {
        let output = render(&blog(), 1);

        assert!(output.contains("const PostsCollectionName = \"posts\""));
        assert!(output.contains("type Posts struct {\n\tcore.BaseRecordProxy\n}"));
        assert!(!output.contains("func (p *Posts) Id()"));
    }

    #[test]
    fn test_scalar_accessors() {
        let output = render(&blog(), 1);

        assert!(output.contains(
            "func (p *Posts) Title() string {\n\treturn p.GetString(\"title\")\n}"
        ));
        assert!(output.contains(
            "func (p *Posts) SetTitle(title string) {\n\tp.Set(\"title\", title)\n}"
        ));
        assert!(output.contains(
            "func (p *Posts) Views() float64 {\n\treturn p.GetFloat(\"views\")\n}"
        ));
        assert!(output.contains(
            "func (p *Posts) ViewsInt() int {\n\treturn p.GetInt(\"views\")\n}"
        ));
    }

    #[test]
    fn test_enum_accessors() {
        let output = render(&blog(), 1);

        assert!(output.contains(
            "func (p *Posts) Status() PostsStatusOptions {\n\treturn PostsStatusOptions(p.GetString(\"status\"))\n}"
        ));
        assert!(output.contains(
            "func (p *Posts) SetStatus(status PostsStatusOptions) {\n\tp.Set(\"status\", string(status))\n}"
        ));
        assert!(output.contains("func (p *Posts) Tags() []PostsTagsOptions {\n"));
        assert!(output.contains("func (p *Posts) SetTags(tags []PostsTagsOptions) {\n"));
    }

    #[test]
    fn test_timestamps_have_no_setters() {
        let output = render(&blog(), 1);

        assert!(output.contains("func (p *Posts) Created() types.DateTime {"));
        assert!(output.contains("func (p *Posts) Updated() types.DateTime {"));
        assert!(!output.contains("SetCreated"));
        assert!(!output.contains("SetUpdated"));
    }

    #[test]
    fn test_relation_accessors_use_ids() {
        let output = render(&blog(), 1);

        assert!(output.contains(
            "func (p *Posts) Author() string {\n\treturn p.GetString(\"author\")\n}"
        ));
        assert!(output.contains(
            "func (p *Posts) Reviewers() []string {\n\treturn p.GetStringSlice(\"reviewers\")\n}"
        ));
        assert!(output.contains("func (p *Posts) ExpandAuthor(app core.App) (*Authors, error) {\n"));
        assert!(output.contains("\treturn WrapAuthors(record), nil\n"));
        assert!(output.contains(
            "func (p *Posts) ExpandReviewers(app core.App) ([]*Authors, error) {\n"
        ));
        assert!(output.contains("errs := app.ExpandRecord(p.Record, []string{\"reviewers\"}, nil)"));
    }

    #[test]
    fn test_unresolved_relation_expands_raw_record() {
        let all = vec![
            RawCollection::new("pbc_comments", "comments").with_field(
                RawField::new("post", "relation").with_collection_id("pbc_missing"),
            ),
        ];
        let output = render(&all, 0);

        assert!(output.contains("func (p *Comments) ExpandPost(app core.App) (*core.Record, error) {\n"));
        assert!(output.contains("\treturn p.ExpandedOne(\"post\"), nil\n"));
    }

    #[test]
    fn test_reserved_name_escaping() {
        let all = vec![
            RawCollection::new("pbc_items", "items")
                .with_field(RawField::new("type", "text"))
                .with_field(RawField::new("range", "number")),
        ];
        let output = render(&all, 0);

        assert!(output.contains("func (p *Items) Type() string {\n\treturn p.GetString(\"type\")\n}"));
        assert!(output.contains("func (p *Items) SetType(_type string) {\n\tp.Set(\"type\", _type)\n}"));
        assert!(output.contains("func (p *Items) SetRange(_range float64) {\n\tp.Set(\"range\", _range)\n}"));
    }

    #[test]
    fn test_method_collisions_are_suffixed() {
        let all = vec![
            RawCollection::new("pbc_x", "x")
                .with_field(RawField::new("set", "text"))
                .with_field(RawField::new("views", "number"))
                .with_field(RawField::new("views_int", "number")),
        ];
        let output = render(&all, 0);

        assert!(output.contains("func (p *X) Set2() string {"));
        assert!(output.contains("func (p *X) ViewsInt() int {"));
        assert!(output.contains("func (p *X) ViewsInt2() float64 {"));
    }

    #[test]
    fn test_crud_functions() {
        let output = render(&blog(), 0);

        assert!(output.contains("func WrapAuthors(record *core.Record) *Authors {"));
        assert!(output.contains("func NewAuthors(app core.App) (*Authors, error) {"));
        assert!(output.contains("func FindAuthorsById(app core.App, id string) (*Authors, error) {"));
        assert!(output.contains(
            "func FindFirstAuthorsByData(app core.App, key string, value any) (*Authors, error) {"
        ));
        assert!(output.contains("params ...dbx.Params) ([]*Authors, error) {"));
        assert!(output.ends_with("\treturn result, nil\n}"));
    }

    #[test]
    fn test_header_imports() {
        let all = blog();
        let models = Interpreter::new(&all).interpret(&all).models;
        let header = RecordRenderer::new("pb").header(&models).expect("header");

        assert!(header.contains("package pb"));
        assert!(header.contains(DBX_IMPORT));
        assert!(header.contains(CORE_IMPORT));
        assert!(header.contains(TYPES_IMPORT));
    }
}
