//! Stub template rendering.
//!
//! Templates contain `{{name}}` tokens. Every formatting decision for the
//! generated model (indentation, list layout, declaration lines) is made
//! here and handed to [`render`] as a binding map.

use indexmap::IndexMap;

use super::preserved::{import_name, PreservedContent, Sentinel};
use super::Artifact;
use crate::core::schema::{ColumnInfo, TableProperties};
use crate::naming;
use crate::typemap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Values substituted for template tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: IndexMap<String, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a token name to a value, replacing any earlier binding.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

}

/// Substitute every `{{name}}` token in a single pass.
///
/// Tokens with no binding become the empty string. Bound values are
/// copied as is and never scanned for tokens. Brace pairs that do not
/// enclose a plain identifier are left untouched.
pub fn render(template: &str, bindings: &Bindings) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        match after_open.find(CLOSE) {
            Some(end) if is_token_name(&after_open[..end]) => {
                out.push_str(bindings.get(&after_open[..end]).unwrap_or(""));
                rest = &after_open[end + CLOSE.len()..];
            }
            _ => {
                out.push_str(OPEN);
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_token_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Everything needed to render one model besides the settings.
#[derive(Debug, Clone)]
pub struct ModelContext<'a> {
    pub connection: &'a str,
    pub namespace: &'a str,
    pub table: &'a str,
    pub extends: &'a str,
    pub uses: &'a [String],
    pub indent: &'a str,
    pub properties: &'a TableProperties,
    pub constants: &'a IndexMap<String, String>,
    pub preserved: &'a PreservedContent,
    pub sentinel: &'a Sentinel,
}

/// Render a model, or skip when the table has nothing fillable.
pub fn render_model(template: &str, ctx: &ModelContext<'_>) -> Artifact {
    if ctx.properties.is_empty() {
        return Artifact::Skipped;
    }
    Artifact::Rendered(render(template, &model_bindings(ctx)))
}

/// Build the full binding set for a model.
pub fn model_bindings(ctx: &ModelContext<'_>) -> Bindings {
    let indent = ctx.indent;
    let props = ctx.properties;

    let mut bindings = Bindings::new();
    bindings
        .set("namespace", ctx.namespace)
        .set("uses", render_uses(ctx.uses, ctx.extends, &ctx.preserved.uses))
        .set("class", naming::class_name(ctx.table))
        .set("shortNameExtends", naming::short_class_name(import_name(ctx.extends)))
        .set("properties", render_properties(&props.fillable_columns))
        .set("constants", render_constants(ctx.constants, indent))
        .set(
            "connection",
            declaration(indent, "protected $connection", &quoted(ctx.connection)),
        )
        .set("table", declaration(indent, "protected $table", &quoted(ctx.table)))
        .set(
            "primaryKey",
            props
                .primary_key
                .as_deref()
                .map(|pk| declaration(indent, "protected $primaryKey", &quoted(pk)))
                .unwrap_or_default(),
        )
        .set(
            "timestamps",
            declaration(indent, "public $timestamps", if props.timestamps { "true" } else { "false" }),
        )
        .set(
            "fillable",
            declaration(indent, "protected $fillable", &render_list(&props.fillable, indent)),
        )
        .set(
            "guarded",
            declaration(indent, "protected $guarded", &render_list(&props.guarded, indent)),
        )
        .set("preserved", render_preserved(ctx.sentinel, &ctx.preserved.lines, indent));
    bindings
}

/// `{indent}{lhs} = {value};` followed by a blank line.
fn declaration(indent: &str, lhs: &str, value: &str) -> String {
    format!("{}{} = {};\n\n", indent, lhs, value)
}

fn quoted(value: &str) -> String {
    format!("'{}'", value)
}

/// List literal with one element per line.
///
/// ```text
/// [
///         'a',
///         'b'
///     ]
/// ```
pub fn render_list(items: &[String], indent: &str) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    let item_indent = indent.repeat(2);
    let body = items
        .iter()
        .map(|item| format!("{}'{}'", item_indent, item))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("[\n{}\n{}]", body, indent)
}

/// Constants block with a trailing blank line, or empty.
pub fn render_constants(constants: &IndexMap<String, String>, indent: &str) -> String {
    if constants.is_empty() {
        return String::new();
    }
    let mut block = format!("{}// Constants.\n", indent);
    for (name, value) in constants {
        block.push_str(&format!("{}const {} = {};\n", indent, name, value));
    }
    block.push('\n');
    block
}

/// Docblock `@property` lines for the fillable columns.
pub fn render_properties(columns: &[ColumnInfo]) -> String {
    columns
        .iter()
        .map(|column| {
            format!(
                " * @property {} {}. [TYPE={}, NULLABLE={}, DEFAULT=\"{}\"]",
                typemap::doc_type(&column.data_type),
                column.name,
                column.column_type.to_uppercase(),
                u8::from(column.is_nullable),
                column.default.as_deref().unwrap_or(""),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `use` lines: configured imports, the base class, then preserved
/// imports. The first occurrence of each target wins.
///
/// Every entry is reduced to its bare target first, so `App\Foo;` and
/// `use App\Foo` both render as `use App\Foo;`.
pub fn render_uses(configured: &[String], extends: &str, preserved: &[String]) -> String {
    let mut targets: Vec<&str> = Vec::new();
    let all = configured
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(extends))
        .chain(preserved.iter().map(String::as_str))
        .map(import_name);

    for target in all {
        if !target.is_empty() && !targets.contains(&target) {
            targets.push(target);
        }
    }

    targets
        .iter()
        .map(|target| format!("use {};", target))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The indented sentinel followed by the preserved lines.
pub fn render_preserved(sentinel: &Sentinel, lines: &[String], indent: &str) -> String {
    let mut block = format!("{}{}", indent, sentinel.marker());
    if !lines.is_empty() {
        block.push('\n');
        block.push_str(&lines.join("\n"));
    }
    block
}
