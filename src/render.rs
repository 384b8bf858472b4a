//! Rendering a [`LocalizationModel`] into Rust source.
//!
//! The artifact is a pure function of its inputs. For a family `Texts` it
//! contains:
//!
//! * `trait TextsView` with one accessor per canonical key, plus `locale()`
//!   and `variants(key)`;
//! * one unit struct per realisation (`DefaultTexts` first, then one per
//!   accepted locale such as `FrCaTexts`) implementing the trait;
//! * `enum TextsLocale` naming the realisations, and `struct CurrentTexts`
//!   holding the selected one and notifying observers when it changes.
//!
//! Items are nested in one module per segment of the dotted namespace.

use std::collections::HashSet;

use lexicon_common::{KeyValueTable, Value};

use crate::merge::LocalizationModel;

const INDENT: &str = "    ";

/// Lints silenced on the outermost generated module.
const GENERATED_ALLOW: &str = "#[allow(dead_code, missing_docs, non_camel_case_types, non_snake_case, clippy::all, clippy::pedantic)]";

/// Accessor names the trait always defines.
const BUILTIN_ACCESSORS: [&str; 2] = ["locale", "variants"];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Inputs to [`render`].
#[derive(Clone, Copy, Debug)]
pub struct RenderRequest<'a> {
    /// Dotted namespace hint, e.g. `lexicon.generated`.
    pub namespace: &'a str,
    /// Family name.
    pub class_name: &'a str,
    /// Locale tag reported by the default realisation.
    pub invariant_tag: &'a str,
    /// Plural variant preferred for single-string accessors.
    pub plural_variant: &'a str,
    /// Merged translations.
    pub model: &'a LocalizationModel,
}

struct Realisation<'a> {
    type_name: String,
    variant: String,
    tag: &'a str,
    table: &'a KeyValueTable,
}

struct Names {
    view: String,
    locale_enum: String,
    change_enum: String,
    current: String,
}

impl Names {
    fn new(class_name: &str) -> Self {
        let base = type_identifier(class_name);
        Self {
            view: format!("{base}View"),
            locale_enum: format!("{base}Locale"),
            change_enum: format!("{base}Change"),
            current: format!("Current{base}"),
        }
    }
}

/// Renders the artifact text for one family.
///
/// # Examples
///
/// ```
/// use lexicon::merge::LocalizationModel;
/// use lexicon::render::{RenderRequest, render};
/// use lexicon_common::{KeyValueTable, Value};
///
/// let mut default = KeyValueTable::new();
/// default.try_insert("hello".into(), Value::plain("Hello")).unwrap();
/// let model = LocalizationModel::new(default);
///
/// let text = render(&RenderRequest {
///     namespace: "app.i18n",
///     class_name: "Texts",
///     invariant_tag: "und",
///     plural_variant: "other",
///     model: &model,
/// });
/// assert!(text.contains("pub trait TextsView"));
/// assert!(text.contains("fn hello(&self) -> &'static str"));
/// ```
#[must_use]
pub fn render(request: &RenderRequest<'_>) -> String {
    let names = Names::new(request.class_name);
    let keys: Vec<&str> = request.model.keys().collect();
    let accessors = accessor_names(&keys);
    let base = type_identifier(request.class_name);

    let mut realisations = vec![Realisation {
        type_name: format!("Default{base}"),
        variant: String::from("Default"),
        tag: request.invariant_tag,
        table: request.model.default_table(),
    }];
    realisations.extend(request.model.locales().map(|(tag, table)| {
        let variant = locale_variant(tag);
        Realisation {
            type_name: format!("{variant}{base}"),
            variant,
            tag,
            table,
        }
    }));

    let mut out = SourceWriter::default();
    out.line(&format!(
        "// @generated by lexicon from the `{}` localisation family. Do not edit.",
        request.class_name.escape_debug()
    ));
    out.line(&format!(
        "// Artifact: {}",
        artifact_id(request.namespace, request.class_name).escape_debug()
    ));
    out.blank();

    let modules = namespace_modules(request.namespace);
    for (depth, module) in modules.iter().enumerate() {
        if depth == 0 {
            out.line(GENERATED_ALLOW);
        }
        out.open(&format!("pub mod {module} {{"));
    }

    write_view_trait(&mut out, &names, request.class_name, &accessors);
    for realisation in &realisations {
        write_realisation(&mut out, &names, realisation, &keys, &accessors, request.plural_variant);
    }
    write_locale_enum(&mut out, &names, &realisations);
    write_runtime(&mut out, &names);

    for _ in &modules {
        out.close("}");
    }
    out.finish()
}

/// Identifier under which the host files the artifact.
#[must_use]
pub fn artifact_id(namespace: &str, class_name: &str) -> String {
    if namespace.is_empty() {
        class_name.to_owned()
    } else {
        format!("{namespace}.{class_name}")
    }
}

fn write_view_trait(out: &mut SourceWriter, names: &Names, class_name: &str, accessors: &[String]) {
    out.line(&format!(
        "/// Translations of the `{}` family.",
        class_name.escape_debug()
    ));
    out.open(&format!("pub trait {}: Send + Sync {{", names.view));
    out.line("/// Locale tag of this realisation.");
    out.line("fn locale(&self) -> &'static str;");
    out.blank();
    for accessor in accessors {
        out.line(&format!("fn {accessor}(&self) -> &'static str;"));
    }
    out.blank();
    out.line("/// Every plural variant of `key`, in source order, when it has any.");
    out.line("fn variants(&self, key: &str) -> Option<&'static [(&'static str, &'static str)]>;");
    out.close("}");
    out.blank();
}

fn write_realisation(
    out: &mut SourceWriter,
    names: &Names,
    realisation: &Realisation<'_>,
    keys: &[&str],
    accessors: &[String],
    plural_variant: &str,
) {
    out.line(&format!(
        "/// `{}` translations.",
        realisation.tag.escape_debug()
    ));
    out.line("#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]");
    out.line(&format!("pub struct {};", realisation.type_name));
    out.blank();
    out.open(&format!(
        "impl {} for {} {{",
        names.view, realisation.type_name
    ));
    out.line(&format!(
        "fn locale(&self) -> &'static str {{ {} }}",
        literal(realisation.tag)
    ));
    for (key, accessor) in keys.iter().zip(accessors) {
        let text = match realisation.table.get(key) {
            Some(Value::Plain(text)) => text.as_str(),
            Some(Value::Plural(plural)) => plural.select(plural_variant),
            None => "",
        };
        out.line(&format!(
            "fn {accessor}(&self) -> &'static str {{ {} }}",
            literal(text)
        ));
    }
    out.open("fn variants(&self, key: &str) -> Option<&'static [(&'static str, &'static str)]> {");
    out.open("match key {");
    for key in keys {
        if let Some(Value::Plural(plural)) = realisation.table.get(key) {
            let pairs: Vec<String> = plural
                .iter()
                .map(|(name, text)| format!("({}, {})", literal(name), literal(text)))
                .collect();
            out.line(&format!(
                "{} => Some(&[{}]),",
                literal(key),
                pairs.join(", ")
            ));
        }
    }
    out.line("_ => None,");
    out.close("}");
    out.close("}");
    out.close("}");
    out.blank();
}

fn write_locale_enum(out: &mut SourceWriter, names: &Names, realisations: &[Realisation<'_>]) {
    let enum_name = &names.locale_enum;
    out.line("/// The available realisations; `Default` comes first.");
    out.line("#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]");
    out.open(&format!("pub enum {enum_name} {{"));
    for realisation in realisations {
        out.line(&format!("{},", realisation.variant));
    }
    out.close("}");
    out.blank();

    out.open(&format!("impl {enum_name} {{"));
    let all: Vec<String> = realisations
        .iter()
        .map(|realisation| format!("Self::{}", realisation.variant))
        .collect();
    out.line("/// Every realisation in presentation order.");
    out.line(&format!(
        "pub const ALL: [Self; {}] = [{}];",
        realisations.len(),
        all.join(", ")
    ));
    out.blank();
    out.line("/// Locale tag of the realisation.");
    out.open("pub const fn tag(self) -> &'static str {");
    out.open("match self {");
    for realisation in realisations {
        out.line(&format!(
            "Self::{} => {},",
            realisation.variant,
            literal(realisation.tag)
        ));
    }
    out.close("}");
    out.close("}");
    out.blank();
    out.line("/// Translations of the realisation.");
    out.open(&format!("pub fn view(self) -> &'static dyn {} {{", names.view));
    out.open("match self {");
    for realisation in realisations {
        out.line(&format!(
            "Self::{} => &{},",
            realisation.variant, realisation.type_name
        ));
    }
    out.close("}");
    out.close("}");
    out.close("}");
    out.blank();
}

fn write_runtime(out: &mut SourceWriter, names: &Names) {
    let Names {
        view,
        locale_enum,
        change_enum,
        current,
    } = names;

    out.line("/// Property reported to observers after the selection changes.");
    out.line("#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]");
    out.open(&format!("pub enum {change_enum} {{"));
    out.line("/// The selected realisation changed.");
    out.line("CurrentOption,");
    out.line("/// The active translations changed.");
    out.line(&format!("{current},"));
    out.close("}");
    out.blank();

    out.line("/// Holds the selected realisation and notifies observers on change.");
    out.open(&format!("pub struct {current} {{"));
    out.line(&format!("option: {locale_enum},"));
    out.line(&format!(
        "observers: Vec<Box<dyn FnMut({change_enum}) + Send>>,"
    ));
    out.close("}");
    out.blank();

    out.open(&format!("impl {current} {{"));
    out.line("/// Starts with the default realisation selected.");
    out.open("pub fn new() -> Self {");
    out.line(&format!(
        "Self {{ option: {locale_enum}::ALL[0], observers: Vec::new() }}"
    ));
    out.close("}");
    out.blank();
    out.line("/// The selected realisation.");
    out.open(&format!("pub fn current_option(&self) -> {locale_enum} {{"));
    out.line("self.option");
    out.close("}");
    out.blank();
    out.line("/// Translations of the selected realisation.");
    out.open(&format!("pub fn current(&self) -> &'static dyn {view} {{"));
    out.line("self.option.view()");
    out.close("}");
    out.blank();
    out.line("/// Every realisation that can be selected.");
    out.open(&format!(
        "pub fn available_options(&self) -> &'static [{locale_enum}] {{"
    ));
    out.line(&format!("&{locale_enum}::ALL"));
    out.close("}");
    out.blank();
    out.line("/// Selects `option`; returns whether the selection changed.");
    out.open(&format!(
        "pub fn set_current_option(&mut self, option: {locale_enum}) -> bool {{"
    ));
    out.open("if self.option == option {");
    out.line("return false;");
    out.close("}");
    out.line("self.option = option;");
    out.line(&format!(
        "self.notify({change_enum}::CurrentOption);"
    ));
    out.line(&format!(
        "self.notify({change_enum}::{current});"
    ));
    out.line("true");
    out.close("}");
    out.blank();
    out.line("/// Registers `observer` for change notifications.");
    out.line("pub fn subscribe<F>(&mut self, observer: F)");
    out.line("where");
    out.line(&format!("{INDENT}F: FnMut({change_enum}) + Send + 'static,"));
    out.open("{");
    out.line("self.observers.push(Box::new(observer));");
    out.close("}");
    out.blank();
    out.open(&format!("fn notify(&mut self, change: {change_enum}) {{"));
    out.open("for observer in &mut self.observers {");
    out.line("observer(change);");
    out.close("}");
    out.close("}");
    out.close("}");
    out.blank();

    out.open(&format!("impl Default for {current} {{"));
    out.open("fn default() -> Self {");
    out.line("Self::new()");
    out.close("}");
    out.close("}");
}

/// Derives unique accessor method names for `keys`, in order.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, a leading digit gains a
/// `_` prefix, keywords gain a `_` suffix, and later clashes (including
/// with `locale` and `variants`) gain a numeric suffix.
#[must_use]
pub fn accessor_names(keys: &[&str]) -> Vec<String> {
    let mut taken: HashSet<String> = BUILTIN_ACCESSORS.iter().map(|name| (*name).to_owned()).collect();
    keys.iter()
        .map(|key| {
            let base = method_identifier(key);
            let mut candidate = base.clone();
            let mut counter = 1_usize;
            while taken.contains(&candidate) {
                counter += 1;
                candidate = format!("{base}_{counter}");
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// Enum variant (and type name prefix) for a locale tag, e.g. `fr-CA` →
/// `FrCa`.
#[must_use]
pub fn locale_variant(tag: &str) -> String {
    let mut variant = String::new();
    for part in tag.split(['-', '_']).filter(|part| !part.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            variant.extend(first.to_uppercase());
            variant.extend(chars.flat_map(char::to_lowercase));
        }
    }
    let sanitised = sanitise(&variant);
    if sanitised.starts_with(|first: char| first.is_ascii_digit()) || sanitised.is_empty() {
        format!("L{sanitised}")
    } else {
        sanitised
    }
}

fn method_identifier(key: &str) -> String {
    let mut identifier = sanitise(key);
    if identifier.starts_with(|first: char| first.is_ascii_digit()) {
        identifier.insert(0, '_');
    }
    if identifier.is_empty() || identifier == "_" {
        return String::from("key_");
    }
    if KEYWORDS.contains(&identifier.as_str()) {
        identifier.push('_');
    }
    identifier
}

fn type_identifier(class_name: &str) -> String {
    let sanitised = sanitise(class_name);
    let mut chars = sanitised.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            let mut identifier: String = first.to_uppercase().collect();
            identifier.push_str(chars.as_str());
            identifier
        }
        _ => format!("L{sanitised}"),
    }
}

fn namespace_modules(namespace: &str) -> Vec<String> {
    namespace
        .split('.')
        .filter(|segment| !segment.trim().is_empty())
        .map(method_identifier)
        .collect()
}

fn sanitise(raw: &str) -> String {
    raw.chars()
        .map(|character| {
            if character.is_ascii_alphanumeric() || character == '_' {
                character
            } else {
                '_'
            }
        })
        .collect()
}

/// Rust string literal for `text`.
fn literal(text: &str) -> String {
    format!("{text:?}")
}

#[derive(Default)]
struct SourceWriter {
    buffer: String,
    depth: usize,
}

impl SourceWriter {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn blank(&mut self) {
        self.buffer.push('\n');
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    fn finish(mut self) -> String {
        while self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
        self.buffer
    }
}
