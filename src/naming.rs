//! Names: naming context for classes, case conversion for identifiers, and a
//! best-effort English singularizer for array element classes.
use convert_case::{Case, Casing};
use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not a letter or digit separates words.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid regex"));

/// Class names that would shadow a built-in type in at least one target.
const RESERVED_CLASS_NAMES: &[&str] = &[
    "Any", "Array", "Bool", "Boolean", "Byte", "Char", "Class", "Date", "Decimal", "Dict",
    "Dictionary", "Double", "Enum", "Error", "Float", "Int", "Integer", "List", "Long", "Map",
    "Nothing", "Number", "Object", "Optional", "Protocol", "Record", "Self", "Set", "Short",
    "String", "Tuple", "Type", "Unit", "Void",
];

/// Where an object sits, used to derive its class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingContext {
    hint: String,
    plural: bool,
}

impl NamingContext {
    pub fn root(name: &str) -> Self {
        Self { hint: name.to_string(), plural: false }
    }

    /// Object held directly by field `key`.
    pub fn field(key: &str) -> Self {
        Self { hint: key.to_string(), plural: false }
    }

    /// Objects held by the array at this position.
    pub fn elements(&self) -> Self {
        Self { hint: self.hint.clone(), plural: true }
    }

    /// Provisional class name; the registry suffixes it on collision.
    pub fn class_name(&self) -> String {
        let base = pascal_case(&self.hint);
        let base = if self.plural { singularize(&base) } else { base };
        valid_class_name(base)
    }
}

fn words(raw: &str) -> String {
    NON_WORD.replace_all(raw, " ").trim().to_string()
}

pub fn pascal_case(raw: &str) -> String {
    words(raw).to_case(Case::Pascal)
}

pub fn camel_case(raw: &str) -> String {
    words(raw).to_case(Case::Camel)
}

pub fn snake_case(raw: &str) -> String {
    words(raw).to_case(Case::Snake)
}

/// Make a converted key usable as an identifier: never empty, never starting
/// with a digit.
pub fn identifier(converted: String) -> String {
    match converted.chars().next() {
        None => "field".to_string(),
        Some(c) if c.is_numeric() => format!("_{converted}"),
        Some(_) => converted,
    }
}

fn valid_class_name(name: String) -> String {
    match name.chars().next() {
        None => "Model".to_string(),
        Some(c) if c.is_numeric() => format!("Model{name}"),
        Some(_) if RESERVED_CLASS_NAMES.contains(&name.as_str()) => format!("{name}Model"),
        Some(_) => name,
    }
}

/// Best-effort English singular of the last word of a PascalCase name.
/// Non-ASCII names pass through untouched.
pub fn singularize(word: &str) -> String {
    const IRREGULAR: &[(&str, &str)] = &[
        ("people", "person"),
        ("children", "child"),
        ("women", "woman"),
        ("men", "man"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("teeth", "tooth"),
        ("feet", "foot"),
    ];
    const UNCHANGED: &[&str] = &["ss", "us", "is", "series", "species", "news"];
    const IES_PLAIN: &[&str] = &["movies", "cookies", "zombies", "ties", "pies"];
    const ES_SUFFIXES: &[&str] = &["sses", "xes", "ches", "shes", "zzes"];

    if !word.is_ascii() {
        return word.to_string();
    }
    let lower = word.to_ascii_lowercase();

    let out = if let Some((plural, single)) = IRREGULAR.iter().find(|(p, _)| lower.ends_with(p)) {
        replace_tail(word, plural.len(), single)
    } else if UNCHANGED.iter().any(|s| lower.ends_with(s)) {
        word.to_string()
    } else if lower.ends_with("ies") && !IES_PLAIN.iter().any(|s| lower.ends_with(s)) && word.len() > 4 {
        replace_tail(word, 3, "y")
    } else if ES_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        word[..word.len() - 2].to_string()
    } else if lower.ends_with('s') {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    };

    if out.is_empty() { word.to_string() } else { out }
}

// Swap the last `n` bytes for `replacement`, keeping the case of the first replaced char.
fn replace_tail(word: &str, n: usize, replacement: &str) -> String {
    let cut = word.len() - n;
    let upper = word[cut..].starts_with(|c: char| c.is_ascii_uppercase());
    let mut out = word[..cut].to_string();
    if upper {
        let mut chars = replacement.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    } else {
        out.push_str(replacement);
    }
    out
}
