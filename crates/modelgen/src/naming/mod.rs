//! Naming conventions for classes, namespaces and model file paths.

use std::path::{Path, PathBuf};

use convert_case::{Case, Casing};

/// Extension of generated model files.
pub const MODEL_EXTENSION: &str = "php";

/// `user_roles` → `user_roles`, `UserRoles` → `user_roles`.
pub fn snake_case(s: &str) -> String {
    s.trim().to_case(Case::Snake)
}

/// `user_roles` → `userRoles`.
pub fn camel_case(s: &str) -> String {
    s.trim().to_case(Case::Camel)
}

/// `user_roles` → `UserRoles`.
pub fn pascal_case(s: &str) -> String {
    s.trim().to_case(Case::Pascal)
}

/// Class name for a table.
///
/// Underscores and spaces separate words; each word gets an uppercase first
/// letter and the rest of the word is kept as is (`user_roles` →
/// `UserRoles`, `api_URLs` → `ApiURLs`).
pub fn class_name(table: &str) -> String {
    table
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(upper_first)
        .collect()
}

/// Namespace for a connection's models: `{root}\{Connection}`.
pub fn namespace(root: &str, connection: &str) -> String {
    format!("{}\\{}", root.trim_end_matches('\\'), pascal_case(connection))
}

/// Path of the model file for a table.
///
/// `{root}[/{Connection}]/{ClassName}.php`
pub fn model_path(root: &Path, connection: &str, table: &str, sub_directory: bool) -> PathBuf {
    let mut path = root.to_path_buf();
    if sub_directory {
        path.push(pascal_case(connection));
    }
    path.push(format!("{}.{}", class_name(table), MODEL_EXTENSION));
    path
}

/// Last `\`-separated segment of a fully qualified class name.
pub fn short_class_name(qualified: &str) -> &str {
    qualified.rsplit('\\').next().unwrap_or(qualified)
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
