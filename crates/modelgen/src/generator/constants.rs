//! Named constants derived from the rows of lookup tables.

use indexmap::IndexMap;
use tracing::debug;

use crate::config::ConstantSpec;
use crate::core::schema::LookupRow;
use crate::core::traits::SchemaDriver;
use crate::error::{GenerateError, Result};

/// Replacements applied before any configured ones.
pub const STANDARD_REPLACE: [(&str, &str); 3] = [("Æ", "AE"), ("Ø", "OE"), ("Å", "AA")];

/// Characters that become `_` in constant names.
const SEPARATORS: [char; 16] = [
    '-', '.', ',', ';', ':', ' ', '?', '\'', '"', '#', '%', '&', '/', '\\', '(', ')',
];

/// Read a lookup table and build its constants.
///
/// Returns an empty map when no spec is configured or the table is empty.
pub async fn extract<D>(
    driver: &D,
    table: &str,
    spec: Option<&ConstantSpec>,
    replace: &IndexMap<String, String>,
) -> Result<IndexMap<String, String>>
where
    D: SchemaDriver + ?Sized,
{
    let Some(spec) = spec else {
        return Ok(IndexMap::new());
    };

    let (id_field, _) = required_fields(table, spec)?;
    let order_by = (!id_field.is_empty()).then_some(id_field);

    let rows = driver.read_rows(table, order_by).await?;
    debug!("{}: {} lookup rows", table, rows.len());

    constants_from_rows(table, spec, &rows, replace)
}

/// Build constants from already fetched rows.
///
/// If any id value is non-numeric every value is quoted, otherwise none
/// is. Rows producing the same name overwrite earlier ones in place.
/// A NULL name in the first row is a `MissingField`; later rows with a
/// NULL name are skipped.
pub fn constants_from_rows(
    table: &str,
    spec: &ConstantSpec,
    rows: &[LookupRow],
    replace: &IndexMap<String, String>,
) -> Result<IndexMap<String, String>> {
    let (id_field, name_field) = required_fields(table, spec)?;

    let Some(first) = rows.first() else {
        return Ok(IndexMap::new());
    };
    for field in [id_field, name_field] {
        if !first.contains_key(field) {
            return Err(GenerateError::missing_field(table, field));
        }
    }
    if matches!(first.get(name_field), Some(None)) {
        return Err(GenerateError::missing_field(table, name_field));
    }

    let quote = rows.iter().any(|row| {
        matches!(row.get(id_field), Some(Some(value)) if !is_numeric(value))
    });

    let replacements = merged_replacements(replace, &spec.replace);
    let prefix = spec.prefix.as_deref().unwrap_or("");
    let suffix = spec.suffix.as_deref().unwrap_or("");

    let mut constants = IndexMap::with_capacity(rows.len());
    for row in rows {
        let Some(Some(raw_name)) = row.get(name_field) else {
            debug!("{}: skipping lookup row with NULL {}", table, name_field);
            continue;
        };
        let name = format!("{}{}{}", prefix, constant_name(raw_name, &replacements), suffix);
        let value = literal(row.get(id_field).and_then(Option::as_deref), quote);
        constants.insert(name, value);
    }

    Ok(constants)
}

/// Uppercase a value and fold separators and special letters.
pub fn constant_name(value: &str, replacements: &IndexMap<String, String>) -> String {
    let mut name: String = value
        .to_uppercase()
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { '_' } else { c })
        .collect();

    for (from, to) in replacements {
        name = name.replace(&from.to_uppercase(), &to.to_uppercase());
    }

    name
}

/// Standard replacements, then the global map, then the table's map.
pub fn merged_replacements(
    global: &IndexMap<String, String>,
    table: &IndexMap<String, String>,
) -> IndexMap<String, String> {
    let mut merged: IndexMap<String, String> = STANDARD_REPLACE
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();
    merged.extend(global.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged.extend(table.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Decimal number check: optional sign, digits with an optional fraction,
/// optional exponent. Surrounding whitespace is allowed.
pub fn is_numeric(value: &str) -> bool {
    let s = value.trim();
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);

    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn literal(value: Option<&str>, quote: bool) -> String {
    match value {
        None => "null".to_string(),
        Some(v) if quote => format!("'{}'", v.replace('\\', "\\\\").replace('\'', "\\'")),
        Some(v) => v.to_string(),
    }
}

fn required_fields<'a>(table: &str, spec: &'a ConstantSpec) -> Result<(&'a str, &'a str)> {
    let id = spec
        .id
        .as_deref()
        .ok_or_else(|| GenerateError::missing_field(table, "id"))?;
    let name = spec
        .name
        .as_deref()
        .ok_or_else(|| GenerateError::missing_field(table, "name"))?;
    Ok((id, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: Option<&str>, name: &str) -> LookupRow {
        let mut row = LookupRow::new();
        row.insert("id".into(), id.map(str::to_string));
        row.insert("role_name".into(), Some(name.to_string()));
        row
    }

    fn spec() -> ConstantSpec {
        ConstantSpec::new("id", "role_name")
    }

    fn no_replace() -> IndexMap<String, String> {
        IndexMap::new()
    }

    #[test]
    fn test_numeric_ids_unquoted() {
        let rows = vec![row(Some("1"), "admin"), row(Some("2"), "editor"), row(Some("3"), "viewer")];
        let constants = constants_from_rows("user_roles", &spec(), &rows, &no_replace()).unwrap();
        assert_eq!(
            constants.into_iter().collect::<Vec<_>>(),
            vec![
                ("ADMIN".to_string(), "1".to_string()),
                ("EDITOR".to_string(), "2".to_string()),
                ("VIEWER".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_any_non_numeric_id_quotes_all() {
        let rows = vec![row(Some("a1"), "first"), row(Some("2"), "second")];
        let constants = constants_from_rows("codes", &spec(), &rows, &no_replace()).unwrap();
        assert_eq!(constants["FIRST"], "'a1'");
        assert_eq!(constants["SECOND"], "'2'");
    }

    #[test]
    fn test_null_id_renders_null() {
        let rows = vec![row(None, "unset"), row(Some("2"), "two")];
        let constants = constants_from_rows("codes", &spec(), &rows, &no_replace()).unwrap();
        assert_eq!(constants["UNSET"], "null");
        assert_eq!(constants["TWO"], "2");
    }

    #[test]
    fn test_name_derivation() {
        let replacements = merged_replacements(&no_replace(), &no_replace());
        assert_eq!(constant_name("super-user (old)", &replacements), "SUPER_USER__OLD_");
        assert_eq!(constant_name("a.b,c;d:e?f'g\"h#i%j&k/l\\m", &replacements), "A_B_C_D_E_F_G_H_I_J_K_L_M");
        assert_eq!(constant_name("blåbær", &replacements), "BLAABAER");
        assert_eq!(constant_name("Øst", &replacements), "OEST");
    }

    #[test]
    fn test_replacement_precedence() {
        let mut global = IndexMap::new();
        global.insert("Ø".to_string(), "o".to_string());
        let mut table = IndexMap::new();
        table.insert("+".to_string(), "plus".to_string());
        let replacements = merged_replacements(&global, &table);
        assert_eq!(constant_name("Søn+", &replacements), "SONPLUS");
        // overriding a standard entry keeps its position
        assert_eq!(replacements.get_index_of("Ø"), Some(1));
    }

    #[test]
    fn test_prefix_and_suffix() {
        let mut spec = spec();
        spec.prefix = Some("ROLE_".into());
        spec.suffix = Some("_ID".into());
        let rows = vec![row(Some("1"), "admin")];
        let constants = constants_from_rows("user_roles", &spec, &rows, &no_replace()).unwrap();
        assert_eq!(constants["ROLE_ADMIN_ID"], "1");
    }

    #[test]
    fn test_collision_last_row_wins() {
        let rows = vec![row(Some("1"), "admin"), row(Some("2"), "editor"), row(Some("3"), "Admin")];
        let constants = constants_from_rows("user_roles", &spec(), &rows, &no_replace()).unwrap();
        assert_eq!(constants.len(), 2);
        assert_eq!(constants.get_index(0), Some((&"ADMIN".to_string(), &"3".to_string())));
    }

    #[test]
    fn test_empty_rows() {
        let constants = constants_from_rows("user_roles", &spec(), &[], &no_replace()).unwrap();
        assert!(constants.is_empty());
    }

    #[test]
    fn test_spec_missing_fields() {
        let spec = ConstantSpec {
            name: Some("role_name".into()),
            ..ConstantSpec::default()
        };
        let err = constants_from_rows("user_roles", &spec, &[], &no_replace()).unwrap_err();
        assert!(matches!(err, GenerateError::MissingField { ref field, .. } if field == "id"));

        let spec = ConstantSpec {
            id: Some("id".into()),
            ..ConstantSpec::default()
        };
        let err = constants_from_rows("user_roles", &spec, &[], &no_replace()).unwrap_err();
        assert!(matches!(err, GenerateError::MissingField { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_row_missing_fields() {
        let spec = ConstantSpec::new("code", "role_name");
        let rows = vec![row(Some("1"), "admin")];
        let err = constants_from_rows("user_roles", &spec, &rows, &no_replace()).unwrap_err();
        assert!(matches!(err, GenerateError::MissingField { ref field, .. } if field == "code"));

        let spec = ConstantSpec::new("id", "label");
        let err = constants_from_rows("user_roles", &spec, &rows, &no_replace()).unwrap_err();
        assert!(matches!(err, GenerateError::MissingField { ref field, .. } if field == "label"));
    }

    #[test]
    fn test_null_name_in_first_row_is_missing_field() {
        let mut first = row(Some("1"), "");
        first.insert("role_name".into(), None);
        let rows = vec![first, row(Some("2"), "editor")];
        let err = constants_from_rows("user_roles", &spec(), &rows, &no_replace()).unwrap_err();
        assert!(matches!(err, GenerateError::MissingField { ref field, .. } if field == "role_name"));
    }

    #[test]
    fn test_null_name_in_later_row_is_skipped() {
        let mut nameless = row(Some("2"), "");
        nameless.insert("role_name".into(), None);
        let rows = vec![row(Some("1"), "admin"), nameless, row(Some("3"), "viewer")];
        let constants = constants_from_rows("user_roles", &spec(), &rows, &no_replace()).unwrap();
        assert_eq!(constants.len(), 2);
        assert_eq!(constants["ADMIN"], "1");
        assert_eq!(constants["VIEWER"], "3");
        assert!(!constants.contains_key(""));
    }

    #[test]
    fn test_quoted_values_escaped() {
        let rows = vec![row(Some("it's"), "apostrophe")];
        let constants = constants_from_rows("codes", &spec(), &rows, &no_replace()).unwrap();
        assert_eq!(constants["APOSTROPHE"], "'it\\'s'");
    }

    #[test]
    fn test_is_numeric() {
        for v in ["1", "-2", "+3", "1.5", ".5", "5.", "1e3", "1E-3", " 42 "] {
            assert!(is_numeric(v), "{}", v);
        }
        for v in ["", "a1", "1a", "0x1A", "1e", "e3", ".", "-", "1.2.3", "inf", "NaN"] {
            assert!(!is_numeric(v), "{}", v);
        }
    }
}
