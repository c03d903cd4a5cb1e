//! Mapping from raw engine column types to documentation types.

/// Map a raw column type to the type shown in a model's property docs.
///
/// Unknown types pass through unchanged.
pub fn doc_type(raw: &str) -> &str {
    match raw {
        // String types
        "varchar" | "longblob" | "longtext" | "datetime" | "date" | "text" => "string",

        // Integer types
        "tinyint" | "bigint" | "smallint" | "timestamp" => "int",

        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_types() {
        for raw in ["varchar", "longblob", "longtext", "datetime", "date", "text"] {
            assert_eq!(doc_type(raw), "string", "{}", raw);
        }
    }

    #[test]
    fn test_integer_types() {
        for raw in ["tinyint", "bigint", "smallint", "timestamp"] {
            assert_eq!(doc_type(raw), "int", "{}", raw);
        }
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(doc_type("int"), "int");
        assert_eq!(doc_type("decimal"), "decimal");
        assert_eq!(doc_type("json"), "json");
        assert_eq!(doc_type("char"), "char");
        // Matching is exact
        assert_eq!(doc_type("VARCHAR"), "VARCHAR");
    }
}
