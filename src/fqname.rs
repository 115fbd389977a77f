//! Composite name grammar: `[namespace/][@field/]value`.

use crate::keys::NAME_EXACT;
use crate::namespace::split_namespace;
use crate::types::{CompositeName, FieldSet, NamespaceSet};

/// Serialize parts into the canonical composite form.
/// The field segment is omitted for the default field, the namespace segment when empty.
pub fn get_fqname(value: &str, field: &str, namespace: &str) -> String {
    let mut name = if field.is_empty() || field == NAME_EXACT {
        value.to_string()
    } else {
        format!("@{field}/{value}")
    };
    if !namespace.is_empty() {
        name = format!("{namespace}/{name}");
    }
    return name;
}

/// Detect a leading `@<field>/` marker.
///
/// Only registered field tokens count. `@unknown/Page` is a plain value and
/// comes back unchanged under the default field.
pub fn detect_field<'a>(fields: &FieldSet, input: &'a str) -> (String, &'a str) {
    let Some(rest) = input.strip_prefix('@') else {
        return (NAME_EXACT.to_string(), input);
    };

    let (head, tail) = rest.split_once('/').unwrap_or((rest, ""));
    if fields.contains(head) {
        return (head.to_string(), tail);
    }
    return (NAME_EXACT.to_string(), input);
}

/// Parse a local reference into its composite name.
///
/// ```text
/// ns1/ns2/@itemid/Page  -> (ns1/ns2, itemid, Page)
/// @revid/OtherPage      -> ("", revid, OtherPage)
/// ns1/Page              -> (ns1, name_exact, Page)
/// ns1/ns2/@notfield     -> (ns1/ns2, name_exact, @notfield)
/// ```
pub fn split_fqname(namespaces: &NamespaceSet, fields: &FieldSet, input: &str) -> CompositeName {
    if input.is_empty() {
        return CompositeName::new("", NAME_EXACT, "");
    }

    let (namespace, remainder) = split_namespace(namespaces, input);
    let (field, value) = detect_field(fields, remainder);
    return CompositeName {
        namespace,
        field,
        value: value.to_string(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespaces() -> NamespaceSet {
        return NamespaceSet::new(["ns1", "ns1/ns2"]);
    }

    fn parse(input: &str) -> CompositeName {
        return split_fqname(&namespaces(), &FieldSet::default(), input);
    }

    #[test]
    fn field_after_nested_namespace() {
        assert_eq!(parse("ns1/ns2/@itemid/Page"), CompositeName::new("ns1/ns2", "itemid", "Page"));
    }

    #[test]
    fn field_without_namespace() {
        assert_eq!(parse("@revid/OtherPage"), CompositeName::new("", "revid", "OtherPage"));
    }

    #[test]
    fn namespace_without_field() {
        assert_eq!(parse("ns1/Page"), CompositeName::new("ns1", NAME_EXACT, "Page"));
    }

    #[test]
    fn unregistered_field_is_literal() {
        assert_eq!(parse("ns1/ns2/@notfield"), CompositeName::new("ns1/ns2", NAME_EXACT, "@notfield"));
        assert_eq!(parse("@notfield/Page"), CompositeName::new("", NAME_EXACT, "@notfield/Page"));
    }

    #[test]
    fn field_without_value() {
        assert_eq!(parse("@itemid"), CompositeName::new("", "itemid", ""));
    }

    #[test]
    fn lone_at_sign_is_literal() {
        assert_eq!(detect_field(&FieldSet::default(), "@"), (NAME_EXACT.to_string(), "@"));
    }

    #[test]
    fn value_keeps_inner_separators() {
        assert_eq!(parse("ns1/Page/Sub/Leaf"), CompositeName::new("ns1", NAME_EXACT, "Page/Sub/Leaf"));
    }

    #[test]
    fn empty_input_is_default_name() {
        assert_eq!(parse(""), CompositeName::new("", NAME_EXACT, ""));
    }

    #[test]
    fn serialize_omits_defaults() {
        assert_eq!(get_fqname("Page", NAME_EXACT, ""), "Page");
        assert_eq!(get_fqname("Page", "", "ns1"), "ns1/Page");
        assert_eq!(get_fqname("Page", "itemid", "ns1/ns2"), "ns1/ns2/@itemid/Page");
    }

    #[test]
    fn parse_inverts_serialize() {
        let names = [
            CompositeName::new("", NAME_EXACT, "FrontPage"),
            CompositeName::new("ns1", NAME_EXACT, "Sub/Page"),
            CompositeName::new("ns1/ns2", "revid", "abc"),
            CompositeName::new("", "tags", "a b/c"),
            CompositeName::new("ns1", NAME_EXACT, "@notfield/x"),
        ];
        for name in names {
            assert_eq!(parse(&name.fullname()), name);
        }
    }
}
