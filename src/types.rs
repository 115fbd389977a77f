//! Core domain types for wikiref: registered name sets and parsed references.
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::fqname::get_fqname;
use crate::keys::{DEFAULT_FIELDS, NAME_EXACT, NAMESPACE};

/// Registered namespace names. A name may itself contain "/" (`ns1/ns2`)
/// and is then distinct from its first segment.
#[derive(Debug, Clone, Default)]
pub struct NamespaceSet(HashSet<String>);

impl NamespaceSet {
    /// Build a set from configured names, dropping trailing "/" from each name.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = names
            .into_iter()
            .map(|n| return n.as_ref().trim_end_matches('/').to_string())
            .collect();
        return Self(set);
    }

    /// Whether `name` is registered verbatim.
    pub fn contains(&self, name: &str) -> bool {
        return self.0.contains(name);
    }

    /// Registered names in ascending order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.iter().map(String::as_str).collect();
        names.sort_unstable();
        return names;
    }
}

/// Reserved field tokens recognized after a leading "@".
/// `name_exact` is always a member.
#[derive(Debug, Clone)]
pub struct FieldSet(HashSet<String>);

impl FieldSet {
    /// Build a set from configured tokens; `name_exact` is added if missing.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: HashSet<String> = fields.into_iter().map(|f| return f.as_ref().to_string()).collect();
        set.insert(NAME_EXACT.to_string());
        return Self(set);
    }

    /// Whether `token` is a registered field.
    pub fn contains(&self, token: &str) -> bool {
        return self.0.contains(token);
    }

    /// Registered tokens in ascending order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.0.iter().map(String::as_str).collect();
        fields.sort_unstable();
        return fields;
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        return Self::new(DEFAULT_FIELDS);
    }
}

/// A parsed local reference: `[namespace/][@field/]value`.
///
/// Serializes as the split projection `{namespace, field, item_name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeName {
    /// Lookup mode; `name_exact` (or empty) means lookup by name.
    pub field: String,
    /// Registered namespace, or empty for the default namespace.
    pub namespace: String,
    /// Unescaped remainder of the reference; may contain "/".
    #[serde(rename = "item_name")]
    pub value: String,
}

impl CompositeName {
    /// Build a composite name from its parts.
    pub fn new(namespace: &str, field: &str, value: &str) -> Self {
        return Self {
            namespace: namespace.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        };
    }

    /// The file name offered when the item is downloaded.
    pub fn download_file_name(&self) -> String {
        if self.field == NAME_EXACT {
            return self.value.clone();
        }
        return format!("{}-{}", self.field, self.value);
    }

    /// Canonical string form, omitting default field and empty namespace.
    pub fn fullname(&self) -> String {
        return get_fqname(&self.value, &self.field, &self.namespace);
    }

    /// Index lookup keys: the namespace plus the field (or `name_exact`) bound to the value.
    pub fn query(&self) -> BTreeMap<String, String> {
        let field = if self.field.is_empty() { NAME_EXACT } else { self.field.as_str() };
        let mut query = BTreeMap::new();
        query.insert(NAMESPACE.to_string(), self.namespace.clone());
        query.insert(field.to_string(), self.value.clone());
        return query;
    }

    /// The root item of this name's namespace, or `default_root` when the
    /// namespace has no entry in `root_mapping`.
    pub fn root_fqname(&self, root_mapping: &HashMap<String, String>, default_root: &str) -> Self {
        let root = root_mapping.get(&self.namespace).map_or(default_root, String::as_str);
        return Self::new(&self.namespace, NAME_EXACT, root);
    }
}

impl fmt::Display for CompositeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.fullname());
    }
}

/// A reference that may name another wiki: `<wiki>/<composite>`.
/// `wiki_name` is `Self` when the reference stays local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterwikiRef {
    /// The composite name within the target wiki.
    #[serde(flatten)]
    pub fqname: CompositeName,
    /// Interwiki map key, or `Self`.
    pub wiki_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_set_strips_trailing_separator() {
        let set = NamespaceSet::new(["users/", "ns1/ns2/", "help"]);
        assert!(set.contains("users"));
        assert!(set.contains("ns1/ns2"));
        assert!(!set.contains("ns1"));
        assert_eq!(set.sorted(), vec!["help", "ns1/ns2", "users"]);
    }

    #[test]
    fn namespace_set_strips_repeated_separators() {
        let set = NamespaceSet::new(["ns//", "a/b///"]);
        assert!(set.contains("ns"));
        assert!(!set.contains("ns/"));
        assert!(set.contains("a/b"));
    }

    #[test]
    fn field_set_always_has_default_field() {
        let set = FieldSet::new(["itemid"]);
        assert!(set.contains(NAME_EXACT));
        assert!(set.contains("itemid"));
        assert!(!set.contains("revid"));
    }

    #[test]
    fn download_name_prefixes_non_default_field() {
        assert_eq!(CompositeName::new("", NAME_EXACT, "Foo.png").download_file_name(), "Foo.png");
        assert_eq!(CompositeName::new("ns", "itemid", "abc123").download_file_name(), "itemid-abc123");
    }

    #[test]
    fn query_uses_field_or_name_exact_key() {
        let query = CompositeName::new("ns1", "revid", "42").query();
        assert_eq!(query.get("namespace").map(String::as_str), Some("ns1"));
        assert_eq!(query.get("revid").map(String::as_str), Some("42"));

        let query = CompositeName::new("", "", "Page").query();
        assert_eq!(query.get("name_exact").map(String::as_str), Some("Page"));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn root_falls_back_to_default_root() {
        let mut mapping = HashMap::new();
        mapping.insert("users".to_string(), "UserHome".to_string());

        let root = CompositeName::new("users", "itemid", "x").root_fqname(&mapping, "Home");
        assert_eq!(root, CompositeName::new("users", NAME_EXACT, "UserHome"));

        let root = CompositeName::new("help", NAME_EXACT, "Intro").root_fqname(&mapping, "Home");
        assert_eq!(root, CompositeName::new("help", NAME_EXACT, "Home"));
    }

    #[test]
    fn display_is_canonical_form() {
        let name = CompositeName::new("ns1/ns2", "itemid", "Page/Sub");
        assert_eq!(name.to_string(), "ns1/ns2/@itemid/Page/Sub");
    }

    #[test]
    fn split_projection_serializes_item_name() {
        let json = serde_json::to_value(CompositeName::new("ns", NAME_EXACT, "Page")).unwrap();
        assert_eq!(json["namespace"], "ns");
        assert_eq!(json["field"], "name_exact");
        assert_eq!(json["item_name"], "Page");
    }
}
