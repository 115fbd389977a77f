//! Namespace prefix resolution for "/"-delimited references.

use crate::types::NamespaceSet;

/// Split a leading namespace off `input`.
///
/// Tokens are consumed left to right while the accumulated prefix
/// (`tok1`, `tok1/tok2`, ...) stays registered. The walk stops at the first
/// miss and never backtracks, so with only `ns1` registered,
/// `ns1/ns2/Page` yields (`ns1`, `ns2/Page`) even if `ns2` is registered too.
///
/// Returns the namespace (empty when nothing matched) and the remainder
/// with the namespace and one separator removed.
pub fn split_namespace<'a>(namespaces: &NamespaceSet, input: &'a str) -> (String, &'a str) {
    let mut namespace = String::new();

    for token in input.split('/') {
        let candidate = if namespace.is_empty() {
            token.to_string()
        } else {
            format!("{namespace}/{token}")
        };
        if !namespaces.contains(&candidate) {
            break;
        }
        namespace = candidate;
    }

    if namespace.is_empty() {
        return (namespace, input);
    }

    let skip = namespace.len().saturating_add(1);
    let remainder = input.get(skip..).unwrap_or("");
    return (namespace, remainder);
}
