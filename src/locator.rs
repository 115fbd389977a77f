//! Locator composition: local routes, interwiki template substitution, and
//! the fallback path for wikis missing from the map.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::fqname::get_fqname;
use crate::intermap::InterwikiMap;
use crate::interwiki::is_local_wiki;
use crate::keys::{ACTION_SEPARATOR, CURRENT, NAME_EXACT};
use crate::router::{Endpoint, Router};
use crate::types::InterwikiRef;

/// Characters left literal when quoting for remote wikis: unreserved marks and "/".
pub const PATH_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Template placeholder for the quoted item value.
const PAGE: &str = "$PAGE";
/// Template placeholder for the quoted namespace.
const NAMESPACE: &str = "$NAMESPACE";
/// Template placeholder for the quoted field.
const FIELD: &str = "$FIELD";

/// How a locator should be built. The default is "latest revision, plain view, relative".
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkOptions<'a> {
    /// View to link to.
    pub endpoint: Endpoint,
    /// Ask the local router for a fully qualified URL.
    pub external: bool,
    /// Search pattern appended as `?regex=`.
    pub regex: Option<&'a str>,
    /// Revision to pin; `current` is the same as none.
    pub rev: Option<&'a str>,
}

/// Compose the locator for a local or remote item.
///
/// Local names go through `router`. A remote wiki found in `map` gets its
/// template filled in; if a revision or non-default view was asked for, the
/// remote wiki is assumed to lay out URLs exactly like this one and the
/// local action path is spliced onto its base URL. A remote wiki missing
/// from `map` yields `/<wiki>/<composite>` and a warning.
pub fn url_for_item(
    reference: &InterwikiRef,
    interwikiname: &str,
    map: &InterwikiMap,
    router: &dyn Router,
    options: &LinkOptions<'_>,
) -> String {
    let rev = options.rev.filter(|r| return *r != CURRENT);
    let wiki_name = reference.wiki_name.as_str();
    let namespace = reference.fqname.namespace.as_str();
    let value = reference.fqname.value.as_str();
    let field = match reference.fqname.field.as_str() {
        NAME_EXACT => "",
        other => other,
    };

    let mut url = if is_local_wiki(wiki_name, interwikiname) {
        let item_name = get_fqname(value, field, namespace);
        router.route(options.endpoint, &item_name, rev, options.external)
    } else {
        match map.get(wiki_name) {
            None => {
                tracing::warn!(wiki_name, "no interwiki_map entry");
                unknown_wiki_path(wiki_name, &get_fqname(value, field, namespace))
            },
            Some(base_url) if rev.is_none() && options.endpoint == Endpoint::ShowItem => {
                join_wiki(base_url, value, field, namespace)
            },
            Some(base_url) => {
                let item_name = get_fqname(value, field, namespace);
                let local_url = router.route(options.endpoint, &item_name, rev, false);
                tracing::debug!(
                    wiki_name,
                    endpoint = options.endpoint.route_name(),
                    %local_url,
                    "splicing local route onto remote base"
                );
                splice_action_path(base_url, &local_url)
            },
        }
    };

    if let Some(regex) = options.regex.filter(|r| return !r.is_empty()) {
        url.push_str("?regex=");
        url.push_str(&quote(regex));
    }
    return url;
}

/// Fill a URL template with a quoted item. Templates without any
/// placeholder get the quoted composite name appended.
///
/// ```text
/// join_wiki("http://x/$PAGE", "Foo Bar", "", "") -> http://x/Foo%20Bar
/// join_wiki("http://x/", "Foo", "", "")          -> http://x/Foo
/// ```
pub fn join_wiki(template: &str, value: &str, field: &str, namespace: &str) -> String {
    let value = quote(value);
    let field = quote(field);
    let namespace = quote(namespace);

    if ![PAGE, NAMESPACE, FIELD].iter().any(|p| return template.contains(p)) {
        return format!("{template}{}", get_fqname(&value, &field, &namespace));
    }

    return template
        .replace(PAGE, &value)
        .replace(FIELD, &field)
        .replace(NAMESPACE, &namespace);
}

/// Everything from the first action marker on, appended to `base_url`.
/// A path without the marker is appended whole, minus its leading "/".
fn splice_action_path(base_url: &str, local_url: &str) -> String {
    let path = local_url
        .find(ACTION_SEPARATOR)
        .and_then(|i| return local_url.get(i.saturating_add(1)..))
        .unwrap_or_else(|| return local_url.strip_prefix('/').unwrap_or(local_url));
    return format!("{base_url}{path}");
}

/// Percent-encode `s` as UTF-8, keeping "/" and unreserved characters.
pub fn quote(s: &str) -> String {
    return utf8_percent_encode(s, PATH_SAFE).to_string();
}

/// Relative stand-in for an item on a wiki the map doesn't know.
fn unknown_wiki_path(wiki_name: &str, item_name: &str) -> String {
    if wiki_name.is_empty() {
        return format!("/{item_name}");
    }
    return format!("/{wiki_name}/{item_name}");
}
