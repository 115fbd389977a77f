//! Local URL routing: maps a view and a composite item name to a path.

use percent_encoding::{AsciiSet, utf8_percent_encode};

use crate::locator::PATH_SAFE;

/// Path characters the router leaves literal on top of [`PATH_SAFE`].
const ROUTE_SAFE: &AsciiSet = &PATH_SAFE
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

/// Quote an item name or revision for use in a route.
fn quote_route(s: &str) -> String {
    return utf8_percent_encode(s, ROUTE_SAFE).to_string();
}

/// A view of an item. `ShowItem` is the default route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Endpoint {
    /// Rendered item content.
    #[default]
    ShowItem,
    /// Item metadata.
    ShowItemMeta,
    /// Revision history.
    History,
    /// Raw download.
    DownloadItem,
    /// Editor.
    ModifyItem,
    /// Items linking here.
    Backrefs,
}

impl Endpoint {
    /// The action path segment, or `None` for the plain item route.
    pub fn action(self) -> Option<&'static str> {
        return match self {
            Self::ShowItem => None,
            Self::ShowItemMeta => Some("meta"),
            Self::History => Some("history"),
            Self::DownloadItem => Some("get"),
            Self::ModifyItem => Some("modify"),
            Self::Backrefs => Some("backrefs"),
        };
    }

    /// The endpoint's registered route name.
    pub fn route_name(self) -> &'static str {
        return match self {
            Self::ShowItem => "frontend.show_item",
            Self::ShowItemMeta => "frontend.show_item_meta",
            Self::History => "frontend.history",
            Self::DownloadItem => "frontend.download_item",
            Self::ModifyItem => "frontend.modify_item",
            Self::Backrefs => "frontend.backrefs",
        };
    }
}

/// Builds local paths or absolute URLs for items of this wiki.
pub trait Router {
    /// Route `item_name` (canonical composite form) to `endpoint`, optionally
    /// pinned to `rev`. `external` requests a fully qualified URL.
    fn route(&self, endpoint: Endpoint, item_name: &str, rev: Option<&str>, external: bool) -> String;
}

/// The wiki's own URL layout:
///
/// ```text
/// <root>/<item>
/// <root>/+show/+<rev>/<item>
/// <root>/+<action>/<item>
/// <root>/+<action>/+<rev>/<item>
/// ```
#[derive(Debug, Clone)]
pub struct PathRouter {
    /// Scheme and host prefixed to external URLs.
    base_url: String,
    /// Path prefix under which the wiki is mounted, without trailing "/".
    script_root: String,
}

impl PathRouter {
    /// Create a router mounted at `script_root` and served from `base_url`.
    pub fn new(base_url: &str, script_root: &str) -> Self {
        return Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            script_root: script_root.trim_end_matches('/').to_string(),
        };
    }
}

impl Router for PathRouter {
    fn route(&self, endpoint: Endpoint, item_name: &str, rev: Option<&str>, external: bool) -> String {
        let root = &self.script_root;
        let item = quote_route(item_name);
        let path = match (endpoint.action(), rev.map(quote_route)) {
            (None, None) => format!("{root}/{item}"),
            (None, Some(rev)) => format!("{root}/+show/+{rev}/{item}"),
            (Some(action), None) => format!("{root}/+{action}/{item}"),
            (Some(action), Some(rev)) => format!("{root}/+{action}/+{rev}/{item}"),
        };

        if external {
            return format!("{}{path}", self.base_url);
        }
        return path;
    }
}
