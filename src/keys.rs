//! Reserved names shared by the parser, the splitter, and the locator composer.

/// Default field: look the value up by exact item name.
pub const NAME_EXACT: &str = "name_exact";

/// Lookup by item identifier.
pub const ITEMID: &str = "itemid";

/// Lookup by revision identifier.
pub const REVID: &str = "revid";

/// Lookup by tag.
pub const TAGS: &str = "tags";

/// Lookup by owning user identifier.
pub const USERID: &str = "userid";

/// Lookup by outgoing item links.
pub const ITEMLINKS: &str = "itemlinks";

/// Lookup by item transclusions.
pub const ITEMTRANSCLUSIONS: &str = "itemtransclusions";

/// Field tokens registered when the config does not name its own.
pub const DEFAULT_FIELDS: [&str; 7] =
    [NAME_EXACT, ITEMID, REVID, TAGS, USERID, ITEMLINKS, ITEMTRANSCLUSIONS];

/// Namespace key of the query projection handed to the index.
pub const NAMESPACE: &str = "namespace";

/// Symbolic revision meaning "latest".
pub const CURRENT: &str = "current";

/// Wiki name denoting this wiki.
pub const SELF_WIKI: &str = "Self";

/// Namespace holding user home items.
pub const NAMESPACE_USERS: &str = "users";

/// Marker in local router output where the action part of a path begins.
pub const ACTION_SEPARATOR: &str = "/+";
