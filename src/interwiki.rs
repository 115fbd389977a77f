//! Wiki-qualified references: deciding whether the leading token names a
//! remote wiki or a local namespace.

use std::collections::HashSet;

use crate::fqname::split_fqname;
use crate::intermap::InterwikiMap;
use crate::keys::{NAME_EXACT, NAMESPACE_USERS, SELF_WIKI};
use crate::namespace::split_namespace;
use crate::types::{CompositeName, FieldSet, InterwikiRef, NamespaceSet};

/// Whether `wiki_name` denotes this wiki.
pub fn is_local_wiki(wiki_name: &str, interwikiname: &str) -> bool {
    return wiki_name.is_empty() || wiki_name == SELF_WIKI || wiki_name == interwikiname;
}

/// Whether `wiki_name` has an interwiki map entry.
pub fn is_known_wiki(map: &InterwikiMap, wiki_name: &str) -> bool {
    return map.contains(wiki_name);
}

/// The fully qualified interwiki name of a local item.
pub fn interwiki_name(interwikiname: &str, item_name: &str) -> String {
    return format!("{interwikiname}/{item_name}");
}

/// The wiki and composite item name holding `username`'s home page.
pub fn interwiki_home(user_homewiki: &str, interwikiname: &str, username: &str) -> (String, String) {
    let wiki = if is_local_wiki(user_homewiki, interwikiname) {
        SELF_WIKI.to_string()
    } else {
        user_homewiki.to_string()
    };
    return (wiki, home_fqname(username).fullname());
}

/// `username`'s home page as a parsed name, independent of which namespaces
/// the local wiki registers.
pub fn home_fqname(username: &str) -> CompositeName {
    return CompositeName::new(NAMESPACE_USERS, NAME_EXACT, username);
}

/// Split a possibly wiki-qualified reference.
///
/// ```text
/// MoinMoin/FrontPage        -> (MoinMoin, "", name_exact, FrontPage)
/// FrontPage                 -> (Self, "", name_exact, FrontPage)
/// MoinMoin/                 -> (MoinMoin, "", name_exact, "")
/// MoinMoin/ns/@itemid/Page  -> (MoinMoin, ns, itemid, Page)   if ns and itemid are registered
/// ns/Page                   -> (Self, ns, name_exact, Page)   if ns is registered
/// /MoinMoin/Page            -> (Self, "", name_exact, MoinMoin/Page)
/// ```
///
/// A leading token becomes a wiki name only when it is the first segment
/// of some map key; otherwise the whole input is parsed as a local name.
pub fn split_interwiki(
    map: &InterwikiMap,
    namespaces: &NamespaceSet,
    fields: &FieldSet,
    input: &str,
) -> InterwikiRef {
    if !input.contains('/') {
        return InterwikiRef {
            wiki_name: SELF_WIKI.to_string(),
            fqname: CompositeName::new("", NAME_EXACT, input),
        };
    }

    if let Some(local) = input.strip_prefix('/') {
        return InterwikiRef {
            wiki_name: SELF_WIKI.to_string(),
            fqname: split_fqname(namespaces, fields, local),
        };
    }

    let candidates = top_level_wiki_names(map);
    let (wiki_name, rest) = split_namespace(&candidates, input);
    let fqname = split_fqname(namespaces, fields, rest);

    let wiki_name = if wiki_name.is_empty() { SELF_WIKI.to_string() } else { wiki_name };
    return InterwikiRef { wiki_name, fqname };
}

/// First "/"-segment of every map key, as a namespace set for prefix matching.
fn top_level_wiki_names(map: &InterwikiMap) -> NamespaceSet {
    let names: HashSet<&str> = map
        .names()
        .map(|name| return name.split('/').next().unwrap_or(name))
        .collect();
    return NamespaceSet::new(names);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> InterwikiMap {
        return InterwikiMap::parse("MoinMoin https://moinmo.in/\nFarm/Sub http://farm/sub/\n").unwrap();
    }

    fn split(input: &str) -> InterwikiRef {
        let namespaces = NamespaceSet::new(["ns", "ns1", "ns1/ns2", "interwikins"]);
        return split_interwiki(&map(), &namespaces, &FieldSet::default(), input);
    }

    fn expect(wiki: &str, namespace: &str, field: &str, value: &str) -> InterwikiRef {
        return InterwikiRef {
            wiki_name: wiki.to_string(),
            fqname: CompositeName::new(namespace, field, value),
        };
    }

    #[test]
    fn remote_page() {
        assert_eq!(split("MoinMoin/FrontPage"), expect("MoinMoin", "", NAME_EXACT, "FrontPage"));
    }

    #[test]
    fn bare_page_is_local() {
        assert_eq!(split("FrontPage"), expect("Self", "", NAME_EXACT, "FrontPage"));
    }

    #[test]
    fn bare_token_short_circuits_even_with_at_sign() {
        assert_eq!(split("@itemid"), expect("Self", "", NAME_EXACT, "@itemid"));
    }

    #[test]
    fn remote_page_with_blanks() {
        assert_eq!(split("MoinMoin/Page with blanks"), expect("MoinMoin", "", NAME_EXACT, "Page with blanks"));
    }

    #[test]
    fn remote_wiki_without_page() {
        assert_eq!(split("MoinMoin/"), expect("MoinMoin", "", NAME_EXACT, ""));
    }

    #[test]
    fn remote_field() {
        assert_eq!(split("MoinMoin/@itemid/SomeValue"), expect("MoinMoin", "", "itemid", "SomeValue"));
        assert_eq!(split("MoinMoin/@Someid/SomeValue"), expect("MoinMoin", "", NAME_EXACT, "@Someid/SomeValue"));
    }

    #[test]
    fn remote_namespace() {
        assert_eq!(split("MoinMoin/interwikins/AnyPage"), expect("MoinMoin", "interwikins", NAME_EXACT, "AnyPage"));
        assert_eq!(split("MoinMoin/ns/@Somefield/AnyPage"), expect("MoinMoin", "ns", NAME_EXACT, "@Somefield/AnyPage"));
        assert_eq!(split("MoinMoin/ns/@revid/AnyPage"), expect("MoinMoin", "ns", "revid", "AnyPage"));
    }

    #[test]
    fn local_namespace() {
        assert_eq!(split("ns/AnyPage"), expect("Self", "ns", NAME_EXACT, "AnyPage"));
        assert_eq!(split("ns1/ns2/AnyPage"), expect("Self", "ns1/ns2", NAME_EXACT, "AnyPage"));
        assert_eq!(split("other/AnyPage"), expect("Self", "", NAME_EXACT, "other/AnyPage"));
    }

    #[test]
    fn leading_separator_forces_local() {
        assert_eq!(split("/MoinMoin/Page"), expect("Self", "", NAME_EXACT, "MoinMoin/Page"));
        assert_eq!(split("/ns/Page"), expect("Self", "ns", NAME_EXACT, "Page"));
    }

    #[test]
    fn multi_segment_wiki_names_match_by_first_segment() {
        assert_eq!(split("Farm/Sub/Page"), expect("Farm", "", NAME_EXACT, "Sub/Page"));
    }

    #[test]
    fn local_wiki_names() {
        assert!(is_local_wiki("", "MyWiki"));
        assert!(is_local_wiki("Self", "MyWiki"));
        assert!(is_local_wiki("MyWiki", "MyWiki"));
        assert!(!is_local_wiki("MoinMoin", "MyWiki"));
    }

    #[test]
    fn known_wiki_names() {
        assert!(is_known_wiki(&map(), "MoinMoin"));
        assert!(!is_known_wiki(&map(), "Farm"));
    }

    #[test]
    fn qualified_local_name() {
        assert_eq!(interwiki_name("MyWiki", "FrontPage"), "MyWiki/FrontPage");
    }

    #[test]
    fn home_page_location() {
        assert_eq!(interwiki_home("Self", "MyWiki", "alice"), ("Self".to_string(), "users/alice".to_string()));
        assert_eq!(interwiki_home("MyWiki", "MyWiki", "alice"), ("Self".to_string(), "users/alice".to_string()));
        assert_eq!(interwiki_home("HomeWiki", "MyWiki", "alice"), ("HomeWiki".to_string(), "users/alice".to_string()));
    }

    #[test]
    fn home_name_keeps_users_namespace() {
        let name = home_fqname("alice");
        assert_eq!(name.namespace, "users");
        assert_eq!(name.field, NAME_EXACT);
        assert_eq!(name.value, "alice");
        assert_eq!(name.fullname(), "users/alice");
    }
}
