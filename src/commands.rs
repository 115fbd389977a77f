//! CLI commands for wikiref: split, query, url, download-name, root, home, qualify, map.

use std::path::Path;

use crate::config::WikiConfig;
use crate::error;
use crate::intermap::InterwikiMap;
use crate::interwiki::{home_fqname, interwiki_home, interwiki_name, is_known_wiki, is_local_wiki};
use crate::locator::LinkOptions;
use crate::types::InterwikiRef;

/// Print the parts of a possibly wiki-qualified reference.
///
/// # Errors
///
/// Returns `Error::Json` if JSON output fails to serialize.
pub fn split(config: &WikiConfig, reference: &str, json: bool) -> Result<(), error::Error> {
    let parsed = config.split_interwiki(reference);
    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    print_reference(&parsed);
    if !is_local_wiki(&parsed.wiki_name, &config.interwikiname) {
        let known = if is_known_wiki(&config.interwiki_map, &parsed.wiki_name) { "yes" } else { "no" };
        println!("known      {known}");
    }
    return Ok(());
}

/// Print the index query projection of a local reference as JSON.
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
pub fn query(config: &WikiConfig, reference: &str) -> Result<(), error::Error> {
    let name = config.split_fqname(reference);
    println!("{}", serde_json::to_string_pretty(&name.query())?);
    return Ok(());
}

/// Print the locator for a reference.
pub fn url(config: &WikiConfig, reference: &str, options: &LinkOptions<'_>) {
    let parsed = config.split_interwiki(reference);
    println!("{}", config.url_for_item(&parsed, options));
}

/// Print the download file name for a local reference.
pub fn download_name(config: &WikiConfig, reference: &str) {
    println!("{}", config.split_fqname(reference).download_file_name());
}

/// Print the root item of a local reference's namespace.
pub fn root(config: &WikiConfig, reference: &str) {
    let name = config.split_fqname(reference);
    println!("{}", config.root_fqname(&name));
}

/// Print where a user's home page lives and its locator.
pub fn home(config: &WikiConfig, username: &str) {
    let (wiki_name, _) = interwiki_home(&config.user_homewiki, &config.interwikiname, username);
    let target = InterwikiRef {
        fqname: home_fqname(username),
        wiki_name,
    };
    print_reference(&target);
    println!("url        {}", config.url_for_item(&target, &LinkOptions::default()));
}

/// Print the interwiki-qualified name of a local item.
pub fn qualify(config: &WikiConfig, item_name: &str) {
    println!("{}", interwiki_name(&config.interwikiname, item_name));
}

/// List interwiki map entries in source order, from `file` or the loaded config.
///
/// # Errors
///
/// Returns interwiki map read or parse errors when `file` is given.
pub fn map(config: &WikiConfig, file: Option<&Path>) -> Result<(), error::Error> {
    let loaded;
    let map = match file {
        Some(path) => {
            loaded = InterwikiMap::from_file(path)?;
            &loaded
        },
        None => &config.interwiki_map,
    };

    if map.is_empty() {
        println!("No interwiki entries.");
        return Ok(());
    }

    let width = map.names().map(str::len).max().unwrap_or(0);
    for (name, url) in map.iter() {
        println!("{name:<width$}  {url}");
    }
    return Ok(());
}

/// Output the loaded configuration.
///
/// # Errors
///
/// Returns `Error::Json` if JSON output fails to serialize.
pub fn info(config: &WikiConfig, json: bool) -> Result<(), error::Error> {
    return crate::info::run(config, json);
}

/// Aligned, one part per line.
fn print_reference(reference: &InterwikiRef) {
    println!("wiki       {}", reference.wiki_name);
    println!("namespace  {}", reference.fqname.namespace);
    println!("field      {}", reference.fqname.field);
    println!("value      {}", reference.fqname.value);
}
