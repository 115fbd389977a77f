use serde::Serialize;

use crate::config::{CONFIG_FILE, WikiConfig};
use crate::error;

/// Output the wikiref reference document with the loaded configuration.
///
/// # Errors
///
/// Returns `Error::Json` if JSON output fails to serialize.
pub fn run(config: &WikiConfig, json: bool) -> Result<(), error::Error> {
    let state = gather_state(config);

    if json {
        return print_json(&state);
    }
    print_markdown(&state);
    return Ok(());
}

// ── State gathering ───────────────────────────────────────────────────

#[derive(Serialize)]
struct CurrentState {
    default_root: String,
    fields: Vec<String>,
    interwiki: Vec<InterwikiJson>,
    interwiki_map_file: Option<String>,
    interwikiname: String,
    namespaces: Vec<String>,
    root_mapping: Vec<RootJson>,
    user_homewiki: String,
}

#[derive(Serialize)]
struct InterwikiJson {
    name: String,
    url: String,
}

#[derive(Serialize)]
struct RootJson {
    namespace: String,
    root: String,
}

fn gather_state(config: &WikiConfig) -> CurrentState {
    let mut root_mapping: Vec<RootJson> = config
        .root_mapping
        .iter()
        .map(|(namespace, root)| RootJson { namespace: namespace.clone(), root: root.clone() })
        .collect();
    root_mapping.sort_by(|a, b| a.namespace.cmp(&b.namespace));

    CurrentState {
        default_root: config.default_root.clone(),
        fields: config.fields.sorted().into_iter().map(String::from).collect(),
        interwiki: config
            .interwiki_map
            .iter()
            .map(|(name, url)| InterwikiJson { name: name.to_string(), url: url.to_string() })
            .collect(),
        interwiki_map_file: config.interwiki_map_path.as_ref().map(|p| p.display().to_string()),
        interwikiname: config.interwikiname.clone(),
        namespaces: config.namespaces.sorted().into_iter().map(String::from).collect(),
        root_mapping,
        user_homewiki: config.user_homewiki.clone(),
    }
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print!(
        "\
# wikiref {version}

Resolve wiki item references into composite names and locators.

## Reference Syntax

    Page                          item in the default namespace
    ns/Page                       item in a registered namespace
    ns/@itemid/abc123             lookup by a registered field
    OtherWiki/ns/Page             item on a wiki from the interwiki map
    /OtherWiki/Page               force a local lookup

## Current State

"
    );

    println!("Config:        {CONFIG_FILE}");
    println!("Wiki name:     {}", state.interwikiname);
    println!("Home wiki:     {}", state.user_homewiki);
    println!("Default root:  {}", state.default_root);
    println!("Fields:        {}", state.fields.join(", "));

    if state.namespaces.is_empty() {
        println!("Namespaces:    (none)");
    } else {
        println!("Namespaces:    {}", state.namespaces.join(", "));
    }

    if !state.root_mapping.is_empty() {
        let roots = state
            .root_mapping
            .iter()
            .map(|r| format!("{} -> {}", r.namespace, r.root))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Roots:         {roots}");
    }

    match &state.interwiki_map_file {
        Some(path) => println!("Map file:      {path} ({} entries)", state.interwiki.len()),
        None => println!("Map file:      (none, {} inline entries)", state.interwiki.len()),
    }
}

// ── JSON output ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct InfoJson<'a> {
    current_state: &'a CurrentState,
    version: &'static str,
}

fn print_json(state: &CurrentState) -> Result<(), error::Error> {
    let info = InfoJson {
        current_state: state,
        version: env!("CARGO_PKG_VERSION"),
    };
    println!("{}", serde_json::to_string_pretty(&info)?);
    return Ok(());
}
