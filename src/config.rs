use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;

use crate::error::Error;
use crate::fqname::split_fqname;
use crate::intermap::InterwikiMap;
use crate::interwiki::split_interwiki;
use crate::locator::{LinkOptions, url_for_item};
use crate::router::PathRouter;
use crate::types::{CompositeName, FieldSet, InterwikiRef, NamespaceSet};

/// Name of the project config file.
pub const CONFIG_FILE: &str = ".wikiref.toml";

/// Everything reference resolution reads, loaded once and never mutated.
/// A reload builds a fresh snapshot (see [`ConfigHandle`]).
#[derive(Debug)]
pub struct WikiConfig {
    /// Root item used for namespaces without a `root_mapping` entry.
    pub default_root: String,
    /// Reserved field tokens.
    pub fields: FieldSet,
    /// Remote wiki URL templates.
    pub interwiki_map: InterwikiMap,
    /// Map file the table was loaded from, if any.
    pub interwiki_map_path: Option<PathBuf>,
    /// This wiki's own interwiki name.
    pub interwikiname: String,
    /// Registered namespaces.
    pub namespaces: NamespaceSet,
    /// Namespace to root item name.
    pub root_mapping: HashMap<String, String>,
    /// Local URL layout.
    pub router: PathRouter,
    /// Wiki holding user home pages.
    pub user_homewiki: String,
}

/// Raw TOML structure for `.wikiref.toml`.
#[derive(serde::Deserialize)]
struct WikirefTomlConfig {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_root")]
    default_root: String,
    #[serde(default)]
    fields: Option<Vec<String>>,
    #[serde(default)]
    interwiki: IndexMap<String, String>,
    #[serde(default)]
    interwiki_map: Option<String>,
    #[serde(default = "default_interwikiname")]
    interwikiname: String,
    #[serde(default)]
    namespaces: Vec<String>,
    #[serde(default)]
    root_mapping: HashMap<String, String>,
    #[serde(default)]
    script_root: String,
    #[serde(default = "default_user_homewiki")]
    user_homewiki: String,
}

fn default_base_url() -> String {
    return "http://127.0.0.1:8080".to_string();
}

fn default_interwikiname() -> String {
    return "MyWiki".to_string();
}

fn default_root() -> String {
    return "Home".to_string();
}

fn default_user_homewiki() -> String {
    return crate::keys::SELF_WIKI.to_string();
}

impl WikiConfig {
    /// Load config from `.wikiref.toml` in `root`.
    /// Returns built-in defaults if the file doesn't exist, and an error if
    /// it exists but is malformed. A user-written config never silently
    /// falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed, or any interwiki map error.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(Error::Io(e)),
        };
        return Self::parse(root, &content);
    }

    /// Load config from an explicitly named file; relative map paths resolve
    /// against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigNotFound` if the file doesn't exist, plus
    /// everything [`WikiConfig::load`] can return.
    pub fn load_file(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
        };
        let root = path.parent().unwrap_or(Path::new(""));
        return Self::parse(root, &content);
    }

    /// Build a snapshot from TOML text. The map file (if named) is read
    /// first; inline `[interwiki]` entries are applied on top of it.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` on malformed TOML, or any interwiki map error.
    pub fn parse(root: &Path, content: &str) -> Result<Self, Error> {
        let raw: WikirefTomlConfig = toml::from_str(content)?;

        let interwiki_map_path = raw.interwiki_map.as_deref().map(|p| return resolve_map_path(root, p));
        let mut interwiki_map = match &interwiki_map_path {
            Some(path) => InterwikiMap::from_file(path)?,
            None => InterwikiMap::default(),
        };
        for (name, url) in &raw.interwiki {
            interwiki_map.insert(name, url);
        }

        let fields = raw.fields.map_or_else(FieldSet::default, FieldSet::new);

        return Ok(Self {
            default_root: raw.default_root,
            fields,
            interwiki_map,
            interwiki_map_path,
            interwikiname: raw.interwikiname,
            namespaces: NamespaceSet::new(&raw.namespaces),
            root_mapping: raw.root_mapping,
            router: PathRouter::new(&raw.base_url, &raw.script_root),
            user_homewiki: raw.user_homewiki,
        });
    }

    /// Parse a local reference against this wiki's namespaces and fields.
    pub fn split_fqname(&self, reference: &str) -> CompositeName {
        return split_fqname(&self.namespaces, &self.fields, reference);
    }

    /// Parse a possibly wiki-qualified reference.
    pub fn split_interwiki(&self, reference: &str) -> InterwikiRef {
        return split_interwiki(&self.interwiki_map, &self.namespaces, &self.fields, reference);
    }

    /// Root item of `name`'s namespace.
    pub fn root_fqname(&self, name: &CompositeName) -> CompositeName {
        return name.root_fqname(&self.root_mapping, &self.default_root);
    }

    /// Compose the locator for a parsed reference with this wiki's router.
    pub fn url_for_item(&self, reference: &InterwikiRef, options: &LinkOptions<'_>) -> String {
        return url_for_item(reference, &self.interwikiname, &self.interwiki_map, &self.router, options);
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        return Self {
            default_root: default_root(),
            fields: FieldSet::default(),
            interwiki_map: InterwikiMap::default(),
            interwiki_map_path: None,
            interwikiname: default_interwikiname(),
            namespaces: NamespaceSet::default(),
            root_mapping: HashMap::new(),
            router: PathRouter::new(&default_base_url(), ""),
            user_homewiki: default_user_homewiki(),
        };
    }
}

/// Expand `~` and anchor relative paths at the project root.
fn resolve_map_path(root: &Path, raw: &str) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).into_owned());
    if expanded.is_absolute() {
        return expanded;
    }
    return root.join(expanded);
}

/// Shared, swappable config snapshot. Readers take an `Arc` and keep a
/// consistent view for as long as they hold it; `reload` publishes a
/// complete replacement in one store.
pub struct ConfigHandle {
    /// Currently published snapshot.
    current: ArcSwap<WikiConfig>,
    /// Whether the file was named explicitly and so must exist.
    explicit: bool,
    /// Config file backing the snapshot.
    path: PathBuf,
}

impl ConfigHandle {
    /// Load the initial snapshot from `.wikiref.toml` in `root`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`WikiConfig::load`].
    pub fn load(root: &Path) -> Result<Self, Error> {
        return Self::open(root.join(CONFIG_FILE), false);
    }

    /// Load the initial snapshot from an explicitly named config file.
    ///
    /// # Errors
    ///
    /// Returns any error from [`WikiConfig::load_file`].
    pub fn load_file(path: &Path) -> Result<Self, Error> {
        return Self::open(path.to_path_buf(), true);
    }

    /// Read the first snapshot and wrap it.
    fn open(path: PathBuf, explicit: bool) -> Result<Self, Error> {
        let config = read_snapshot(&path, explicit)?;
        return Ok(Self {
            current: ArcSwap::from_pointee(config),
            explicit,
            path,
        });
    }

    /// The published snapshot.
    pub fn current(&self) -> Arc<WikiConfig> {
        return self.current.load_full();
    }

    /// Rebuild from disk and publish. On error the previous snapshot stays.
    ///
    /// # Errors
    ///
    /// Returns any error from loading the config file or its map file.
    pub fn reload(&self) -> Result<(), Error> {
        let fresh = read_snapshot(&self.path, self.explicit)?;
        self.current.store(Arc::new(fresh));
        tracing::info!(path = %self.path.display(), "configuration reloaded");
        return Ok(());
    }

    /// Directory holding the config file.
    pub fn dir(&self) -> PathBuf {
        return match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
    }
}

/// Load `path`, treating a missing file as defaults unless it was named explicitly.
fn read_snapshot(path: &Path, explicit: bool) -> Result<WikiConfig, Error> {
    if explicit {
        return WikiConfig::load_file(path);
    }
    return WikiConfig::load(path.parent().unwrap_or(Path::new("")));
}
