//! Config watcher: resolves references on startup, then reloads the
//! configuration and re-resolves whenever the config or map file changes.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::config::{ConfigHandle, WikiConfig};
use crate::error;
use crate::locator::LinkOptions;

/// Debounce delay between filesystem events and reload.
const DEBOUNCE_MS: u64 = 100;

/// Directories holding the config file and the interwiki map file.
fn collect_watch_dirs(handle: &ConfigHandle, config: &WikiConfig) -> HashSet<PathBuf> {
    let mut dirs = HashSet::new();
    dirs.insert(handle.dir());
    if let Some(path) = &config.interwiki_map_path
        && let Some(parent) = path.parent()
    {
        let parent = if parent.as_os_str().is_empty() { PathBuf::from(".") } else { parent.to_path_buf() };
        dirs.insert(parent);
    }
    return dirs;
}

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns `Error::Watch` if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, error::Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return error::Error::Watch {
            reason: format!("watcher setup failed: {e}"),
        };
    });
}

/// Entry point for the watch command.
///
/// Resolves `references` once, then reloads and re-resolves on changes.
/// A reload that fails keeps serving the previous configuration.
///
/// # Errors
///
/// Returns errors from the initial config load or watcher setup.
pub fn run(handle: &ConfigHandle, references: &[String]) -> Result<(), error::Error> {
    print_locators(&handle.current(), references);

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;
    let mut watched = watch_dirs(&mut watcher, &collect_watch_dirs(handle, &handle.current()));

    let dir_count = watched.len();
    eprintln!("watch: monitoring {dir_count} directories, press Ctrl+C to stop");

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}

        if let Err(e) = handle.reload() {
            tracing::warn!(error = %e, "reload failed, keeping previous configuration");
            continue;
        }

        let config = handle.current();
        let dirs = collect_watch_dirs(handle, &config);
        let added: HashSet<PathBuf> = dirs.difference(&watched).cloned().collect();
        watched.extend(watch_dirs(&mut watcher, &added));

        eprintln!("watch: configuration changed, re-resolving...");
        print_locators(&config, references);
    }

    return Ok(());
}

/// Start watching each existing directory; returns the ones now watched.
fn watch_dirs(watcher: &mut notify::RecommendedWatcher, dirs: &HashSet<PathBuf>) -> HashSet<PathBuf> {
    let mut watched = HashSet::new();
    for dir in dirs {
        if dir.exists() && watcher.watch(dir, RecursiveMode::NonRecursive).is_ok() {
            watched.insert(dir.clone());
        }
    }
    return watched;
}

/// Print `<reference> -> <locator>` for every reference.
fn print_locators(config: &WikiConfig, references: &[String]) {
    let options = LinkOptions::default();
    for reference in references {
        let parsed = config.split_interwiki(reference);
        println!("{reference} -> {}", config.url_for_item(&parsed, &options));
    }
}
