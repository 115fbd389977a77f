use std::io::IsTerminal as _;

use crate::config::CONFIG_FILE;
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as markdown and print to stderr, bolding headings on a terminal.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    let bold = std::io::stderr().is_terminal();
    for line in md.lines() {
        if bold && line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic:
/// what happened, then how to fix it where there is a fix.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::MalformedInterwikiMap { line, line_number } => render_malformed_map(line, *line_number),
        Error::InterwikiMapIo { path, source } => render_map_unreadable(path, source),
        Error::ConfigNotFound { path } => format!("\
# Error: Config Not Found

`{}` does not exist.

## Fix

Pass an existing file to `--config`, or drop the flag to use `{CONFIG_FILE}`.
", path.display()),
        Error::TomlDe(e) => format!("\
# Error: Invalid Config

`{CONFIG_FILE}` is not valid:

{e}
"),
        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::Json(e) => format!("\
# Error: JSON Output

{e}
"),
        Error::Watch { reason } => format!("\
# Error: Watch Failed

{reason}
"),
    };
}

fn render_malformed_map(line: &str, line_number: usize) -> String {
    return format!(
        "\
# Error: Malformed Interwiki Map

Line {line_number} does not have the form `<name> <url>`:

    {line}

## Fix

Give every entry a wiki name and a URL template separated by whitespace,
or comment the line out with `#`:

    MoinMoin https://moinmo.in/$PAGE
"
    );
}

fn render_map_unreadable(path: &std::path::Path, source: &std::io::Error) -> String {
    return format!(
        "\
# Error: Interwiki Map Unreadable

`{}` could not be read: {source}

## Fix

Check the `interwiki_map` path in `{CONFIG_FILE}`.
",
        path.display()
    );
}
