//! Highlight log lines from a file or stdin

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use pgtail_core::{
    error::Result,
    highlighting::{color_disabled_by_env, HighlighterRegistry},
    markup,
};
use tracing::debug;

use super::helpers::{build_chain, load_config, THEME};

/// Handle the highlight command
pub fn handle(
    config_path: &Path,
    file: Option<PathBuf>,
    raw_markup: bool,
    no_color: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = HighlighterRegistry::with_builtins()?;
    let chain = build_chain(&registry, &config);
    let color = !no_color && !color_disabled_by_env();

    let mut reader: Box<dyn BufRead> = match &file {
        Some(path) => {
            debug!("Highlighting {}", path.display());
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(BufReader::new(io::stdin().lock())),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut buf = Vec::new();
    let mut count = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(['\n', '\r']);

        let annotated = chain.apply_with_color(line, &*THEME, &config, color);
        let rendered = if raw_markup {
            annotated
        } else {
            markup::to_ansi(&annotated)
        };

        if let Err(e) = writeln!(out, "{}", rendered) {
            // Reader went away (e.g. piped into head)
            if e.kind() == io::ErrorKind::BrokenPipe {
                return Ok(());
            }
            return Err(e.into());
        }
        count += 1;
    }

    match out.flush() {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e.into()),
        _ => {}
    }
    debug!("Highlighted {} lines", count);
    Ok(())
}
