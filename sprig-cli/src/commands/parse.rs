//! Parse command implementation

use anyhow::{Context, Result};
use sprig_core::Limits;
use sprig_parser::{parse_threaded, ParseError, Parsed, ThreadedParserConfig};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::config::OutputFormat;

/// Everything the parse command needs besides the source text.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub limits: Limits,
    pub format: OutputFormat,
    pub stats: bool,
    pub stack_size: usize,
}

/// Source text plus the name used in diagnostics.
#[derive(Debug)]
pub struct Source {
    pub name: String,
    pub text: String,
}

/// Read `path`, or standard input when `path` is absent or `-`.
pub fn read_source(path: Option<&Path>) -> Result<Source> {
    match path {
        Some(path) if path != Path::new("-") => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Source {
                name: path.display().to_string(),
                text,
            })
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read standard input")?;
            Ok(Source {
                name: "<stdin>".to_string(),
                text,
            })
        }
    }
}

/// Parse `source` and print every value to `out`, and stats to `err` when
/// asked for.
pub fn run(
    source: Source,
    options: &ParseOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    info!(source = %source.name, bytes = source.text.len(), "parsing");

    let config = ThreadedParserConfig::default()
        .with_limits(options.limits)
        .with_stack_size(options.stack_size);
    let parsed = match parse_threaded(source.text.clone(), config) {
        Ok(parsed) => parsed,
        Err(error) => return Err(describe(&source, error)),
    };
    debug!(roots = parsed.roots().len(), nodes = parsed.node_count(), "parsed");

    write_values(&parsed, options.format, out)?;
    if options.stats {
        write_stats(&parsed, err)?;
    }
    Ok(())
}

fn write_values(parsed: &Parsed, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for line in parsed.render()? {
                writeln!(out, "{}", line)?;
            }
        }
        OutputFormat::Json => {
            let values = parsed.snapshot()?;
            serde_json::to_writer_pretty(&mut *out, &values)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_stats(parsed: &Parsed, err: &mut impl Write) -> Result<()> {
    let arena = parsed.arena();
    writeln!(
        err,
        "values: {}, nodes: {}/{} (max depth {}, max list length {})",
        parsed.roots().len(),
        arena.len(),
        arena.capacity(),
        arena.limits().max_depth,
        arena.limits().max_list_len,
    )?;
    Ok(())
}

/// Attach the source position to a parse error.
fn describe(source: &Source, error: ParseError) -> anyhow::Error {
    let location = match error.offset() {
        Some(offset) => {
            let (line, column) = line_column(&source.text, offset);
            format!("{}:{}:{}", source.name, line, column)
        }
        None => source.name.clone(),
    };
    anyhow::Error::new(error).context(format!("failed to parse {}", location))
}

/// One-based line and column (in characters) of a byte offset.
pub fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
