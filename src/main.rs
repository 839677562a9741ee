//! jsdoc-reconcile — merge inferred documentation into existing JSDoc
//! comments.
//!
//! Two modes:
//!
//! - **stdin mode**: `jsdoc-reconcile < manifest.json`
//! - **file mode**: `jsdoc-reconcile -o out/ manifests/*.json`

use anyhow::{Context, Result};
use clap::Parser;
use jsdoc_reconcile::manifest::{self, Outcome};
use jsdoc_reconcile::render;
use std::collections::HashSet;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsdoc-reconcile",
    about = "Reconcile inferred documentation with existing JSDoc comments"
)]
struct Cli {
    /// Manifest files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given, unless --check)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: block (default), json
    #[arg(short = 'f', long, default_value = "block", env = "JSDOC_RECONCILE_FORMAT")]
    format: String,

    /// Indentation for rendered blocks when a declaration does not give one
    #[arg(long, default_value = "", env = "JSDOC_RECONCILE_INDENT")]
    indent: String,

    /// Exit with an error if any declaration's documentation would change
    #[arg(long)]
    check: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let changed = if cli.files.is_empty() {
        stdin_mode(&cli)?
    } else {
        file_mode(&cli)?
    };

    if cli.check && changed > 0 {
        anyhow::bail!("{} declaration(s) would change", changed);
    }
    Ok(())
}

/// `RUST_LOG` wins over -v/-q.
fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

/// stdin mode: read one manifest, write the rendered result to stdout.
/// Returns the number of changed declarations.
fn stdin_mode(cli: &Cli) -> Result<usize> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let outcomes = process(&input, &cli.indent).context("failed to load manifest from stdin")?;
    let renderer = render::create_renderer(&cli.format)?;
    if !cli.check {
        print!("{}", renderer.render(&outcomes));
    }
    Ok(count_changed(&outcomes))
}

/// file mode: process each manifest and write one output per manifest.
fn file_mode(cli: &Cli) -> Result<usize> {
    let output_dir = match cli.output.as_deref() {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| {
                format!("failed to create output directory: {}", dir.display())
            })?;
            Some(dir)
        }
        None if cli.check => None,
        None => anyhow::bail!("--output is required when files are given"),
    };

    let renderer = render::create_renderer(&cli.format)?;
    let ext = renderer.file_extension();
    let mut changed = 0;
    let mut written: HashSet<PathBuf> = HashSet::new();

    for path in expand_globs(&cli.files)? {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let outcomes = match process(&content, &cli.indent) {
            Ok(outcomes) => outcomes,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        changed += count_changed(&outcomes);

        let Some(dir) = output_dir else {
            continue;
        };
        let stem = derive_output_name(&path);
        let out_path = unique_output_path(dir, &stem, ext, &written);
        if written.contains(&dir.join(format!("{}.reconciled.{}", stem, ext))) {
            tracing::warn!(
                "output for {} collides with an earlier manifest; writing {}",
                path.display(),
                out_path.display()
            );
        }
        written.insert(out_path.clone());
        fs::write(&out_path, renderer.render(&outcomes))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        tracing::debug!("wrote {}", out_path.display());
    }

    Ok(changed)
}

fn process(json: &str, indent: &str) -> Result<Vec<Outcome>> {
    let declarations = manifest::load(json)?;
    Ok(declarations.iter().map(|d| d.resolve(indent)).collect())
}

fn count_changed(outcomes: &[Outcome]) -> usize {
    let changed: Vec<&Outcome> = outcomes.iter().filter(|o| o.changed()).collect();
    for outcome in &changed {
        tracing::info!(declaration = %outcome.name, "documentation changed");
    }
    changed.len()
}

/// File extensions recognized as manifests.
const SUPPORTED_EXTENSIONS: &[&str] = &["json"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for manifests.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // If it's a directory, scan for supported extensions (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file()
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
                {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// "manifests/users.json" → "users"
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "manifest".to_string())
}

/// `dir/{stem}.reconciled.{ext}`, or `dir/{stem}-N.reconciled.{ext}` when
/// an earlier manifest in this run already wrote that path.
fn unique_output_path(dir: &Path, stem: &str, ext: &str, written: &HashSet<PathBuf>) -> PathBuf {
    let mut candidate = dir.join(format!("{}.reconciled.{}", stem, ext));
    let mut n = 2;
    while written.contains(&candidate) {
        candidate = dir.join(format!("{}-{}.reconciled.{}", stem, n, ext));
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_from_manifest() {
        assert_eq!(derive_output_name(Path::new("manifests/users.json")), "users");
        assert_eq!(derive_output_name(Path::new("users")), "users");
    }

    #[test]
    fn colliding_output_names_get_a_suffix() {
        let dir = Path::new("out");
        let mut written = HashSet::new();
        let first = unique_output_path(dir, "users", "js", &written);
        assert_eq!(first, dir.join("users.reconciled.js"));
        written.insert(first);
        let second = unique_output_path(dir, "users", "js", &written);
        assert_eq!(second, dir.join("users-2.reconciled.js"));
        written.insert(second);
        assert_eq!(
            unique_output_path(dir, "users", "js", &written),
            dir.join("users-3.reconciled.js")
        );
    }

    #[test]
    fn expand_globs_scans_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = expand_globs(&[dir.path().to_string_lossy().to_string()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }
}
