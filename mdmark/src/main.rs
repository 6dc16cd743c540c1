//! mdmark - annotate markdown documents with diff-aware change markers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mdmark_core::Config;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Markdown-aware diff annotation
#[derive(Parser, Debug)]
#[command(name = "mdmark")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Annotate files with change markers against a base revision
    Annotate {
        /// Base revision the old text is read from
        #[arg(long)]
        base: Option<String>,
        /// Read the old text from a file instead of git (single file only)
        #[arg(long, value_name = "FILE")]
        old: Option<PathBuf>,
        /// Print results to stdout instead of rewriting the files
        #[arg(long)]
        stdout: bool,
        /// Files or directories to annotate
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },
    /// Remove all change markers, restoring plain markdown
    Strip {
        /// Print results to stdout instead of rewriting the files
        #[arg(long)]
        stdout: bool,
        /// Files or directories to strip
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = Config::load().context("Failed to load configuration")?;

    let failures = match args.command {
        Command::Annotate {
            base,
            old,
            stdout,
            paths,
        } => {
            let base = base.unwrap_or_else(|| config.annotate.base.clone());
            let files = collect_files(&paths, &config)?;
            if old.is_some() && files.len() != 1 {
                anyhow::bail!("--old requires exactly one file argument");
            }
            run_over(&files, stdout, |file| {
                let new_text = fs::read_to_string(file)
                    .with_context(|| format!("Failed to read file: {}", file.display()))?;
                let old_text = match &old {
                    Some(path) => fs::read_to_string(path)
                        .with_context(|| format!("Failed to read file: {}", path.display()))?,
                    None => base_text(file, &base)?,
                };
                Ok(mdmark_core::annotate(&old_text, &new_text))
            })
        }
        Command::Strip { stdout, paths } => {
            let files = collect_files(&paths, &config)?;
            run_over(&files, stdout, |file| {
                let text = fs::read_to_string(file)
                    .with_context(|| format!("Failed to read file: {}", file.display()))?;
                Ok(mdmark_core::strip(&text))
            })
        }
    };

    if failures > 0 {
        anyhow::bail!("{failures} file(s) failed");
    }
    Ok(())
}

/// Apply a transform to each file, writing in place or to stdout.
///
/// Failures are reported per file and counted; the remaining files still run.
fn run_over(files: &[PathBuf], to_stdout: bool, transform: impl Fn(&Path) -> Result<String>) -> usize {
    let mut failures = 0;
    for file in files {
        match transform(file) {
            Ok(output) => {
                if to_stdout {
                    print!("{output}");
                } else if let Err(err) = fs::write(file, &output) {
                    eprintln!("mdmark: {}: {err}", file.display());
                    failures += 1;
                } else {
                    log::debug!("wrote {}", file.display());
                }
            }
            Err(err) => {
                eprintln!("mdmark: {}: {err:#}", file.display());
                failures += 1;
            }
        }
    }
    failures
}

/// Expand directory arguments into files with configured extensions.
fn collect_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry
                    .with_context(|| format!("Failed to walk directory: {}", path.display()))?;
                if entry.file_type().is_file() && has_markdown_extension(entry.path(), config) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn has_markdown_extension(path: &Path, config: &Config) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            config
                .files
                .extensions
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[cfg(feature = "git")]
fn base_text(file: &Path, base: &str) -> Result<String> {
    use mdmark_core::git;

    let Some(ctx) = git::open_repo_for_path(file)? else {
        anyhow::bail!("{} is not inside a git repository", file.display());
    };
    match git::read_rev_file_text(&ctx.repo, base, &ctx.rel_path)? {
        Some(text) => Ok(text),
        None => {
            log::warn!(
                "{} not found at {base}, treating the whole file as added",
                file.display()
            );
            Ok(String::new())
        }
    }
}

#[cfg(not(feature = "git"))]
fn base_text(file: &Path, _base: &str) -> Result<String> {
    anyhow::bail!(
        "{}: git support not compiled in; use --old to supply the old text",
        file.display()
    )
}
