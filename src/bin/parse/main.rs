//! # Parse
//!
//! This binary parses Java 8 source files and reports syntax errors. It
//! combines the tokenizer, cursor and grammar layers into a single
//! command-line tool, the way `why` combines parser, type checker and
//! compiler for Y.
extern crate javelin_syntax;

mod cli;

use cli::*;

use std::path::{Path, PathBuf};

use log::{error, info};

fn main() {
    let args = Cli::init();

    let level = if args.debug {
        log::Level::Trace
    } else {
        (&args.verbosity).into()
    };
    simple_logger::init_with_level(level).unwrap();

    let mut files = Vec::new();
    for path in &args.paths {
        if let Err(err) = collect_java_files(path, &mut files) {
            error!("{}: {}", path.display(), err);
            std::process::exit(1);
        }
    }

    let config = javelin_syntax::ParserConfig::with_trace(args.debug);
    let mut failed = false;

    for file in &files {
        info!("parsing {}", file.display());
        let source = match std::fs::read_to_string(file) {
            Ok(source) => source,
            Err(err) => {
                error!("{}: {}", file.display(), err);
                failed = true;
                break;
            }
        };

        match javelin_syntax::parse_with_config(&source, config) {
            Ok(unit) => {
                if args.walk {
                    match serde_json::to_string_pretty(&unit) {
                        Ok(dump) => info!("{}:\n{dump}", file.display()),
                        Err(err) => error!("{}: failed to dump tree: {}", file.display(), err),
                    }
                }
            }
            Err(syntax_error) => {
                error!(
                    "{}: {}",
                    file.display(),
                    javelin_syntax::error::render_error(&source, &syntax_error)
                );
                failed = true;
                break;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// Recursively collects `.java` files under `path`. A bare file is accepted
/// regardless of extension.
fn collect_java_files(path: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    if path.is_dir() {
        let mut entries: Vec<_> = std::fs::read_dir(path)?.collect::<Result<_, _>>()?;
        entries.sort_by_key(|e| e.path());
        for entry in entries {
            let entry_path = entry.path();
            if entry_path.is_dir() {
                collect_java_files(&entry_path, out)?;
            } else if entry_path.extension().is_some_and(|ext| ext == "java") {
                out.push(entry_path);
            }
        }
    } else {
        out.push(path.to_path_buf());
    }
    Ok(())
}
