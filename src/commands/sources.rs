//! Input enumeration and cleanup.
//!
//! Thin wrappers over the filesystem: turning command-line tokens into
//! concrete input paths, and removing inputs after a successful combine.

use log::{debug, error, warn};
use std::path::{Path, PathBuf};

/// Resolve path-or-pattern tokens into existing files
///
/// **Public** - used by execute_combine
///
/// A token naming an existing path is kept verbatim. Anything else is
/// treated as a shell pattern and expanded; only existing matches are
/// kept, in the order the pattern yields them. Results follow token order.
pub fn resolve_inputs<S: AsRef<str>>(tokens: &[S]) -> Vec<PathBuf> {
    let mut inputs = Vec::new();

    for token in tokens {
        let token = token.as_ref();

        if Path::new(token).exists() {
            inputs.push(PathBuf::from(token));
            continue;
        }

        let matches = match glob::glob(token) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Invalid input pattern {:?}: {}", token, e);
                continue;
            }
        };

        let before = inputs.len();
        for entry in matches {
            match entry {
                Ok(path) if path.exists() => inputs.push(path),
                Ok(_) => {}
                Err(e) => warn!("Glob iteration error: {}", e),
            }
        }

        if inputs.len() == before {
            warn!("No input matches {:?}", token);
        } else {
            debug!("Pattern {:?} matched {} files", token, inputs.len() - before);
        }
    }

    inputs
}

/// Delete input files
///
/// **Public** - only called after the combined file was written
///
/// # Returns
/// true if every file was removed
pub fn delete_inputs(paths: &[PathBuf]) -> bool {
    let mut all_removed = true;

    for path in paths {
        debug!("Deleting file {}", path.display());
        if let Err(e) = std::fs::remove_file(path) {
            error!("Error removing file {}: {}", path.display(), e);
            all_removed = false;
        }
    }

    all_removed
}
