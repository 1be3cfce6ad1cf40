use mortgage_core::MortgageConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read one configuration layer from a JSON (or `.yaml`/`.yml`) file.
///
/// A missing, unreadable or malformed file is not an error: the layer is
/// skipped and the previous layers stand.
pub fn read_layer(path: &str) -> Option<MortgageConfig> {
    let canonical = match resolve_path(path) {
        Ok(p) => p,
        Err(reason) => {
            debug!(path, %reason, "configuration layer absent");
            return None;
        }
    };

    let contents = match fs::read_to_string(&canonical) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %canonical.display(), error = %e, "failed to read configuration layer");
            return None;
        }
    };

    match parse_layer(&canonical, &contents) {
        Ok(layer) => {
            debug!(path = %canonical.display(), "loaded configuration layer");
            Some(layer)
        }
        Err(e) => {
            warn!(path = %canonical.display(), error = %e, "ignoring malformed configuration layer");
            None
        }
    }
}

fn parse_layer(path: &Path, contents: &str) -> Result<MortgageConfig, Box<dyn std::error::Error>> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    if is_yaml {
        Ok(serde_yaml::from_str(contents)?)
    } else {
        Ok(serde_json::from_str(contents)?)
    }
}

/// Resolve the path against the working directory and make sure it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, String> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| e.to_string())?
            .join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()));
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()));
    }

    Ok(canonical)
}
