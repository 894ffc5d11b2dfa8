//! Go frontend.
//!
//! Reads model declarations and generated project files with tree-sitter-go.

pub mod parser;
pub mod project;
pub mod tag;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::diagnostic::GeneratorError;
use crate::ir::Model;

pub use parser::GoParser;
pub use project::{detect_database, detect_import_path, detect_namespace, ImportPath};

/// Reads a source file to a string.
pub fn read_source(path: &Path) -> Result<String, GeneratorError> {
    std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e.to_string()))
}

/// Lists the model declaration files directly inside `dir`, sorted by path.
///
/// Subdirectories and `_test.go` files are skipped.
pub fn discover_model_files(dir: &Path) -> Result<Vec<PathBuf>, GeneratorError> {
    if !dir.is_dir() {
        return Err(GeneratorError::io(dir, "model directory not found"));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| GeneratorError::io(dir, e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.ends_with(".go") && !name.ends_with("_test.go") {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Reads and parses one model declaration file.
pub fn parse_model_file(path: &Path) -> Result<Vec<Model>, GeneratorError> {
    let source = read_source(path)?;
    let mut parser = GoParser::new()?;
    let models = parser.parse_models(&source, path)?;

    tracing::debug!(file = %path.display(), models = models.len(), "parsed model file");
    Ok(models)
}
