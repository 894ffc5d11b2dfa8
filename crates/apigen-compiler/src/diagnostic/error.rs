//! Generator error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during generation.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to read '{}': {message}", path.display())]
    #[diagnostic(code(apigen::io::read_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to write '{}': {message}", path.display())]
    #[diagnostic(code(apigen::io::write_error))]
    WriteFailed {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to create directory '{}': {message}", path.display())]
    #[diagnostic(code(apigen::io::create_dir_failed))]
    CreateDirFailed {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("Failed to initialize Go parser")]
    #[diagnostic(code(apigen::parse::init_failed))]
    ParserInitFailed,

    #[error("Failed to parse file: {}", path.display())]
    #[diagnostic(code(apigen::parse::parse_failed))]
    ParseFailed {
        path: PathBuf,
    },

    #[error("Syntax error in {}:{line}:{column}", file.display())]
    #[diagnostic(
        code(apigen::parse::syntax_error),
        help("Fix the Go source so that `go build` accepts it, then rerun the generator.")
    )]
    SyntaxError {
        file: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("Field declaration '{names}' in struct '{model}' declares more than one name ({}:{line})", file.display())]
    #[diagnostic(
        code(apigen::parse::multiple_field_names),
        help("Declare every field on its own line, e.g. `FirstName string` and `LastName string`.")
    )]
    MultipleFieldNames {
        model: String,
        names: String,
        file: PathBuf,
        line: usize,
    },

    #[error("Duplicate model name: {name} (declared in {} and {})", first.display(), second.display())]
    #[diagnostic(
        code(apigen::parse::duplicate_model),
        help("Model names must be unique across the model directory.")
    )]
    DuplicateModel {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    // =========================================================================
    // Project Errors
    // =========================================================================
    #[error("Can't determine the project import path from '{}'", file.display())]
    #[diagnostic(
        code(apigen::project::import_path_not_found),
        help("The entry file must import at least one package of the project, e.g. \"github.com/you/app/server\".")
    )]
    ImportPathNotFound {
        file: PathBuf,
    },

    #[error("Conflicting import paths in '{}': {}", file.display(), candidates.join(", "))]
    #[diagnostic(
        code(apigen::project::conflicting_import_path),
        help("The entry file may only import packages below a single project root.")
    )]
    ConflictingImportPath {
        file: PathBuf,
        candidates: Vec<String>,
    },

    #[error("Invalid import path: {path}")]
    #[diagnostic(
        code(apigen::project::invalid_import_path),
        help("Import paths must look like <host>/<user>/<project>, e.g. github.com/you/app.")
    )]
    InvalidImportPath {
        path: String,
    },

    // =========================================================================
    // Render Errors
    // =========================================================================
    #[error("Failed to render template '{template}': {message}")]
    #[diagnostic(code(apigen::render::template_failed))]
    TemplateFailed {
        template: String,
        message: String,
    },

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    #[error("Worker task failed: {message}")]
    #[diagnostic(code(apigen::runtime::task_failed))]
    TaskFailed {
        message: String,
    },
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a template error.
    pub fn template(template: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::TemplateFailed {
            template: template.into(),
            message: err.to_string(),
        }
    }
}
