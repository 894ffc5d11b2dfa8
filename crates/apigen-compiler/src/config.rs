//! Generator configuration.

use std::path::PathBuf;

/// Configuration for a generation run.
///
/// Every path except `out_dir` and `template_dir` is relative to `out_dir`,
/// the root of the Go project being generated into.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Project directory.
    pub out_dir: PathBuf,

    /// Directory holding model declarations.
    pub model_dir: PathBuf,

    /// File whose imports reveal the project import path.
    pub entry_file: PathBuf,

    /// File whose `Initialize` declares the route namespace.
    pub routing_file: PathBuf,

    /// File whose gorm dialect import selects the database.
    pub database_file: PathBuf,

    /// Maximum number of files parsed or models rendered at once.
    pub concurrency: usize,

    /// Directory of template overrides.
    pub template_dir: Option<PathBuf>,
}

impl GeneratorConfig {
    pub fn model_dir(&self) -> PathBuf {
        self.out_dir.join(&self.model_dir)
    }

    pub fn entry_file(&self) -> PathBuf {
        self.out_dir.join(&self.entry_file)
    }

    pub fn routing_file(&self) -> PathBuf {
        self.out_dir.join(&self.routing_file)
    }

    pub fn database_file(&self) -> PathBuf {
        self.out_dir.join(&self.database_file)
    }
}

/// Available parallelism, at least 1.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            model_dir: PathBuf::from("models"),
            entry_file: PathBuf::from("main.go"),
            routing_file: PathBuf::from("router/router.go"),
            database_file: PathBuf::from("db/db.go"),
            concurrency: default_concurrency(),
            template_dir: None,
        }
    }
}
