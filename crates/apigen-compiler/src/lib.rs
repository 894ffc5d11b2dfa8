//! # apigen compiler
//!
//! Generates a gin + gorm REST API layer from Go model declarations.
//!
//! ## Architecture
//!
//! ```text
//! models/*.go
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Frontend   │  tree-sitter-go, one task per file
//! │  (Go → IR)   │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Associate   │  has-many / has-one / belongs-to
//! │   (IR)       │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  minijinja templates, one task per model,
//! │ (IR → files) │  then the aggregate files
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apigen_compiler::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     out_dir: "api-server".into(),
//!     ..Default::default()
//! };
//!
//! let report = Generator::new(config).generate().await?;
//! println!("{} models", report.models.len());
//! ```

pub mod associate;
pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;
pub mod tasks;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use codegen::{Artifact, ProjectInfo, Renderer, WriteAction, WrittenFile};
use frontend::go::{self as go_frontend, ImportPath};
use ir::ModelSet;

pub use config::GeneratorConfig;
pub use diagnostic::GeneratorError;

/// Orchestrates a generation run.
pub struct Generator {
    config: GeneratorConfig,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateReport {
    /// Models found, by name.
    pub models: Vec<String>,
    pub handler_files: usize,
    pub doc_files: usize,
    pub aggregate_files: usize,
    pub written: Vec<WrittenFile>,
}

impl GenerateReport {
    pub fn created(&self) -> usize {
        self.written.iter().filter(|f| f.action == WriteAction::Create).count()
    }

    pub fn updated(&self) -> usize {
        self.written.iter().filter(|f| f.action == WriteAction::Update).count()
    }
}

/// Result of a check run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub models: ModelSet,
    pub project: ProjectInfo,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generates handlers, docs, router and database bootstrap.
    ///
    /// Phases run strictly in order and the first error stops the run.
    /// Files written before the error stay on disk.
    pub async fn generate(&self) -> Result<GenerateReport, GeneratorError> {
        // Templates first, so a broken override fails before any work.
        let renderer = Arc::new(Renderer::with_overrides(self.config.template_dir.as_deref())?);

        // Phases 1-3: collect, order, resolve
        let models = Arc::new(self.load_models().await?);

        // Phase 4: introspect
        let project = Arc::new(self.introspect()?);

        let mut report = GenerateReport {
            models: models.iter().map(|m| m.name.clone()).collect(),
            ..Default::default()
        };

        // Phase 5: per-model artifacts
        let out_dir = Arc::new(self.config.out_dir.clone());
        let per_model = {
            let (renderer, project, models, out_dir) = (
                Arc::clone(&renderer),
                Arc::clone(&project),
                Arc::clone(&models),
                Arc::clone(&out_dir),
            );
            tasks::fan_out((0..models.len()).collect::<Vec<usize>>(), self.config.concurrency, move |idx| {
                let files = codegen::render_model(&renderer, &project, &models[idx])?;
                files
                    .iter()
                    .map(|file| codegen::write_file(&out_dir, file))
                    .collect::<Result<Vec<_>, _>>()
            })
            .await?
        };
        for written in per_model.into_iter().flatten() {
            match written.path.extension().and_then(|e| e.to_str()) {
                Some("apib") => report.doc_files += 1,
                _ => report.handler_files += 1,
            }
            report.written.push(written);
        }

        // Phase 6: aggregate artifacts, sequentially
        for artifact in Artifact::AGGREGATE {
            let file = codegen::render_aggregate(&renderer, &project, &models, artifact)?;
            report.written.push(codegen::write_file(&out_dir, &file)?);
            report.aggregate_files += 1;
        }

        tracing::info!(
            models = report.models.len(),
            created = report.created(),
            updated = report.updated(),
            "generation complete"
        );
        Ok(report)
    }

    /// Parses, resolves and introspects without writing anything.
    pub async fn check(&self) -> Result<CheckReport, GeneratorError> {
        Renderer::with_overrides(self.config.template_dir.as_deref())?;
        let models = self.load_models().await?;
        let project = self.introspect()?;
        Ok(CheckReport { models, project })
    }

    /// Collects every model of the model directory and resolves associations.
    pub async fn load_models(&self) -> Result<ModelSet, GeneratorError> {
        let model_dir = self.config.model_dir();
        let files: Vec<PathBuf> = go_frontend::discover_model_files(&model_dir)?;
        tracing::debug!(dir = %model_dir.display(), files = files.len(), "collecting models");

        // Phase 1: collect
        let parsed = tasks::fan_out(files, self.config.concurrency, |path: PathBuf| {
            go_frontend::parse_model_file(&path)
        })
        .await?;

        // Phase 2: order
        let mut models = ModelSet::from_models(parsed.into_iter().flatten().collect())?;
        if models.is_empty() {
            tracing::warn!(dir = %model_dir.display(), "no models found");
        }

        // Phase 3: resolve
        associate::resolve_all(&mut models);
        Ok(models)
    }

    /// Reads the project facts templates need.
    pub fn introspect(&self) -> Result<ProjectInfo, GeneratorError> {
        let import_dir = go_frontend::detect_import_path(&self.config.entry_file())?;
        let import_path = ImportPath::parse(&import_dir)?;
        let namespace = go_frontend::detect_namespace(&self.config.routing_file())?;
        let database = go_frontend::detect_database(&self.config.database_file())?;

        if database.is_none() {
            tracing::debug!(
                default = codegen::context::DEFAULT_DATABASE,
                "no gorm dialect import found"
            );
        }

        Ok(ProjectInfo::new(import_path, namespace, database))
    }
}
