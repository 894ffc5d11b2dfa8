//! apigen CLI.
//!
//! Generates gin handlers, routes and API Blueprint docs for the gorm models
//! of a Go project.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use apigen_compiler::config::default_concurrency;
use apigen_compiler::{Generator, GeneratorConfig};

mod logging;
mod ui;

#[derive(Parser)]
#[command(name = "apigen", version)]
#[command(about = "Generate REST handlers, routes and API docs from Go models")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate handlers, docs, router and database bootstrap
    Gen(ProjectArgs),

    /// Parse models and inspect the project without writing anything
    Check(ProjectArgs),
}

#[derive(Args, Debug, Clone)]
struct ProjectArgs {
    /// Go project directory
    #[arg(short = 'd', long = "dir", env = "APIGEN_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Model directory, relative to the project
    #[arg(short, long, env = "APIGEN_MODEL_DIR", default_value = "models")]
    models: PathBuf,

    /// Entry file, relative to the project
    #[arg(long, env = "APIGEN_ENTRY_FILE", default_value = "main.go")]
    entry: PathBuf,

    /// Routing file, relative to the project
    #[arg(long, env = "APIGEN_ROUTING_FILE", default_value = "router/router.go")]
    router: PathBuf,

    /// Database bootstrap file, relative to the project
    #[arg(long, env = "APIGEN_DATABASE_FILE", default_value = "db/db.go")]
    database: PathBuf,

    /// Maximum parallel parse and render tasks
    #[arg(short = 'j', long, env = "APIGEN_CONCURRENCY")]
    concurrency: Option<usize>,

    /// Directory of template overrides
    #[arg(short, long, env = "APIGEN_TEMPLATES")]
    templates: Option<PathBuf>,

    /// Print a JSON report on stdout
    #[arg(long)]
    json: bool,
}

impl ProjectArgs {
    fn config(&self) -> GeneratorConfig {
        let config = GeneratorConfig {
            out_dir: self.out_dir.clone(),
            model_dir: self.models.clone(),
            entry_file: self.entry.clone(),
            routing_file: self.router.clone(),
            database_file: self.database.clone(),
            concurrency: self.concurrency.unwrap_or_else(default_concurrency).max(1),
            template_dir: self.templates.clone(),
        };
        tracing::debug!(?config, "resolved configuration");
        config
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    if cli.global.no_color {
        ui::disable_colors();
    }
    logging::init_logging(&cli.global)?;

    let quiet = cli.global.quiet;

    match cli.command {
        Commands::Gen(args) => generate(args, quiet).await,
        Commands::Check(args) => check(args, quiet).await,
    }
}

async fn generate(args: ProjectArgs, quiet: bool) -> miette::Result<()> {
    let human = !args.json && !quiet;
    if human {
        ui::header(env!("CARGO_PKG_VERSION"));
    }

    let spinner = ui::spinner("Generating...", human);
    let generator = Generator::new(args.config());

    match generator.generate().await {
        Ok(report) => {
            spinner.finish_and_clear();

            if args.json {
                let json = serde_json::to_string_pretty(&report)
                    .map_err(|e| miette::miette!("Failed to serialize report: {e}"))?;
                println!("{json}");
            } else if human {
                for file in &report.written {
                    ui::written(file, &args.out_dir);
                }
                println!();
                ui::success(&format!(
                    "{} models {} {} created {} {} updated",
                    report.models.len(),
                    ui::symbols::DOT,
                    report.created(),
                    ui::symbols::DOT,
                    report.updated()
                ));
            }
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            if human {
                ui::error("Generation failed");
            }
            Err(e.into())
        }
    }
}

async fn check(args: ProjectArgs, quiet: bool) -> miette::Result<()> {
    let human = !args.json && !quiet;
    let spinner = ui::spinner("Checking models...", human);
    let generator = Generator::new(args.config());

    match generator.check().await {
        Ok(report) => {
            spinner.finish_and_clear();

            if args.json {
                let json = serde_json::to_string_pretty(&report)
                    .map_err(|e| miette::miette!("Failed to serialize report: {e}"))?;
                println!("{json}");
            } else if human {
                ui::success(&format!(
                    "{} models {} {}",
                    report.models.len(),
                    ui::symbols::DOT,
                    report.project.import_dir
                ));
                for model in &report.models {
                    let relations = model
                        .fields
                        .iter()
                        .filter_map(|f| {
                            let assoc = f.association.as_ref()?;
                            let target = assoc.target.as_ref()?;
                            Some(format!("{} {} {}", f.name, assoc.kind.as_str(), target))
                        })
                        .collect::<Vec<_>>();

                    if relations.is_empty() {
                        ui::info(&model.name);
                    } else {
                        ui::info(&format!("{} ({})", model.name, relations.join(", ")));
                    }
                }
                if !report.project.namespace.is_empty() {
                    ui::dim(&format!("namespace {}", report.project.namespace));
                }
                ui::dim(&format!("database {}", report.project.database));
            }
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            if human {
                ui::error("Check failed");
            }
            Err(e.into())
        }
    }
}
