//! Go and API Blueprint generation from resolved models.
//!
//! Per model:
//! - `controllers/<snake>.go`: gin CRUD handlers
//! - `docs/<snake>.apib`: API Blueprint group
//!
//! Per project:
//! - `controllers/root.go`: endpoint index handler
//! - `docs/index.apib`: API Blueprint entry point
//! - `router/router.go`: route table
//! - `db/db.go`: gorm bootstrap

pub mod context;
pub mod naming;
mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::diagnostic::GeneratorError;
use crate::ir::{Model, ModelSet};
pub use context::{ModelView, ProjectInfo, RenderContext};
pub use templates::{Renderer, TEMPLATES};

/// A generated file kind and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Handlers of the model with this snake_case name.
    Handler(String),
    /// Doc fragment of the model with this snake_case name.
    ModelDoc(String),
    RootHandler,
    IndexDoc,
    Router,
    Database,
}

impl Artifact {
    /// Aggregate artifacts in render order.
    pub const AGGREGATE: [Artifact; 4] = [
        Artifact::RootHandler,
        Artifact::IndexDoc,
        Artifact::Router,
        Artifact::Database,
    ];

    /// Per-model artifacts of `model`.
    pub fn for_model(model: &Model) -> [Artifact; 2] {
        let snake = naming::to_snake_case(&model.name);
        [Artifact::Handler(snake.clone()), Artifact::ModelDoc(snake)]
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            Artifact::Handler(_) => "handler.go.tmpl",
            Artifact::ModelDoc(_) => "model.apib.tmpl",
            Artifact::RootHandler => "root_handler.go.tmpl",
            Artifact::IndexDoc => "index.apib.tmpl",
            Artifact::Router => "router.go.tmpl",
            Artifact::Database => "db.go.tmpl",
        }
    }

    /// Path relative to the project directory.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            Artifact::Handler(snake) => Path::new("controllers").join(format!("{snake}.go")),
            Artifact::ModelDoc(snake) => Path::new("docs").join(format!("{snake}.apib")),
            Artifact::RootHandler => Path::new("controllers").join("root.go"),
            Artifact::IndexDoc => Path::new("docs").join("index.apib"),
            Artifact::Router => Path::new("router").join("router.go"),
            Artifact::Database => Path::new("db").join("db.go"),
        }
    }
}

/// Rendered content of one artifact.
#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub artifact: Artifact,
    pub content: String,
}

/// Whether a write created a file or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteAction {
    Create,
    Update,
}

impl WriteAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteAction::Create => "create",
            WriteAction::Update => "update",
        }
    }
}

/// A file written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub action: WriteAction,
}

/// Renders the handler and doc fragment of one model.
pub fn render_model(
    renderer: &Renderer,
    project: &ProjectInfo,
    model: &Model,
) -> Result<Vec<RenderedFile>, GeneratorError> {
    let ctx = RenderContext::model(project, model);

    Artifact::for_model(model)
        .into_iter()
        .map(|artifact| {
            let content = renderer.render(artifact.template_name(), &ctx)?;
            Ok(RenderedFile { artifact, content })
        })
        .collect()
}

/// Renders one aggregate artifact over the whole model set.
pub fn render_aggregate(
    renderer: &Renderer,
    project: &ProjectInfo,
    models: &ModelSet,
    artifact: Artifact,
) -> Result<RenderedFile, GeneratorError> {
    let ctx = RenderContext::project(project, models);
    let content = renderer.render(artifact.template_name(), &ctx)?;
    Ok(RenderedFile { artifact, content })
}

/// Writes a rendered file below `out_dir`, creating parent directories and
/// replacing any existing file.
pub fn write_file(out_dir: &Path, file: &RenderedFile) -> Result<WrittenFile, GeneratorError> {
    let path = out_dir.join(file.artifact.relative_path());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::CreateDirFailed {
            path: parent.to_path_buf(),
            message: e.to_string(),
        })?;
    }

    let action = if path.exists() {
        WriteAction::Update
    } else {
        WriteAction::Create
    };

    fs::write(&path, &file.content).map_err(|e| GeneratorError::WriteFailed {
        path: path.clone(),
        message: e.to_string(),
    })?;

    tracing::info!(action = action.as_str(), path = %path.display(), "wrote file");
    Ok(WrittenFile { path, action })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::associate::resolve_all;
    use crate::diagnostic::Span;
    use crate::frontend::go::ImportPath;
    use crate::ir::{Field, TypeRef};
    use tempfile::TempDir;

    fn project(namespace: &str) -> ProjectInfo {
        ProjectInfo::new(
            ImportPath::parse("github.com/wantedly/api-server").unwrap(),
            namespace.to_string(),
            Some("postgres".to_string()),
        )
    }

    fn models() -> ModelSet {
        let span = || Span::new(PathBuf::from("models/user.go"), 1, 1, 1, 1);
        let user = Model::new(
            "User",
            vec![
                Field::new("ID", TypeRef::named("uint")).with_serialized_name("id"),
                Field::new("Name", TypeRef::named("string")).with_serialized_name("name"),
                Field::new("Emails", TypeRef::named("Email").pointer().collection())
                    .with_serialized_name("emails"),
                Field::new("CreatedAt", TypeRef::qualified("time", "Time").pointer())
                    .with_serialized_name("created_at"),
            ],
            span(),
        );
        let email = Model::new(
            "Email",
            vec![
                Field::new("ID", TypeRef::named("uint")).with_serialized_name("id"),
                Field::new("UserID", TypeRef::named("uint")).with_serialized_name("user_id"),
                Field::new("Address", TypeRef::named("string")).with_serialized_name("address"),
            ],
            span(),
        );

        let mut set = ModelSet::from_models(vec![user, email]).unwrap();
        resolve_all(&mut set);
        set
    }

    #[test]
    fn artifact_paths() {
        assert_eq!(
            Artifact::Handler("job_history".into()).relative_path(),
            Path::new("controllers/job_history.go")
        );
        assert_eq!(
            Artifact::ModelDoc("user".into()).relative_path(),
            Path::new("docs/user.apib")
        );
        assert_eq!(Artifact::Router.relative_path(), Path::new("router/router.go"));
        assert_eq!(Artifact::Database.relative_path(), Path::new("db/db.go"));
    }

    #[test]
    fn renders_handler_like_the_hand_written_fixture() {
        let renderer = Renderer::new().unwrap();
        let models = models();
        let files = render_model(&renderer, &project(""), models.get("User").unwrap()).unwrap();

        assert_eq!(files.len(), 2);
        let handler = &files[0].content;
        assert_eq!(files[0].artifact, Artifact::Handler("user".into()));
        assert!(handler.starts_with("package controllers\n"));
        assert!(handler.contains("dbpkg \"github.com/wantedly/api-server/db\""));
        assert!(handler.contains("func GetUsers(c *gin.Context) {"));
        assert!(handler.contains("func GetUser(c *gin.Context) {"));
        assert!(handler.contains("func CreateUser(c *gin.Context) {"));
        assert!(handler.contains("func UpdateUser(c *gin.Context) {"));
        assert!(handler.contains("func DeleteUser(c *gin.Context) {"));
        assert!(handler.contains("\tvar users []models.User\n"));
        assert!(handler.contains("for _, user := range users {"));
        assert!(handler.contains("\"user with id#\" + id + \" not found\""));
    }

    #[test]
    fn renders_model_doc_with_request_params() {
        let renderer = Renderer::new().unwrap();
        let models = models();
        let files = render_model(&renderer, &project("api"), models.get("User").unwrap()).unwrap();

        let doc = &files[1].content;
        assert_eq!(files[1].artifact, Artifact::ModelDoc("user".into()));
        assert!(doc.starts_with("# Group Users\n"));
        assert!(doc.contains("## Users [/api/users{?ids,fields,preloads,pretty}]"));
        assert!(doc.contains("### Create a user [POST]"));
        assert!(doc.contains("        + name: *NAME* (string)\n"));
        assert!(doc.contains("        + emails (array[email])\n"));
        assert!(!doc.contains("        + id"));
        assert!(doc.contains("## User (object)\n"));
        assert!(doc.contains("+ id: 1 (number)\n"));
        assert!(doc.contains("+ created_at: `2000-01-01 00:00:00` (string)\n"));
    }

    #[test]
    fn renders_router_with_namespace() {
        let renderer = Renderer::new().unwrap();
        let file = render_aggregate(&renderer, &project("/api"), &models(), Artifact::Router).unwrap();

        let router = &file.content;
        assert!(router.contains("\"github.com/wantedly/api-server/controllers\""));
        assert!(router.contains("api := r.Group(\"/api\")"));
        assert!(router.contains("api.GET(\"/emails\", controllers.GetEmails)"));
        assert!(router.contains("api.DELETE(\"/users/:id\", controllers.DeleteUser)"));
        // Sorted model order.
        assert!(router.find("GetEmails").unwrap() < router.find("GetUsers").unwrap());
    }

    #[test]
    fn renders_root_handler_and_db() {
        let renderer = Renderer::new().unwrap();
        let models = models();
        let info = project("api");

        let root = render_aggregate(&renderer, &info, &models, Artifact::RootHandler).unwrap();
        assert!(root.content.contains("\"users_url\": baseURL + \"/api/users\","));
        assert!(root.content.contains("\"email_url\": baseURL + \"/api/emails/{id}\","));

        let db = render_aggregate(&renderer, &info, &models, Artifact::Database).unwrap();
        assert!(db.content.contains("_ \"github.com/jinzhu/gorm/dialects/postgres\""));
        assert!(db.content.contains("gorm.Open(\"postgres\", dbURL)"));
        assert!(db.content.contains("\t\t\t&models.Email{},\n\t\t\t&models.User{},\n"));

        let index = render_aggregate(&renderer, &info, &models, Artifact::IndexDoc).unwrap();
        assert!(index.content.starts_with("FORMAT: 1A\n"));
        assert!(index.content.contains("# api-server\n"));
        assert!(index.content.contains("<!-- include(user.apib) -->"));
    }

    #[test]
    fn write_file_creates_then_updates() {
        let dir = TempDir::new().unwrap();
        let file = RenderedFile {
            artifact: Artifact::Router,
            content: "package router\n".to_string(),
        };

        let first = write_file(dir.path(), &file).unwrap();
        assert_eq!(first.action, WriteAction::Create);
        assert_eq!(first.path, dir.path().join("router/router.go"));

        let second = write_file(dir.path(), &RenderedFile {
            content: "package router // v2\n".to_string(),
            ..file
        })
        .unwrap();
        assert_eq!(second.action, WriteAction::Update);
        assert_eq!(
            fs::read_to_string(&second.path).unwrap(),
            "package router // v2\n"
        );
    }
}
