//! Render contexts handed to templates.
//!
//! Each artifact kind gets a statically shaped context: per-model templates
//! see one [`ModelView`], aggregate templates see all of them. Every name
//! variant a template needs is precomputed here.

use serde::Serialize;

use crate::frontend::go::ImportPath;
use crate::ir::{AssociationKind, Field, Model, ModelSet};
use super::naming::{pluralize, to_lower_camel, to_original_case, to_snake_case};

/// Database assumed when `db/db.go` declares no gorm dialect.
pub const DEFAULT_DATABASE: &str = "sqlite";

/// Fields maintained by gorm itself, never accepted as request parameters.
pub const MANAGED_FIELDS: &[&str] = &["ID", "CreatedAt", "UpdatedAt"];

/// Project facts recovered by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    /// Root import directory, e.g. `github.com/wantedly/api-server`.
    pub import_dir: String,
    pub vcs: String,
    pub user: String,
    pub project: String,
    /// Route group prefix, empty when none is declared.
    pub namespace: String,
    /// Namespace as a URL path prefix: `api` and `/api/` both give `/api`.
    pub api_prefix: String,
    /// gorm dialect package name (`postgres`, `mysql`, `sqlite`, ...).
    pub database: String,
    /// Driver name passed to `gorm.Open`.
    pub dialect: String,
}

impl ProjectInfo {
    pub fn new(import_path: ImportPath, namespace: String, database: Option<String>) -> Self {
        let database = database.unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let dialect = match database.as_str() {
            "sqlite" => "sqlite3".to_string(),
            other => other.to_string(),
        };

        let api_prefix = match namespace.trim_matches('/') {
            "" => String::new(),
            trimmed => format!("/{trimmed}"),
        };

        Self {
            import_dir: import_path.dir,
            vcs: import_path.vcs,
            user: import_path.user,
            project: import_path.project,
            namespace,
            api_prefix,
            database,
            dialect,
        }
    }
}

/// A model with every name variant the templates use.
#[derive(Debug, Clone, Serialize)]
pub struct ModelView {
    /// `JobHistory`
    pub name: String,
    /// `JobHistories`
    pub plural: String,
    /// `job_history`
    pub snake: String,
    /// `job_histories`
    pub plural_snake: String,
    /// `jobHistory`
    pub lower_camel: String,
    /// `jobHistories`
    pub plural_lower_camel: String,
    /// `job history`
    pub original: String,
    /// `job histories`
    pub plural_original: String,
    pub fields: Vec<FieldView>,
}

impl ModelView {
    pub fn new(model: &Model) -> Self {
        let plural = pluralize(&model.name);
        Self {
            name: model.name.clone(),
            snake: to_snake_case(&model.name),
            plural_snake: to_snake_case(&plural),
            lower_camel: to_lower_camel(&model.name),
            plural_lower_camel: to_lower_camel(&plural),
            original: to_original_case(&model.name),
            plural_original: to_original_case(&plural),
            plural,
            fields: model.fields.iter().map(FieldView::new).collect(),
        }
    }
}

/// A field as seen by templates.
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: String,
    pub json_name: String,
    /// Go type as declared, empty when undetermined.
    pub declared_type: String,
    /// Raw tag literal, empty when absent.
    pub tag: String,
    pub association: AssociationKind,
    pub target: Option<String>,
    /// API Blueprint (MSON) type, empty when unknown.
    pub apib_type: String,
    pub apib_default: String,
    pub apib_example: String,
    /// Maintained by gorm (`ID`, `CreatedAt`, `UpdatedAt`).
    pub managed: bool,
}

impl FieldView {
    pub fn new(field: &Field) -> Self {
        let apib_default = apib_default(field);
        Self {
            name: field.name.clone(),
            json_name: field.serialized_name.clone(),
            declared_type: field.declared_type.to_string(),
            tag: field.raw_tag.clone().unwrap_or_default(),
            association: field.association_kind().unwrap_or(AssociationKind::None),
            target: field.association.as_ref().and_then(|a| a.target.clone()),
            apib_type: apib_type(field),
            apib_example: apib_example(&apib_default),
            apib_default,
            managed: MANAGED_FIELDS.contains(&field.name.as_str()),
        }
    }
}

/// MSON type of a field.
pub fn apib_type(field: &Field) -> String {
    let primitive = match field.declared_type.to_string().as_str() {
        "bool" => "boolean",
        "string" | "time.Time" | "*time.Time" => "string",
        "complex64" | "complex128" | "float32" | "float64" | "int" | "int8" | "int16"
        | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32" | "uint64" => "number",
        "sql.NullBool" => "boolean, nullable",
        "sql.NullFloat64" | "sql.NullInt64" => "number, nullable",
        "sql.NullString" => "string, nullable",
        _ => "",
    };
    if !primitive.is_empty() {
        return primitive.to_string();
    }

    let Some(association) = &field.association else {
        return String::new();
    };
    let Some(target) = &association.target else {
        return String::new();
    };

    let name = target.to_lowercase();
    match association.kind {
        AssociationKind::None => String::new(),
        _ if field.declared_type.is_collection() => format!("array[{name}]"),
        _ => name,
    }
}

/// Example value shown in the MSON attribute list.
pub fn apib_default(field: &Field) -> String {
    match field.declared_type.to_string().as_str() {
        "bool" | "sql.NullBool" => "false".to_string(),
        "complex64" | "complex128" | "float32" | "float64" | "sql.NullFloat64" => "1.1".to_string(),
        "int" | "int8" | "int16" | "int32" | "int64" | "sql.NullInt64" | "uint" | "uint8"
        | "uint16" | "uint32" | "uint64" => "1".to_string(),
        "string" | "sql.NullString" => field.name.to_uppercase(),
        "time.Time" | "*time.Time" => "`2000-01-01 00:00:00`".to_string(),
        _ => String::new(),
    }
}

/// Emphasized form of a default value, `` `*...*` `` for code spans.
pub fn apib_example(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match value.strip_prefix('`').and_then(|v| v.strip_suffix('`')) {
        Some(inner) => format!("`*{inner}*`"),
        None => format!("*{value}*"),
    }
}

/// Context of per-model artifacts (handler, doc fragment).
#[derive(Debug, Serialize)]
pub struct ModelContext<'a> {
    pub project: &'a ProjectInfo,
    pub model: ModelView,
}

/// Context of aggregate artifacts (root handler, index doc, router, db).
#[derive(Debug, Serialize)]
pub struct ProjectContext<'a> {
    pub project: &'a ProjectInfo,
    pub models: Vec<ModelView>,
}

impl<'a> ProjectContext<'a> {
    pub fn new(project: &'a ProjectInfo, models: &ModelSet) -> Self {
        Self {
            project,
            models: models.iter().map(ModelView::new).collect(),
        }
    }
}

/// Any render context.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RenderContext<'a> {
    Model(ModelContext<'a>),
    Project(ProjectContext<'a>),
}

impl<'a> RenderContext<'a> {
    pub fn model(project: &'a ProjectInfo, model: &Model) -> Self {
        RenderContext::Model(ModelContext {
            project,
            model: ModelView::new(model),
        })
    }

    pub fn project(project: &'a ProjectInfo, models: &ModelSet) -> Self {
        RenderContext::Project(ProjectContext::new(project, models))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Association, FieldType, TypeRef};

    fn field(name: &str, ty: impl Into<FieldType>) -> Field {
        Field::new(name, ty)
    }

    #[test]
    fn sqlite_is_the_default_database() {
        let import = ImportPath::parse("github.com/acme/shop").unwrap();
        let info = ProjectInfo::new(import.clone(), String::new(), None);
        assert_eq!(info.database, "sqlite");
        assert_eq!(info.dialect, "sqlite3");
        assert_eq!(info.api_prefix, "");

        let info = ProjectInfo::new(import, "/api".into(), Some("postgres".into()));
        assert_eq!(info.dialect, "postgres");
        assert_eq!(info.namespace, "/api");
        assert_eq!(info.api_prefix, "/api");
        assert_eq!(info.project, "shop");
    }

    #[test]
    fn model_view_names() {
        let model = Model::new(
            "JobHistory",
            vec![],
            crate::diagnostic::Span::new("m.go".into(), 1, 1, 1, 1),
        );
        let view = ModelView::new(&model);
        assert_eq!(view.plural, "JobHistories");
        assert_eq!(view.snake, "job_history");
        assert_eq!(view.plural_snake, "job_histories");
        assert_eq!(view.lower_camel, "jobHistory");
        assert_eq!(view.plural_lower_camel, "jobHistories");
        assert_eq!(view.original, "job history");
        assert_eq!(view.plural_original, "job histories");
    }

    #[test]
    fn apib_types() {
        assert_eq!(apib_type(&field("Active", TypeRef::named("bool"))), "boolean");
        assert_eq!(apib_type(&field("At", TypeRef::qualified("time", "Time").pointer())), "string");
        assert_eq!(apib_type(&field("Age", TypeRef::named("uint"))), "number");
        assert_eq!(
            apib_type(&field("Nick", TypeRef::qualified("sql", "NullString"))),
            "string, nullable"
        );

        let mut emails = field("Emails", TypeRef::named("Email").collection());
        emails.association = Some(Association::new(AssociationKind::HasMany, "Email"));
        assert_eq!(apib_type(&emails), "array[email]");

        let mut profile = field("Profile", TypeRef::named("Profile").pointer());
        profile.association = Some(Association::new(AssociationKind::HasOne, "Profile"));
        assert_eq!(apib_type(&profile), "profile");

        let mut meta = field("Meta", FieldType::Undetermined);
        meta.association = Some(Association::none());
        assert_eq!(apib_type(&meta), "");
    }

    #[test]
    fn apib_defaults_and_examples() {
        let name = field("Name", TypeRef::named("string"));
        assert_eq!(apib_default(&name), "NAME");
        assert_eq!(apib_example("NAME"), "*NAME*");

        let at = field("CreatedAt", TypeRef::qualified("time", "Time").pointer());
        assert_eq!(apib_default(&at), "`2000-01-01 00:00:00`");
        assert_eq!(apib_example(&apib_default(&at)), "`*2000-01-01 00:00:00*`");

        assert_eq!(apib_example(""), "");
    }

    #[test]
    fn managed_fields_are_flagged() {
        let id = FieldView::new(&field("ID", TypeRef::named("uint")));
        let name = FieldView::new(&field("Name", TypeRef::named("string")).with_raw_tag("`json:\"name\"`"));
        assert!(id.managed);
        assert!(!name.managed);
        assert_eq!(name.tag, "`json:\"name\"`");
        assert_eq!(name.association, AssociationKind::None);
    }
}
