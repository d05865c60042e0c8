//! Resource routing for Opsdeck
//!
//! A resource is one administrable collection on the backend (users,
//! categories, ...). Its configuration carries everything the generic
//! CRUD workflow needs: the endpoint routes, the form schema, and the
//! grid columns. The workflow logic itself exists once; resources are
//! pure data.

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, ConsoleResult};
use crate::traits::Validatable;
use crate::types::{FormSchema, HttpMethod, OrderDir};

// ============================================================================
// Route Templates
// ============================================================================

/// Placeholder substituted with the record id in per-record routes
pub const ID_PLACEHOLDER: &str = "{id}";

/// An endpoint route, optionally parameterized by a record id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTemplate(String);

impl RouteTemplate {
    /// Create a route template
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The raw template string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the template contains the id placeholder
    pub fn is_parameterized(&self) -> bool {
        self.0.contains(ID_PLACEHOLDER)
    }

    /// Substitute the record id into the template
    pub fn with_id(&self, id: i64) -> String {
        self.0.replace(ID_PLACEHOLDER, &id.to_string())
    }
}

impl Validatable for RouteTemplate {
    fn validate(&self) -> ConsoleResult<()> {
        if self.0.trim().is_empty() {
            return Err(ConsoleError::invalid_route("route cannot be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Resource Routes
// ============================================================================

/// The endpoint set of one resource.
///
/// `list`, `create`, `fetch` and `update` are always present; the
/// destructive and toggle routes are optional, and the matching row
/// actions only render when they are configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRoutes {
    /// Server-side list endpoint (grid data source)
    pub list: RouteTemplate,
    /// Create endpoint, target of add submits (POST)
    pub create: RouteTemplate,
    /// Fetch-one endpoint used to populate the edit form (GET)
    pub fetch: RouteTemplate,
    /// Update endpoint, target of edit submits
    pub update: RouteTemplate,
    /// Method used for update submits; backends differ between PUT and PATCH
    pub update_method: HttpMethod,
    /// Hard/soft delete endpoint (DELETE)
    pub delete: Option<RouteTemplate>,
    /// Restore endpoint for soft-deleted records (PATCH)
    pub restore: Option<RouteTemplate>,
    /// Status toggle endpoint (PATCH with a status value)
    pub status: Option<RouteTemplate>,
}

impl ResourceRoutes {
    /// Create the mandatory route set; optional routes default to absent.
    pub fn new(
        list: impl Into<String>,
        create: impl Into<String>,
        fetch: impl Into<String>,
        update: impl Into<String>,
    ) -> Self {
        Self {
            list: RouteTemplate::new(list),
            create: RouteTemplate::new(create),
            fetch: RouteTemplate::new(fetch),
            update: RouteTemplate::new(update),
            update_method: HttpMethod::Put,
            delete: None,
            restore: None,
            status: None,
        }
    }

    /// Use PATCH instead of PUT for update submits
    pub fn update_with_patch(mut self) -> Self {
        self.update_method = HttpMethod::Patch;
        self
    }

    /// Configure the delete route
    pub fn with_delete(mut self, route: impl Into<String>) -> Self {
        self.delete = Some(RouteTemplate::new(route));
        self
    }

    /// Configure the restore route
    pub fn with_restore(mut self, route: impl Into<String>) -> Self {
        self.restore = Some(RouteTemplate::new(route));
        self
    }

    /// Configure the status toggle route
    pub fn with_status(mut self, route: impl Into<String>) -> Self {
        self.status = Some(RouteTemplate::new(route));
        self
    }
}

impl Validatable for ResourceRoutes {
    fn validate(&self) -> ConsoleResult<()> {
        self.list.validate()?;
        self.create.validate()?;
        self.fetch.validate()?;
        self.update.validate()?;
        for route in [&self.fetch, &self.update] {
            if !route.is_parameterized() {
                return Err(ConsoleError::invalid_route(format!(
                    "per-record route '{}' is missing '{ID_PLACEHOLDER}'",
                    route.as_str()
                )));
            }
        }
        for route in [&self.delete, &self.restore, &self.status].into_iter().flatten() {
            route.validate()?;
            if !route.is_parameterized() {
                return Err(ConsoleError::invalid_route(format!(
                    "per-record route '{}' is missing '{ID_PLACEHOLDER}'",
                    route.as_str()
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Grid Columns
// ============================================================================

/// One column of the resource grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Record key rendered in this column
    pub field: String,
    /// Header title
    pub title: String,
    /// Whether the footer filter input is rendered for this column
    pub searchable: bool,
    /// Whether the header toggles ordering on this column
    pub orderable: bool,
}

impl ColumnSpec {
    /// Create a searchable, orderable column
    pub fn new(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            title: title.into(),
            searchable: true,
            orderable: true,
        }
    }

    /// Disable the footer filter for this column
    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Disable ordering on this column
    pub fn not_orderable(mut self) -> Self {
        self.orderable = false;
        self
    }
}

// ============================================================================
// Secondary Forms
// ============================================================================

/// A per-record auxiliary form that bypasses fetch-and-populate.
///
/// Covers flows like "change password": the dialog opens blank, submits
/// against a dedicated per-record endpoint, and never loads the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryForm {
    /// Stable key for the row action button
    pub key: String,
    /// Dialog title
    pub title: String,
    /// Per-record submit endpoint
    pub route: RouteTemplate,
    /// Submit method
    pub method: HttpMethod,
    /// Form schema
    pub schema: FormSchema,
}

impl SecondaryForm {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        route: impl Into<String>,
        method: HttpMethod,
        schema: FormSchema,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            route: RouteTemplate::new(route),
            method,
            schema,
        }
    }
}

impl Validatable for SecondaryForm {
    fn validate(&self) -> ConsoleResult<()> {
        self.route.validate()?;
        if !self.route.is_parameterized() {
            return Err(ConsoleError::invalid_route(format!(
                "secondary form route '{}' is missing '{ID_PLACEHOLDER}'",
                self.route.as_str()
            )));
        }
        self.schema.validate()
    }
}

// ============================================================================
// Resource Configuration
// ============================================================================

/// Everything the generic CRUD workflow needs to administer one
/// backend collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Stable key, used for navigation and component identity
    pub key: String,
    /// Sidebar / dialog title
    pub title: String,
    /// Endpoint set
    pub routes: ResourceRoutes,
    /// Form schema for the add/edit dialog
    pub schema: FormSchema,
    /// Grid columns
    pub columns: Vec<ColumnSpec>,
    /// Initial ordering: column index and direction
    pub default_order: (usize, OrderDir),
    /// Optional per-record auxiliary form (e.g. change password)
    pub secondary: Option<SecondaryForm>,
}

impl ResourceConfig {
    /// Create a resource config with default ordering on the first column,
    /// descending (newest records first).
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        routes: ResourceRoutes,
        schema: FormSchema,
        columns: Vec<ColumnSpec>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            routes,
            schema,
            columns,
            default_order: (0, OrderDir::Desc),
            secondary: None,
        }
    }

    /// Override the initial ordering
    pub fn order_by(mut self, column: usize, dir: OrderDir) -> Self {
        self.default_order = (column, dir);
        self
    }

    /// Attach a per-record auxiliary form
    pub fn with_secondary(mut self, form: SecondaryForm) -> Self {
        self.secondary = Some(form);
        self
    }
}

impl Validatable for ResourceConfig {
    fn validate(&self) -> ConsoleResult<()> {
        if self.key.trim().is_empty() {
            return Err(ConsoleError::validation("Resource key cannot be empty"));
        }
        if self.columns.is_empty() {
            return Err(ConsoleError::schema_validation(
                &self.key,
                "resource must declare at least one grid column",
            ));
        }
        if self.default_order.0 >= self.columns.len() {
            return Err(ConsoleError::schema_validation(
                &self.key,
                "default order column is out of range",
            ));
        }
        self.routes.validate()?;
        self.schema
            .validate()
            .map_err(|e| ConsoleError::schema_validation(&self.key, e.to_string()))?;
        if let Some(secondary) = &self.secondary {
            secondary
                .validate()
                .map_err(|e| ConsoleError::schema_validation(&self.key, e.to_string()))?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldKind, FieldSpec};
    use pretty_assertions::assert_eq;

    fn routes() -> ResourceRoutes {
        ResourceRoutes::new(
            "/panel/users/data/",
            "/panel/users/create/",
            "/panel/users/{id}/",
            "/panel/users/{id}/update/",
        )
    }

    #[test]
    fn test_route_template_substitution() {
        let route = RouteTemplate::new("/panel/users/{id}/update/");
        assert!(route.is_parameterized());
        assert_eq!(route.with_id(5), "/panel/users/5/update/");

        let route = RouteTemplate::new("/panel/users/data/");
        assert!(!route.is_parameterized());
        assert_eq!(route.with_id(5), "/panel/users/data/");
    }

    #[test]
    fn test_routes_builder() {
        let routes = routes()
            .update_with_patch()
            .with_delete("/panel/users/{id}/delete/")
            .with_restore("/panel/users/{id}/restore/");

        assert_eq!(routes.update_method, HttpMethod::Patch);
        assert!(routes.delete.is_some());
        assert!(routes.restore.is_some());
        assert!(routes.status.is_none());
        assert!(routes.is_valid());
    }

    #[test]
    fn test_routes_validation_requires_id_placeholder() {
        {
            let mut routes = routes();
            routes.update = RouteTemplate::new("/panel/users/update/");
            assert!(!routes.is_valid());
        }

        let routes = routes().with_status("/panel/users/status/");
        assert!(!routes.is_valid());
    }

    #[test]
    fn test_column_spec() {
        let col = ColumnSpec::new("name", "Name");
        assert!(col.searchable);
        assert!(col.orderable);

        let col = ColumnSpec::new("actions", "").not_searchable().not_orderable();
        assert!(!col.searchable);
        assert!(!col.orderable);
    }

    #[test]
    fn test_resource_config_validation() {
        let schema = FormSchema::new(vec![FieldSpec::new("name", "Name", FieldKind::Text)]);
        let config = ResourceConfig::new(
            "users",
            "Users",
            routes(),
            schema.clone(),
            vec![ColumnSpec::new("id", "ID"), ColumnSpec::new("name", "Name")],
        );
        assert!(config.is_valid());
        assert_eq!(config.default_order, (0, OrderDir::Desc));

        let config = ResourceConfig::new("users", "Users", routes(), schema.clone(), vec![]);
        assert!(!config.is_valid());

        let config = ResourceConfig::new(
            "users",
            "Users",
            routes(),
            schema,
            vec![ColumnSpec::new("id", "ID")],
        )
        .order_by(3, OrderDir::Asc);
        assert!(!config.is_valid());
    }

    #[test]
    fn test_secondary_form_validation() {
        let schema = FormSchema::new(vec![FieldSpec::new(
            "password",
            "New password",
            FieldKind::Password,
        )]);
        let form = SecondaryForm::new(
            "change-password",
            "Change password",
            "/panel/users/{id}/change-password/",
            HttpMethod::Patch,
            schema.clone(),
        );
        assert!(form.is_valid());

        let form = SecondaryForm::new(
            "change-password",
            "Change password",
            "/panel/users/change-password/",
            HttpMethod::Patch,
            schema,
        );
        assert!(!form.is_valid());
    }
}
