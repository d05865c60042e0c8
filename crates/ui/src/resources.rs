//! Built-in resource definitions
//!
//! The collections the console administers, as pure configuration:
//! routes, form schema, grid columns, and optional secondary forms.
//! The CRUD workflow itself lives once in the dialogs and the grid;
//! adding a resource here is all it takes to get a full admin page.

use opsdeck_core::{
    ColumnSpec, FieldKind, FieldSpec, FormSchema, HttpMethod, ResourceConfig, ResourceRoutes,
    SecondaryForm, SelectChoice,
};

/// The default resource set of the console
pub fn default_resources() -> Vec<ResourceConfig> {
    vec![users(), categories(), platform_configs()]
}

/// Member accounts: PATCH updates, soft delete with restore, and a
/// change-password secondary form.
fn users() -> ResourceConfig {
    let schema = FormSchema::new(vec![
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::new("active", "Active", FieldKind::Checkbox),
        FieldSpec::new("avatar", "Avatar", FieldKind::File),
    ]);

    let change_password = SecondaryForm::new(
        "change-password",
        "Change password",
        "/panel/users/{id}/change-password/",
        HttpMethod::Patch,
        FormSchema::new(vec![
            FieldSpec::new("password", "New password", FieldKind::Password).required(),
        ]),
    );

    ResourceConfig::new(
        "users",
        "Users",
        ResourceRoutes::new(
            "/panel/users/data/",
            "/panel/users/create/",
            "/panel/users/{id}/",
            "/panel/users/{id}/update/",
        )
        .update_with_patch()
        .with_delete("/panel/users/{id}/delete/")
        .with_restore("/panel/users/{id}/restore/"),
        schema,
        vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("name", "Name"),
            ColumnSpec::new("email", "Email"),
            ColumnSpec::new("active", "Active").not_searchable(),
            ColumnSpec::new("created_at", "Created").not_searchable(),
        ],
    )
    .with_secondary(change_password)
}

/// Content categories: PUT updates and a status toggle.
fn categories() -> ResourceConfig {
    let schema = FormSchema::new(vec![
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("display_name", "Display name", FieldKind::Text),
        FieldSpec::new("active", "Active", FieldKind::Checkbox),
        FieldSpec::new("image", "Image", FieldKind::File),
    ]);

    ResourceConfig::new(
        "categories",
        "Categories",
        ResourceRoutes::new(
            "/panel/categories/data/",
            "/panel/categories/create/",
            "/panel/categories/{id}/",
            "/panel/categories/{id}/update/",
        )
        .with_delete("/panel/categories/{id}/delete/")
        .with_status("/panel/categories/{id}/update-status/"),
        schema,
        vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("name", "Name"),
            ColumnSpec::new("display_name", "Display name"),
            ColumnSpec::new("active", "Active").not_searchable(),
        ],
    )
}

/// Upstream API configurations: no destructive actions, only edits and
/// status toggles.
fn platform_configs() -> ResourceConfig {
    let schema = FormSchema::new(vec![
        FieldSpec::new(
            "method",
            "Method",
            FieldKind::Select(vec![
                SelectChoice::new("GET", "GET"),
                SelectChoice::new("POST", "POST"),
            ]),
        )
        .required(),
        FieldSpec::new("api_url", "API URL", FieldKind::Text).required(),
        FieldSpec::new("data", "Payload", FieldKind::TextArea),
        FieldSpec::new("active", "Active", FieldKind::Checkbox),
    ]);

    ResourceConfig::new(
        "configs",
        "Platform Configs",
        ResourceRoutes::new(
            "/panel/configs/data/",
            "/panel/configs/create/",
            "/panel/configs/{id}/",
            "/panel/configs/{id}/update/",
        )
        .with_status("/panel/configs/{id}/update-status/"),
        schema,
        vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("method", "Method"),
            ColumnSpec::new("api_url", "API URL"),
            ColumnSpec::new("active", "Active").not_searchable(),
        ],
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use opsdeck_core::Validatable;

    #[test]
    fn test_default_resources_are_valid() {
        let resources = default_resources();
        assert_eq!(resources.len(), 3);
        for resource in &resources {
            assert!(
                resource.is_valid(),
                "resource '{}' failed validation: {:?}",
                resource.key,
                resource.validate().err()
            );
        }
    }

    #[test]
    fn test_resource_keys_are_unique() {
        let resources = default_resources();
        let mut keys: Vec<_> = resources.iter().map(|r| r.key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), resources.len());
    }

    #[test]
    fn test_users_resource_wiring() {
        let users = users();
        assert_eq!(users.routes.update_method, HttpMethod::Patch);
        assert!(users.routes.restore.is_some());
        assert!(users.routes.status.is_none());
        assert!(users.schema.has_file_field());
        assert!(users.secondary.is_some());
    }

    #[test]
    fn test_configs_have_no_destructive_routes() {
        let configs = platform_configs();
        assert!(configs.routes.delete.is_none());
        assert!(configs.routes.restore.is_none());
        assert!(configs.routes.status.is_some());
        assert!(!configs.schema.has_file_field());
    }
}
