//! Grid refresh handle
//!
//! [`GridHandle`] is the injected handle the CRUD workflow refreshes
//! the grid through. It owns the association between one grid's state
//! signal, its list endpoint, and the API client; everything that
//! mutates records asks it to `refresh()` afterwards so the visible
//! page reflects server state.

use std::sync::Arc;

use dioxus::prelude::*;

use opsdeck_client::ApiClient;
use opsdeck_core::{ColumnSpec, ResourceConfig};

use crate::state::GridState;

/// Injected handle to the page's grid.
///
/// Detached handles are valid and make every call a no-op, for views
/// that mutate records without a grid on screen.
#[derive(Clone)]
pub struct GridHandle {
    inner: Option<BoundGrid>,
}

#[derive(Clone)]
struct BoundGrid {
    api: Arc<ApiClient>,
    state: Signal<GridState>,
    list_route: String,
    columns: Vec<ColumnSpec>,
}

impl GridHandle {
    /// Bind a handle to a resource's grid state
    pub fn bound(api: Arc<ApiClient>, resource: &ResourceConfig, state: Signal<GridState>) -> Self {
        Self {
            inner: Some(BoundGrid {
                api,
                state,
                list_route: resource.routes.list.as_str().to_string(),
                columns: resource.columns.clone(),
            }),
        }
    }

    /// A handle with no grid behind it
    pub fn detached() -> Self {
        Self { inner: None }
    }

    /// Whether a grid is bound
    pub fn is_bound(&self) -> bool {
        self.inner.is_some()
    }

    /// The bound grid's state signal, for rendering
    pub fn state(&self) -> Option<Signal<GridState>> {
        self.inner.as_ref().map(|b| b.state)
    }

    /// Re-fetch the current page with the existing filter/sort/page
    /// state. Fire-and-forget; a no-op on detached handles. Replies
    /// that arrive out of order are discarded by the draw guard.
    pub fn refresh(&self) {
        let Some(bound) = self.inner.clone() else {
            return;
        };
        let mut state = bound.state;
        let query = state.write().begin_request();

        // The refresh must survive the dialog scope that triggered it.
        spawn_forever(async move {
            match bound
                .api
                .fetch_grid_page(&bound.list_route, &query, &bound.columns)
                .await
            {
                Ok(page) => {
                    if !state.write().apply_page(page) {
                        tracing::debug!(draw = query.draw, "discarded stale grid reply");
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, route = %bound.list_route, "grid refresh failed");
                    state.write().apply_error(query.draw, e.to_string());
                }
            }
        });
    }
}
