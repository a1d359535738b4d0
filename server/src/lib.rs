use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use wine_core::loader::load_catalog_path;
use wine_core::query::{run_query, QueryParams, SortKey};
use wine_core::{StyleTag, Sweetness, WineCatalog};
use parking_lot::RwLock;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub mod render;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    /// Where to fetch the dataset from when the local copy is missing.
    pub dataset_url: Option<String>,
    pub load_limit: usize,
    pub page_size: usize,
    pub admin_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("./winemag-data.csv"),
            dataset_url: None,
            load_limit: 5000,
            page_size: 12,
            admin_token: None,
        }
    }
}

/// Shared catalog cache. `catalog` is None until the first load attempt;
/// after that it is always Some, possibly empty alongside `last_error`.
#[derive(Default)]
pub struct CatalogStore {
    pub catalog: Option<WineCatalog>,
    pub last_error: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<RwLock<CatalogStore>>,
}

pub fn build_app(config: AppConfig) -> Router {
    let state = AppState {
        config,
        store: Arc::new(RwLock::new(CatalogStore::default())),
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(|| async { "ok" }))
        .route("/admin/refresh", post(refresh_handler))
        .with_state(state)
        .layer(cors)
}

/// Raw request parameters. Everything is optional text; parsing is lenient
/// so malformed values fall back instead of erroring.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexParams {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub variety: Option<String>,
    #[serde(default)]
    pub max_price: Option<String>,
    #[serde(default)]
    pub sweetness: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

impl IndexParams {
    fn to_query(&self) -> QueryParams {
        QueryParams {
            country: self.country.clone(),
            variety: self.variety.clone(),
            max_price: self.max_price.clone(),
            sweetness: self.sweetness.as_deref().and_then(Sweetness::parse),
            style: self.style.as_deref().and_then(StyleTag::parse),
            sort: SortKey::parse(self.sort.as_deref().unwrap_or("")),
            page: self
                .page
                .as_deref()
                .and_then(|p| p.trim().parse::<i64>().ok())
                .unwrap_or(1),
        }
    }
}

/// One-time blocking fetch+load, cached for the process lifetime. A failed
/// download or parse leaves an empty catalog and a readable `last_error`;
/// refresh clears the store and runs this again.
async fn ensure_loaded(state: &AppState) {
    if state.store.read().catalog.is_some() {
        return;
    }

    if !state.config.csv_path.exists() {
        match &state.config.dataset_url {
            Some(url) => {
                if let Err(e) = fetcher::download(url, &state.config.csv_path).await {
                    tracing::error!(error = %e, "dataset download failed");
                    state.store.write().last_error = Some(format!("{e:#}"));
                }
            }
            None => {
                state.store.write().last_error = Some(format!(
                    "dataset file {} is missing and no dataset URL is configured",
                    state.config.csv_path.display()
                ));
            }
        }
    }

    let mut store = state.store.write();
    if state.config.csv_path.exists() {
        match load_catalog_path(&state.config.csv_path, state.config.load_limit) {
            Ok(catalog) => {
                store.last_error = None;
                store.catalog = Some(catalog);
            }
            Err(e) => {
                tracing::error!(error = %e, "dataset load failed");
                store.last_error = Some(format!("{e:#}"));
                store.catalog = Some(WineCatalog::default());
            }
        }
    } else {
        // download failed or never configured; keep the error, serve empty
        store.catalog = Some(WineCatalog::default());
    }
}

pub async fn index_handler(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Html<String> {
    ensure_loaded(&state).await;

    let store = state.store.read();
    if let Some(msg) = &store.last_error {
        return Html(render::error_page(msg));
    }
    let empty = WineCatalog::default();
    let catalog = store.catalog.as_ref().unwrap_or(&empty);
    let page = run_query(catalog, &params.to_query(), state.config.page_size);
    Html(render::index_page(&params, &page, catalog.len()))
}

pub async fn refresh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Redirect, (StatusCode, String)> {
    authorize(&state, &headers)?;
    tracing::info!("refresh requested; discarding local dataset and cache");

    if state.config.csv_path.exists() {
        std::fs::remove_file(&state.config.csv_path).ok();
    }
    {
        let mut store = state.store.write();
        store.catalog = None;
        store.last_error = None;
    }
    ensure_loaded(&state).await;
    Ok(Redirect::to("/"))
}

/// Refresh is open when no admin token is configured (local-dev stance);
/// otherwise the X-ADMIN-TOKEN header must match.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.config.admin_token {
        Some(t) => t,
        None => return Ok(()),
    };
    let provided = headers
        .get("X-ADMIN-TOKEN")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
