use axum::Router;
use pokedex_kernel::prelude::ApiState;
use pokedex_kernel::server::router::system_router;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Pokedex", description = "Pokemon REST API"))]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let static_dir = state.config.storage.static_dir.clone();

    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", pokedex_pokemon::api::router())
        .merge(system_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    Router::new()
        .merge(openapi_routes)
        .merge(Scalar::with_url("/docs", api_doc))
        .fallback_service(static_files(&static_dir))
}

fn static_files(dir: &Path) -> ServeDir {
    ServeDir::new(dir).append_index_html_on_directories(true)
}
