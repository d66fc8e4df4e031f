use crate::{
    Config,
    web::{AppState, doc::ApiDoc},
};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod courses;
pub mod progress;
pub mod users;

pub fn build_app<S: Send + Sync + Clone + 'static>(
    state: AppState,
    config: &'static Config,
) -> Router<S> {
    let mut router = Router::new()
        .merge(users::routes(state.clone()))
        .merge(courses::routes(state.clone()))
        .merge(progress::routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    if config.app().docs() {
        let openapi = ApiDoc::openapi();

        router = router.merge(SwaggerUi::new("/docs").url("/openapi.json", openapi));
    }

    router
}
