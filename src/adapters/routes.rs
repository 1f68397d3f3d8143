use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::adapters::{
    controllers::{
        concurrency_controller::ConcurrencyController, file_controller::FileController,
        health_controller::HealthController, model_controller::ModelController,
        param_controller::ParamController,
    },
    state::AppState,
};

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // Allow all origins if not specified (only for development)
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_router(app_state: AppState) -> Router {
    let upload_limit = usize::try_from(app_state.global_config.max_size).unwrap_or(usize::MAX);

    let upload_routes = Router::new()
        .route("/upload/small", post(FileController::upload_small))
        .route("/upload/large", post(FileController::upload_large))
        .route("/batch-upload", post(FileController::batch_upload))
        .route("/image-upload", post(FileController::image_upload))
        .layer(DefaultBodyLimit::max(upload_limit));

    let param_routes = Router::new()
        .route("/args1/1", get(ParamController::fixed_path))
        .route("/args2/{id}", get(ParamController::string_id))
        .route("/args4/{id}", get(ParamController::numeric_id))
        .route("/args5/{id}/{name}", get(ParamController::id_and_name))
        .route("/item3/{item_id}", get(ParamController::ranged_item))
        .route("/item4/{item_id}", get(ParamController::coded_item))
        .route("/item5/{model}", get(ParamController::model))
        .route("/item6/{item_id}", get(ParamController::product_code))
        .route("/query1", get(ParamController::page_limit))
        .route("/query2", get(ParamController::page_optional_limit))
        .route("/query3", get(ParamController::page_limit_info))
        .route("/query4/{page}", get(ParamController::path_page_limit_info))
        .route("/items1", get(ParamController::default_item))
        .route("/items2", get(ParamController::required_item))
        .route("/items3", get(ParamController::bounded_length_item))
        .route("/items4", get(ParamController::ranged_query_item))
        .route("/items5", get(ParamController::aliased_item))
        .route("/items8", get(ParamController::coded_query_item))
        .route("/login1", post(ParamController::login_query))
        .route("/login2", post(ParamController::login_form));

    let model_routes = Router::new()
        .route("/users", post(ModelController::create_person))
        .route("/products", post(ModelController::create_product))
        .route("/accounts", post(ModelController::create_account))
        .route("/items", post(ModelController::create_item))
        .route("/contacts", post(ModelController::create_contact))
        .route("/orders", post(ModelController::create_order))
        .route("/tasks", post(ModelController::create_task))
        .route("/documents", post(ModelController::create_document));

    let cors = cors_layer(&app_state.local_config.cors_allowed_origins);

    Router::new()
        .route("/", get(HealthController::hello_world))
        .route("/api/v1/health", get(HealthController::health_check))
        .route("/async", get(ConcurrencyController::concurrent_waits))
        .route("/sync", get(ConcurrencyController::sequential_waits))
        .merge(upload_routes)
        .merge(param_routes)
        .merge(model_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
