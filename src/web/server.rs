use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let app = create_app(state.clone());

    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🌐 Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(crate::web::routes::create_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(crate::web::middleware::cors_layer())
}
