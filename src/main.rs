use axum::{http::StatusCode, routing::get, Router};
use dotenvy::dotenv;
use std::env;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use condo_admin::{database, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env file
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "condo_admin=debug,tower_http=debug,axum=trace".into()
        }))
        .init();

    let pool = database::create_database_connection().await?;
    database::run_migrations(&pool).await?;

    // CORS middleware so the frontend can call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Error handler
    async fn handle_404() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    let app = Router::new()
        // Health check
        .route("/health", get(routes::health))
        // Revenue ledger
        .route(
            "/api/revenue",
            get(routes::revenue::get_all_revenue).post(routes::revenue::create_revenue),
        )
        .route(
            "/api/revenue/:id",
            get(routes::revenue::get_revenue_by_id)
                .put(routes::revenue::update_revenue)
                .delete(routes::revenue::delete_revenue),
        )
        // Expense ledger
        .route(
            "/api/expenses",
            get(routes::expenses::get_all_expenses).post(routes::expenses::create_expense),
        )
        .route(
            "/api/expenses/:id",
            get(routes::expenses::get_expense_by_id)
                .put(routes::expenses::update_expense)
                .delete(routes::expenses::delete_expense),
        )
        // Bulletin board
        .route(
            "/api/posts",
            get(routes::posts::get_all_posts).post(routes::posts::create_post),
        )
        .route(
            "/api/posts/:id",
            get(routes::posts::get_post_by_id)
                .put(routes::posts::update_post)
                .delete(routes::posts::delete_post),
        )
        // Resident accounts
        .route(
            "/api/residents",
            get(routes::residents::get_all_residents).post(routes::residents::create_resident),
        )
        .route(
            "/api/residents/:id",
            get(routes::residents::get_resident_by_id)
                .put(routes::residents::update_resident)
                .patch(routes::residents::deactivate_resident),
        )
        // Administration dashboard
        .route("/api/dashboard-data", get(routes::dashboard::get_dashboard_data))
        // 404 handler
        .fallback(handle_404)
        // Inject the DB pool and middleware
        .with_state(pool)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    tracing::info!("server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
