mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::map::{routes as map_routes, MapService};
use crate::features::pages::{self, PageService};
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::reviews::{routes as reviews_routes, ReviewService};
use crate::features::rth::models::RthFeature;
use crate::features::rth::reference::{load_geojson, ReferenceIndex};
use crate::features::rth::{routes as rth_routes, RthService};
use crate::modules::gateway::{DataGateway, LocalGateway, RemoteGateway};
use crate::modules::local_store::LocalStore;
use crate::modules::storage::{PhotoBucket, PhotoStore};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Reference GeoJSON backs the demo store and seeds an empty database
    let geojson_features = match load_geojson(&config.data.reference_geojson_path).await {
        Ok(features) => {
            tracing::info!(
                "Loaded {} RTH features from {}",
                features.len(),
                config.data.reference_geojson_path
            );
            features
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load reference GeoJSON {}: {}",
                config.data.reference_geojson_path,
                e
            );
            Vec::new()
        }
    };

    let gateway = connect_gateway(&config, &geojson_features).await?;
    tracing::info!("Data gateway ready (mode: {:?})", gateway.mode());

    let mut features = gateway.fetch_all_features().await;
    if features.is_empty() {
        tracing::info!("Gateway returned no RTH features, using the reference GeoJSON");
        features = geojson_features;
    }
    if features.is_empty() {
        tracing::warn!("No RTH reference data available; location lists will be empty");
    }
    let reference = Arc::new(ReferenceIndex::new(features));
    tracing::info!("Reference index built with {} features", reference.len());

    // Services
    let report_service = Arc::new(ReportService::new(
        Arc::clone(&gateway),
        Arc::clone(&reference),
    ));
    let review_service = Arc::new(ReviewService::new(
        Arc::clone(&gateway),
        Arc::clone(&reference),
    ));
    let map_service = Arc::new(MapService::new(Arc::clone(&reference)));
    let rth_service = Arc::new(RthService::new(
        Arc::clone(&reference),
        Arc::clone(&report_service),
        Arc::clone(&review_service),
    ));
    let admin_service = Arc::new(AdminService::new(
        Arc::clone(&report_service),
        Arc::clone(&review_service),
    ));
    let page_service = Arc::new(PageService::new(
        Arc::clone(&reference),
        Arc::clone(&map_service),
        Arc::clone(&report_service),
        Arc::clone(&review_service),
        Arc::clone(&admin_service),
        gateway.mode(),
    ));
    tracing::info!("Services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(
                Arc::new(credentials),
                "Swagger",
            )))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Admin dashboard and its API
    let admin = Router::new()
        .nest("/api/admin", admin_routes(admin_service))
        .merge(pages::admin_routes(Arc::clone(&page_service)));
    let admin = if let Some(credentials) = config.admin.credentials() {
        tracing::info!("Admin basic auth enabled");
        admin.layer(from_fn(middleware::basic_auth_middleware(
            Arc::new(credentials),
            "Admin RTH",
        )))
    } else {
        tracing::warn!("Admin basic auth disabled (ADMIN_USERNAME/ADMIN_PASSWORD not set)");
        admin
    };

    let health_gateway = Arc::clone(&gateway);
    let health_route = Router::new().route(
        "/health",
        get(move || {
            let gateway = Arc::clone(&health_gateway);
            async move {
                Json(serde_json::json!({
                    "status": "ok",
                    "mode": gateway.mode(),
                    "available": gateway.is_available().await,
                }))
            }
        }),
    );

    let public_routes = Router::new()
        .merge(rth_routes(rth_service))
        .merge(map_routes(map_service))
        .merge(reports_routes(report_service))
        .merge(reviews_routes(review_service))
        .merge(pages::routes(page_service))
        .nest_service("/public", ServeDir::new(&config.data.public_dir));

    let app = Router::new()
        .merge(swagger)
        .merge(admin)
        .merge(public_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Map available at http://{}/peta", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Pick the data gateway once: the database when configured and reachable,
/// otherwise the file-backed demo store.
async fn connect_gateway(
    config: &Config,
    geojson_features: &[RthFeature],
) -> anyhow::Result<Arc<dyn DataGateway>> {
    let demo = || -> Arc<dyn DataGateway> {
        tracing::warn!(
            "Running in demo mode, records are stored under {}",
            config.data.local_store_dir
        );
        Arc::new(LocalGateway::new(
            LocalStore::new(&config.data.local_store_dir),
            geojson_features.to_vec(),
        ))
    };

    let Some(url) = config.database.url.as_deref() else {
        tracing::info!("DATABASE_URL not set");
        return Ok(demo());
    };

    let pool = match database::create_pool(&config.database, url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!("Database unreachable: {}", e);
            return Ok(demo());
        }
    };
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let photos: Option<Arc<dyn PhotoStore>> = match PhotoBucket::new(config.storage.clone()).await {
        Ok(bucket) => {
            tracing::info!("Photo storage ready for bucket: {}", config.storage.bucket);
            Some(Arc::new(bucket))
        }
        Err(e) => {
            tracing::warn!("Photo storage unavailable, reports will be stored without photos: {}", e);
            None
        }
    };

    let remote = RemoteGateway::new(pool, photos);
    if !remote.is_available().await {
        tracing::warn!("Database probe failed");
        return Ok(demo());
    }

    if let Err(e) = remote.seed_features(geojson_features).await {
        tracing::warn!("Failed to seed RTH features: {}", e);
    }

    Ok(Arc::new(remote))
}
