use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scribe_service::cache::PageCache;
use scribe_service::handlers;
use scribe_service::middleware::JwtAuth;
use scribe_service::repository::{
    PostgresCommentRepository, PostgresFollowRepository, PostgresGroupRepository,
    PostgresPostRepository, PostgresUserRepository,
};
use scribe_service::services::{
    CommentService, FeedService, FollowService, GroupService, PostService, UserService,
};
use scribe_service::{AppState, Config};

async fn readiness(db_pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(db_pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "ready": true })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "ready": false,
            "error": format!("PostgreSQL connection failed: {}", e)
        })),
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting scribe-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let db_pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Migration failed: {e}")))?;

    tracing::info!("Connected to PostgreSQL, migrations applied");

    // Page cache is optional: without Redis the listings always hit the
    // database.
    let page_cache = match &config.redis.url {
        Some(url) => {
            let client = redis::Client::open(url.as_str()).map_err(|e| {
                io::Error::new(io::ErrorKind::Other, format!("Invalid Redis URL: {e}"))
            })?;
            match ConnectionManager::new(client).await {
                Ok(manager) => {
                    tracing::info!("Connected to Redis, page cache enabled");
                    Some(PageCache::new(manager, config.cache.page_ttl_seconds))
                }
                Err(e) => {
                    tracing::warn!("Redis connection failed, page cache disabled: {}", e);
                    None
                }
            }
        }
        None => {
            tracing::info!("REDIS_URL not set, page cache disabled");
            None
        }
    };

    // Repositories share the pool; services see them as trait objects.
    let users_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
    let posts_repo = Arc::new(PostgresPostRepository::new(db_pool.clone()));
    let groups_repo = Arc::new(PostgresGroupRepository::new(db_pool.clone()));
    let comments_repo = Arc::new(PostgresCommentRepository::new(db_pool.clone()));
    let follows_repo = Arc::new(PostgresFollowRepository::new(db_pool.clone()));

    let state = AppState {
        users: UserService::new(users_repo.clone(), posts_repo.clone(), follows_repo.clone()),
        posts: PostService::new(posts_repo.clone(), groups_repo.clone(), users_repo.clone()),
        comments: CommentService::new(
            comments_repo.clone(),
            posts_repo.clone(),
            users_repo.clone(),
        ),
        follows: FollowService::new(users_repo.clone(), follows_repo.clone()),
        feed: FeedService::new(follows_repo.clone(), posts_repo.clone()),
        groups: GroupService::new(groups_repo.clone()),
        page_cache,
        admin_enabled: config.app.admin_enabled,
    };

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let jwt_secret = config.auth.jwt_secret.clone();

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route(
                "/metrics",
                web::get().to(scribe_service::metrics::serve_metrics),
            )
            .route("/health", web::get().to(handlers::health))
            .route("/ready", web::get().to(readiness))
            .service(
                web::scope("/api/v1")
                    .wrap(JwtAuth::new(jwt_secret.clone()))
                    .configure(handlers::configure),
            )
    })
    .bind(&bind_address)?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received");
        server_handle.stop(true).await;
    });

    server.await?;

    tracing::info!("scribe-service shutting down");

    Ok(())
}
