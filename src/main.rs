use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logview::auth::token::TokenService;
use logview::models::log::{LogStatus, NewLogRecord};
use logview::store::postgres::PgStore;
use logview::{api, cli, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "logview=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let result = match args.command {
        Some(cli::Commands::Serve { port }) => run_server(cfg, port).await,
        Some(cli::Commands::Seed { count }) => run_seed(cfg, count).await,
        None => {
            let port = cfg.port;
            run_server(cfg, port).await
        }
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

async fn run_server(cfg: config::Config, port: u16) -> anyhow::Result<()> {
    tracing::info!("Connecting to database...");
    let db = PgStore::connect(&cfg.database_url).await?;

    tracing::info!("Running migrations...");
    db.migrate().await?;

    let tokens = TokenService::new(&cfg.jwt_secret);
    let dashboard_origin = cfg.dashboard_origin.clone();

    let state = Arc::new(AppState {
        db,
        tokens,
        config: cfg,
    });

    let app = api::api_router()
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        // The dashboard is the only intended browser client; allow it
        // plus localhost for development.
        .layer({
            use axum::http::{HeaderName, Method};
            use tower_http::cors::{AllowOrigin, CorsLayer};
            CorsLayer::new()
                .allow_origin(AllowOrigin::predicate(move |origin, _| {
                    let origin_str = origin.to_str().unwrap_or("");
                    origin_str == dashboard_origin
                        || origin_str.starts_with("http://localhost:")
                        || origin_str.starts_with("http://127.0.0.1:")
                }))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    HeaderName::from_static("content-type"),
                    HeaderName::from_static("authorization"),
                ])
                .allow_credentials(true)
        })
        .layer(axum::middleware::from_fn(request_id_middleware));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Logview backend listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Middleware: injects a unique X-Request-Id into every response.
/// This allows clients to correlate errors with server logs.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = axum::http::HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}

/// Insert `count` sample records with descending timestamps so the paged
/// endpoint has something to return on a fresh database.
async fn run_seed(cfg: config::Config, count: u32) -> anyhow::Result<()> {
    let db = PgStore::connect(&cfg.database_url).await?;
    db.migrate().await?;

    let interfaces = ["order-sync", "invoice-export", "inventory-feed"];
    let statuses = [LogStatus::Success, LogStatus::Failure, LogStatus::Pending];

    for i in 0..count {
        let status = statuses[i as usize % statuses.len()];
        let rec = NewLogRecord {
            interface_name: interfaces[i as usize % interfaces.len()].to_string(),
            integration_key: format!("ik-{:04}", i),
            status,
            message: match status {
                LogStatus::Failure => Some("upstream returned an error".to_string()),
                _ => None,
            },
            timestamp: Some(chrono::Utc::now() - chrono::Duration::minutes(i as i64)),
            severity: match status {
                LogStatus::Failure => Some(4),
                LogStatus::Pending => Some(2),
                LogStatus::Success => None,
            },
        };
        db.insert_log(&rec)
            .await
            .map_err(|e| anyhow::anyhow!("seed insert failed: {}", e))?;
    }

    println!("Seeded {} log records.", count);
    Ok(())
}
