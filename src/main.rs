use face_compare::{
    application::compare_faces::{dto::ComparisonLimits, use_case::CompareFacesUseCase},
    config::Config,
    domain::upload::policy::UploadPolicy,
    infrastructure::ml::{
        disabled_face_encoder::DisabledFaceEncoder, encoding_comparator::EncodingComparator,
        http_face_encoder::HttpFaceEncoder, traits::FaceEncoder,
    },
    presentation::http::{routes::create_router, state::AppState},
};
use http::{Method, header};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,face_compare=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;

    let encoder: Arc<dyn FaceEncoder> = match &config.face_encoder_url {
        Some(url) => {
            tracing::info!("Using remote face encoder at {}", url);
            Arc::new(HttpFaceEncoder::new(
                url.clone(),
                config.face_encoder_token.clone(),
                Duration::from_secs(config.face_encoder_timeout_secs),
            )?)
        }
        None => Arc::new(DisabledFaceEncoder::new()),
    };
    let encoder_backend = encoder.backend();

    let comparator = Arc::new(EncodingComparator::new(
        encoder,
        config.face_match_tolerance,
    ));
    let compare_faces = Arc::new(CompareFacesUseCase::new(
        Arc::new(UploadPolicy::new(&config.allowed_extensions)),
        comparator,
        ComparisonLimits {
            max_concurrent: config.compare_concurrency,
            queue_timeout: Duration::from_secs(config.compare_queue_timeout_secs),
        },
    ));

    let state = AppState {
        config: config.clone(),
        compare_faces,
        encoder_backend,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    let app = create_router(state).layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Face comparison service listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
