use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::config::app_conf::AppConfig;
use crate::config::{EmailConfig, StorageConfig};
use crate::middlewares::cors_middleware::{cors_guard, CorsPolicy};
use crate::router::model_router::model_router;
use crate::router::quote_router::quote_router;
use crate::service::model_service::ModelServiceImpl;
use crate::service::quote_service::QuoteServiceImpl;
use crate::util::email::{Mailer, SmtpMailer};
use crate::util::storage::ModelStore;

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let storage_config = StorageConfig::from_env().expect("Storage config error");

        // Both upload directories must exist before the listener binds
        let store = Arc::new(ModelStore::new(storage_config.clone()));
        store
            .ensure_directories()
            .await
            .expect("Failed to prepare storage directories");

        let email_config = EmailConfig::from_env().expect("Email config error");
        let notify_to = email_config.notify_to.clone();
        let mailer = Arc::new(SmtpMailer::new(email_config).expect("Mailer init error"));
        // Connectivity probe is logged but never fatal
        mailer.verify().await;

        let quote_service = Arc::new(QuoteServiceImpl::new(
            &storage_config,
            mailer as Arc<dyn Mailer>,
            notify_to,
        ));
        let model_service = Arc::new(ModelServiceImpl::new(&storage_config, store));

        let router = Self::create_router(quote_service, model_service, &storage_config);

        App { config, router }
    }

    /// Assemble the full route tree: liveness, API routers, static model
    /// serving, origin guard and request tracing.
    pub fn create_router(
        quote_service: Arc<QuoteServiceImpl>,
        model_service: Arc<ModelServiceImpl>,
        storage_config: &StorageConfig,
    ) -> Router {
        let cors_policy = Arc::new(CorsPolicy::default());
        Router::new()
            .route("/", get(|| async { "NOVAFORTE backend is running ✅" }))
            .merge(quote_router(quote_service))
            .merge(model_router(model_service))
            .nest_service("/models", ServeDir::new(&storage_config.models_dir))
            .layer(middleware::from_fn_with_state(cors_policy, cors_guard))
            .layer(TraceLayer::new_for_http())
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("Server listening on http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }
}
