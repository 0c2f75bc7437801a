use crate::{
    config::Config,
    database::{DatabaseManager, DatabaseManagerImpl},
    error::AppError,
    forecast::{RandomWalkForecaster, SalesForecaster},
    health::HealthService,
    routes::{create_health_routes, create_product_routes, create_sales_routes},
};
use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub database: Arc<dyn DatabaseManager>,
    pub forecaster: Arc<dyn SalesForecaster>,
    pub health_service: Arc<HealthService>,
}

impl Server {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        // Initialize database
        let database_impl = Arc::new(
            DatabaseManagerImpl::new_from_config(&config)
                .await
                .map_err(AppError::Database)?,
        );
        let database: Arc<dyn DatabaseManager> = database_impl.clone();

        // Initialize forecaster
        let forecaster: Arc<dyn SalesForecaster> = Arc::new(RandomWalkForecaster);

        // Initialize health service
        let health_service = Arc::new(HealthService::new());
        health_service.register(database_impl).await;

        Ok(Self {
            config: Arc::new(config),
            database,
            forecaster,
            health_service,
        })
    }

    pub async fn run(&self) -> Result<(), AppError> {
        if self.config.database.migration_on_startup {
            self.database.migrate().await.map_err(AppError::Database)?;
        }

        let app = self.create_app();

        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid server address: {}", e)))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to address: {}", e)))?;

        info!("Server listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

        info!("Server shutdown complete");
        Ok(())
    }

    /// Creates an application router
    pub fn create_app(&self) -> Router {
        let mut app = Router::new()
            // Product and recommendation routes
            .nest("/products/", create_product_routes())
            // Sales history and forecast routes
            .nest("/sales", create_sales_routes())
            // Health check routes
            .nest("/health", create_health_routes())
            // All routes use Server as state
            .with_state(self.clone());

        if self.config.logging.log_request {
            app = app.layer(middleware::from_fn(request_response_logger));
        }
        app
    }
}

/// Request/response logging middleware
async fn request_response_logger(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    info!(method = %method, path = %path, "API request");

    let start = std::time::Instant::now();
    let response = next.run(req).await;
    let duration = start.elapsed();

    info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        latency_ms = %duration.as_millis(),
        "API response"
    );

    response
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Graceful shutdown initiated");
}
