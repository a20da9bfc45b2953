use crate::{
    classifier::BeanClassifier, config::ServerConfig, model_service::ModelLoader,
    pages::Templates, routes::api_routes, telemetry::Metrics,
};
use axum::{extract::DefaultBodyLimit, Router};
use axum_otel_metrics::HttpMetricsLayerBuilder;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::broadcast::Receiver, task::JoinHandle};

pub struct SharedState<L: ModelLoader> {
    pub classifier: Arc<BeanClassifier<L>>,
    pub templates: Arc<Templates>,
    pub metrics: Arc<Metrics>,
}

impl<L: ModelLoader> Clone for SharedState<L> {
    fn clone(&self) -> Self {
        Self {
            classifier: self.classifier.clone(),
            templates: self.templates.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn new<L: ModelLoader>(
        classifier: Arc<BeanClassifier<L>>,
        config: &ServerConfig,
    ) -> anyhow::Result<Self> {
        let addr = config.get_address();

        let app_state = SharedState {
            classifier,
            templates: Arc::new(Templates::new()?),
            metrics: Arc::new(Metrics::new()?),
        };
        let metrics_layer = HttpMetricsLayerBuilder::new().build();

        let router = Router::new()
            .merge(api_routes())
            .with_state(app_state)
            .layer(DefaultBodyLimit::max(config.max_upload_bytes))
            .layer(metrics_layer);

        let listener = TcpListener::bind(addr).await?;

        Ok(Self { router, listener })
    }

    pub async fn run(
        self,
        mut shutdown_rx: Receiver<()>,
    ) -> anyhow::Result<JoinHandle<anyhow::Result<()>>> {
        tracing::info!("Starting app on {}", self.listener.local_addr()?);

        let listener = self.listener;
        let router = self.router;
        let server_handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    shutdown_rx.recv().await.ok();
                })
                .await?;
            Ok(())
        });

        Ok(server_handle)
    }
}
