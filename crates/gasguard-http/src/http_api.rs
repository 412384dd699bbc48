use crate::context::AppContext;
use crate::server::{run_http_server, HttpServerConfig};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// The HTTP surface as a runnable application module.
pub struct HttpApi {
    ctx: AppContext,
    config: HttpServerConfig,
}

impl HttpApi {
    pub fn new(ctx: AppContext, config: HttpServerConfig) -> Self {
        debug!("initializing http api module");
        Self { ctx, config }
    }

    pub fn into_runner_process(
        self,
    ) -> impl FnOnce(
        CancellationToken,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + Send>,
    > {
        move |token| Box::pin(async move { run_http_server(self.config, self.ctx, token).await })
    }
}
