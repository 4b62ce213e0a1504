//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use crud_config::{AppConfig, ServerConfig};
use crud_errors::AppResult;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::health::{HealthChecker, health_routes};
use crate::infrastructure::Infrastructure;
use crate::metrics::{MetricsRecorder, track_http_metrics};
use crate::runtime::{init_runtime, shutdown_signal};

/// 为路由挂载通用 HTTP 中间件
///
/// 包括请求追踪、CORS、超时、请求体大小限制与请求统计
#[allow(deprecated)]
pub fn apply_http_layers(router: Router, server: &ServerConfig) -> Router {
    router
        .layer(middleware::from_fn(track_http_metrics))
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// 运行 HTTP 服务
///
/// 所有服务的统一入口点：
/// 1. 加载配置
/// 2. 初始化运行时（日志）
/// 3. 安装 Prometheus recorder
/// 4. 创建基础设施资源（数据库，带重试）
/// 5. 调用服务提供的闭包构建业务路由
/// 6. 合并健康检查路由并启动服务器，处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use crud_bootstrap::run_http_server;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_http_server("config", |infra| async move {
///         Ok(my_routes(infra.postgres_pool()))
///     })
///     .await
/// }
/// ```
pub async fn run_http_server<F, Fut>(
    config_dir: &str,
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    let config = AppConfig::load(config_dir)?;

    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = match MetricsRecorder::install() {
        Ok(recorder) => Some(recorder),
        Err(e) => {
            warn!(error = %e, "Metrics disabled");
            None
        }
    };

    let infra = Infrastructure::from_config(config).await?;
    let health_checker = Arc::new(HealthChecker::new(infra.postgres_pool()));

    let service_router = router_builder(infra.clone()).await?;
    let app = apply_http_layers(
        service_router.merge(health_routes(health_checker, metrics)),
        infra.server_config(),
    );

    let server = infra.server_config();
    let addr: SocketAddr = format!("{}:{}", server.host, server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(pool = ?infra.postgres_pool_status(), "Closing PostgreSQL pool");
    infra.postgres_pool().close().await;

    info!("Service stopped");

    Ok(())
}
