use product_store::app::{self, product::handler::AppState};
use product_store::infrastructure::{
    config::{load_config, log_source},
    logger::Logger,
};
use product_store::ProductStore;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config()?;
    config.validate()?;

    // 初始化日志
    Logger::init(&config.logging.level);
    log_source(source.as_deref());

    let store = if config.store.seed_samples {
        ProductStore::seeded(config.store.id_length)
    } else {
        ProductStore::new(config.store.id_length)
    };

    let app = app::build_router(AppState::new(store), &config.http);

    let addr = config.http.socket_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 产品服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /api/products     - 获取所有产品");
    info!("   POST   /api/products     - 创建新产品");
    info!("   GET    /api/products/:id - 获取特定产品");
    info!("   PATCH  /api/products/:id - 部分更新产品");
    info!("   DELETE /api/products/:id - 删除产品");
    info!("   GET    /health           - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "无法监听 Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "无法监听 SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到停止信号，正在关闭...");
}
