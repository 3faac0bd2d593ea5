use prorata_billing::{api, AppConfig};
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载配置 (日志级别来自配置，先于日志初始化)
    let config = AppConfig::from_env()?;

    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_max_level(config.log_level())
        .init();

    info!("Starting server with config: {:?}", config);

    let app = api::router();

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/bill/monthly      - prorated bill (JSON)");
    info!("  POST /api/bill/monthly/csv  - prorated bill (CSV)");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
