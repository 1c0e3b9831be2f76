use stock_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (dotenv 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置、初始化日志
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), None, config.log_dir.as_deref());

    tracing::info!("Stock edge server starting...");

    // 3. 初始化服务器状态 (数据库 + 迁移)
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    server.run().await
}
