use lacquer_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境与日志
    dotenv::dotenv().ok();
    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_dir = format!("{}/logs", config.work_dir);
    init_logger_with_file(None, Some(&log_dir));

    print_banner();
    tracing::info!("Lacquer Server starting...");

    // 2. 初始化服务器状态 (数据库、种子管理员、订单引擎)
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
