use anyhow::Result;
use ceq_trends::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env
    dotenvy::dotenv().ok();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    let _has_data = App::initialize(config).await?.run().await?;

    Ok(())
}
