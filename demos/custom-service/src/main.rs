//! # 自定义服务示例
//!
//! 演示宿主程序如何在运行时加载第三方模块，并通过服务定位器解析其客户端

mod service;

use clap::Parser;
use di_abstractions::{LocateExt, RegistrationManagerExt, ServiceLocator};
use di_impl::{LocatorConfig, ServiceLocatorImpl};
use service::{EchoClientFactory, ShoutingTransport, Transport};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "custom-service-demo")]
#[command(about = "服务定位器自定义服务示例")]
struct Args {
    /// 定位器配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 回显端点
    #[arg(long, default_value = "loopback://echo")]
    endpoint: String,

    /// 发送的消息
    #[arg(short, long, default_value = "hello from the service locator")]
    message: String,

    /// 使用覆盖绑定替换传输层
    #[arg(long)]
    shout: bool,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志，RUST_LOG 优先于命令行参数
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_log_level(&args.log_level).as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("启动自定义服务示例");

    let config = LocatorConfig::load(args.config.as_deref())?;
    let locator = ServiceLocatorImpl::builder().with_config(config).build()?;

    if args.shout {
        info!("使用覆盖绑定替换传输层");
        let transport: Arc<dyn Transport> = Arc::new(ShoutingTransport);
        locator.override_manager().register_instance(transport)?;
    }

    let invoked = locator.ensure_module_registration(Arc::new(service::module()))?;
    info!("模块 {} 已加载: 调用 {} 个注册器", service::MODULE_NAME, invoked);

    let client = locator
        .locate::<dyn EchoClientFactory>()?
        .create(&args.endpoint);
    let reply = client.echo(&args.message).await?;

    info!("{} 回显: {}", client.endpoint(), reply);
    println!("{reply}");

    let stats = locator.stats();
    info!(
        "定位器统计: 默认绑定 {}, 覆盖绑定 {}, 观察模块 {}",
        stats.default_bindings, stats.override_bindings, stats.watched_modules
    );

    Ok(())
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
