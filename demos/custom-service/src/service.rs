//! 自定义服务客户端
//!
//! 演示第三方模块如何通过注册器把自己的客户端工厂接入服务定位器

use async_trait::async_trait;
use di_abstractions::{
    LocateExt, RegistrationManagerExt, ServiceLocator, ServiceModule, ServiceRegistrar,
    ServiceRegistrationManager, TypeDescriptor,
};
use sdk_common::{declare_contract, DependencyResult};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

/// 演示模块名称
pub const MODULE_NAME: &str = "custom-service";

/// 传输层契约
#[async_trait]
pub trait Transport: Send + Sync {
    /// 发送请求并返回响应
    async fn round_trip(&self, request: Vec<u8>) -> anyhow::Result<Vec<u8>>;

    /// 传输名称
    fn name(&self) -> &str;
}

/// 回显客户端工厂契约
pub trait EchoClientFactory: Send + Sync {
    /// 为指定端点创建客户端
    fn create(&self, endpoint: &str) -> EchoClient;
}

declare_contract!(dyn Transport, dyn EchoClientFactory);

/// 内存回环传输
///
/// 每次调用建立一对内存管道，由后台任务原样写回收到的字节。
#[derive(Debug, Default)]
pub struct LoopbackTransport;

#[async_trait]
impl Transport for LoopbackTransport {
    async fn round_trip(&self, request: Vec<u8>) -> anyhow::Result<Vec<u8>> {
        let (mut client, mut server) = tokio::io::duplex(1024);

        let echo = tokio::spawn(async move {
            let mut received = Vec::new();
            server.read_to_end(&mut received).await?;
            server.write_all(&received).await?;
            server.shutdown().await?;
            Ok::<_, std::io::Error>(received.len())
        });

        client.write_all(&request).await?;
        client.shutdown().await?;

        let mut response = Vec::new();
        client.read_to_end(&mut response).await?;
        let echoed = echo.await??;
        debug!("回环传输: {} 字节", echoed);

        Ok(response)
    }

    fn name(&self) -> &str {
        "loopback"
    }
}

/// 把响应转为大写的传输，用于演示覆盖绑定
#[derive(Debug, Default)]
pub struct ShoutingTransport;

#[async_trait]
impl Transport for ShoutingTransport {
    async fn round_trip(&self, request: Vec<u8>) -> anyhow::Result<Vec<u8>> {
        let response = LoopbackTransport.round_trip(request).await?;
        Ok(response.to_ascii_uppercase())
    }

    fn name(&self) -> &str {
        "shouting"
    }
}

/// 回显客户端
pub struct EchoClient {
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl EchoClient {
    /// 客户端端点
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 发送消息并返回回显
    pub async fn echo(&self, message: &str) -> anyhow::Result<String> {
        debug!(
            "发送回显请求: {} 经由 {}",
            self.endpoint,
            self.transport.name()
        );
        let response = self.transport.round_trip(message.as_bytes().to_vec()).await?;
        Ok(String::from_utf8(response)?)
    }
}

/// 默认回显客户端工厂
pub struct DefaultEchoClientFactory {
    transport: Arc<dyn Transport>,
}

impl EchoClientFactory for DefaultEchoClientFactory {
    fn create(&self, endpoint: &str) -> EchoClient {
        EchoClient {
            endpoint: endpoint.to_string(),
            transport: Arc::clone(&self.transport),
        }
    }
}

/// 绑定回环传输
#[derive(Debug, Default)]
pub struct TransportRegistrar;

impl ServiceRegistrar for TransportRegistrar {
    fn register(
        &self,
        manager: &dyn ServiceRegistrationManager,
        _locator: &dyn ServiceLocator,
    ) -> DependencyResult<()> {
        let transport: Arc<dyn Transport> = Arc::new(LoopbackTransport);
        manager.register_instance(transport)
    }
}

/// 绑定回显客户端工厂，传输层从定位器解析
#[derive(Debug, Default)]
pub struct EchoClientRegistrar;

impl ServiceRegistrar for EchoClientRegistrar {
    fn register(
        &self,
        manager: &dyn ServiceRegistrationManager,
        locator: &dyn ServiceLocator,
    ) -> DependencyResult<()> {
        let transport = locator.locate::<dyn Transport>()?;
        let factory: Arc<dyn EchoClientFactory> = Arc::new(DefaultEchoClientFactory { transport });
        manager.register_instance(factory)
    }
}

/// 演示模块清单
pub fn module() -> ServiceModule {
    ServiceModule::new(MODULE_NAME)
        .depends_on(di_impl::HOSTING_MODULE_NAME)
        .export(TypeDescriptor::contract::<dyn Transport>())
        .export(TypeDescriptor::contract::<dyn EchoClientFactory>())
        .export(TypeDescriptor::default_service::<LoopbackTransport, dyn Transport>(|t| t))
        .export(TypeDescriptor::registrar::<TransportRegistrar>())
        .export(TypeDescriptor::registrar::<EchoClientRegistrar>())
}
