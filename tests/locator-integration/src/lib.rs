//! 集成测试共享的契约与注册器

use di_abstractions::{
    RegistrationManagerExt, ServiceLocator, ServiceRegistrar, ServiceRegistrationManager,
};
use sdk_common::{declare_contract, DependencyResult};
use std::sync::Arc;

/// 身份认证端点
pub trait IdentityEndpoint: Send + Sync {
    fn url(&self) -> String;
}

/// 对象存储端点
pub trait ObjectStoreEndpoint: Send + Sync {
    fn url(&self) -> String;
}

declare_contract!(dyn IdentityEndpoint, dyn ObjectStoreEndpoint);

/// 固定地址的端点
pub struct StaticEndpoint(pub &'static str);

impl IdentityEndpoint for StaticEndpoint {
    fn url(&self) -> String {
        self.0.to_string()
    }
}

impl ObjectStoreEndpoint for StaticEndpoint {
    fn url(&self) -> String {
        self.0.to_string()
    }
}

/// 绑定身份认证端点
#[derive(Default)]
pub struct IdentityRegistrar;

impl ServiceRegistrar for IdentityRegistrar {
    fn register(
        &self,
        manager: &dyn ServiceRegistrationManager,
        _locator: &dyn ServiceLocator,
    ) -> DependencyResult<()> {
        let endpoint: Arc<dyn IdentityEndpoint> =
            Arc::new(StaticEndpoint("https://keystone.example.com/v3"));
        manager.register_instance(endpoint)
    }
}

/// 绑定对象存储端点
#[derive(Default)]
pub struct ObjectStoreRegistrar;

impl ServiceRegistrar for ObjectStoreRegistrar {
    fn register(
        &self,
        manager: &dyn ServiceRegistrationManager,
        _locator: &dyn ServiceLocator,
    ) -> DependencyResult<()> {
        let endpoint: Arc<dyn ObjectStoreEndpoint> =
            Arc::new(StaticEndpoint("https://swift.example.com/v1"));
        manager.register_instance(endpoint)
    }
}
