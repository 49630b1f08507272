//! 默认注册器工厂

use di_abstractions::{RegistrarFactory, ServiceRegistrar, TypeDescriptor};
use sdk_common::{DependencyError, DependencyResult};
use std::sync::Arc;
use tracing::debug;

/// 默认注册器工厂
///
/// 调用类型描述符的无参构造函数，并取出实例的注册器视图。
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRegistrarFactory;

impl DefaultRegistrarFactory {
    /// 创建默认注册器工厂
    pub fn new() -> Self {
        Self
    }
}

impl RegistrarFactory for DefaultRegistrarFactory {
    fn create(&self, descriptor: &TypeDescriptor) -> DependencyResult<Arc<dyn ServiceRegistrar>> {
        debug!("创建注册器: {}", descriptor.type_info().short_name());

        let instance = descriptor.construct()?;
        instance.registrar().ok_or_else(|| {
            DependencyError::instantiation(
                descriptor.type_info().name,
                "实例未实现注册器契约",
                None,
            )
        })
    }

    fn name(&self) -> &str {
        "DefaultRegistrarFactory"
    }
}
