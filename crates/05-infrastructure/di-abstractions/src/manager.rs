//! 注册管理器抽象接口
//!
//! 提供能力绑定的校验与写入

use crate::instance::ServiceInstance;
use crate::locator::ServiceLocator;
use crate::module::TypeDescriptor;
use sdk_common::{CapabilityKey, Contract, DependencyResult};
use std::sync::Arc;

/// 注册管理器 trait
///
/// 运行时管理器写入默认绑定表，覆盖管理器写入覆盖绑定表。
/// 两者共享相同的校验规则。
pub trait ServiceRegistrationManager: Send + Sync {
    /// 注册能力绑定
    ///
    /// `capability` 或 `instance` 为 `None`、能力受保护、能力不是契约，
    /// 或实例未实现该能力时返回无效注册错误。
    fn register(
        &self,
        capability: Option<&CapabilityKey>,
        instance: Option<ServiceInstance>,
    ) -> DependencyResult<()>;
}

/// 运行时注册管理器 trait
pub trait RuntimeRegistrationManager: ServiceRegistrationManager {
    /// 通过无参构造函数创建实例并注册
    fn register_type(
        &self,
        capability: Option<&CapabilityKey>,
        descriptor: Option<&TypeDescriptor>,
    ) -> DependencyResult<()>;
}

/// 覆盖注册管理器 trait
pub trait OverrideRegistrationManager: ServiceRegistrationManager {
    /// 清除所有覆盖绑定，返回清除数量
    fn clear_overrides(&self) -> usize;
}

/// 注册管理器扩展方法
pub trait RegistrationManagerExt: ServiceRegistrationManager {
    /// 以契约类型注册实例
    fn register_instance<C>(&self, instance: Arc<C>) -> DependencyResult<()>
    where
        C: ?Sized + Contract,
    {
        let capability = CapabilityKey::of::<C>();
        self.register(
            Some(&capability),
            Some(ServiceInstance::from_capability(instance)),
        )
    }

    /// 以能力标识注册服务实例
    fn register_service(
        &self,
        capability: &CapabilityKey,
        instance: ServiceInstance,
    ) -> DependencyResult<()> {
        self.register(Some(capability), Some(instance))
    }
}

impl<M: ServiceRegistrationManager + ?Sized> RegistrationManagerExt for M {}

/// 运行时注册管理器扩展方法
pub trait RuntimeRegistrationManagerExt: RuntimeRegistrationManager {
    /// 以契约类型注册可构造类型
    fn register_type_for<C>(&self, descriptor: &TypeDescriptor) -> DependencyResult<()>
    where
        C: ?Sized + Contract,
    {
        let capability = CapabilityKey::of::<C>();
        self.register_type(Some(&capability), Some(descriptor))
    }
}

impl<M: RuntimeRegistrationManager + ?Sized> RuntimeRegistrationManagerExt for M {}

/// 定位器内部保护能力
///
/// 这些能力由定位器自身管理，不允许通过注册管理器绑定。
pub fn protected_capabilities() -> [CapabilityKey; 4] {
    [
        CapabilityKey::of::<dyn RuntimeRegistrationManager>(),
        CapabilityKey::of::<dyn OverrideRegistrationManager>(),
        CapabilityKey::of::<dyn ServiceRegistrationManager>(),
        CapabilityKey::of::<dyn ServiceLocator>(),
    ]
}

/// 检查能力是否受保护
pub fn is_protected(capability: &CapabilityKey) -> bool {
    protected_capabilities()
        .iter()
        .any(|protected| protected.id() == capability.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdk_common::declare_contract;

    trait Compute: Send + Sync {}
    declare_contract!(dyn Compute);

    #[test]
    fn test_protected_capabilities() {
        assert!(is_protected(&CapabilityKey::of::<dyn ServiceLocator>()));
        assert!(is_protected(&CapabilityKey::of::<dyn ServiceRegistrationManager>()));
        assert!(is_protected(&CapabilityKey::of::<dyn RuntimeRegistrationManager>()));
        assert!(is_protected(&CapabilityKey::of::<dyn OverrideRegistrationManager>()));
        assert!(!is_protected(&CapabilityKey::of::<dyn Compute>()));
    }
}
