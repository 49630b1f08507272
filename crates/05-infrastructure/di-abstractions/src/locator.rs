//! 服务定位器抽象接口
//!
//! SDK 其余部分获取依赖的唯一入口

use crate::instance::ErasedService;
use crate::module::ServiceModule;
use sdk_common::{CapabilityKey, Contract, DependencyError, DependencyResult};
use std::sync::Arc;

/// 服务定位器 trait
///
/// 解析顺序：覆盖绑定、默认绑定；两者都未命中且存在新模块时重新注册一次后重试。
pub trait ServiceLocator: Send + Sync {
    /// 解析能力（类型擦除）
    fn locate_erased(&self, capability: &CapabilityKey) -> DependencyResult<ErasedService>;

    /// 检查能力当前是否已绑定（不触发重新扫描）
    fn can_locate(&self, capability: &CapabilityKey) -> bool;

    /// 注册模块，并调用其中新发现的注册器，返回调用的注册器数量
    fn ensure_module_registration(&self, module: Arc<ServiceModule>) -> DependencyResult<usize>;
}

/// 服务定位器扩展方法
pub trait LocateExt: ServiceLocator {
    /// 解析契约
    fn locate<C>(&self) -> DependencyResult<Arc<C>>
    where
        C: ?Sized + Contract,
    {
        let capability = CapabilityKey::of::<C>();
        let erased = self.locate_erased(&capability)?;
        erased
            .downcast_ref::<Arc<C>>()
            .cloned()
            .ok_or_else(|| DependencyError::resolution(capability.name()))
    }

    /// 解析契约，失败时返回 `None`
    fn try_locate<C>(&self) -> Option<Arc<C>>
    where
        C: ?Sized + Contract,
    {
        self.locate::<C>().ok()
    }

    /// 检查契约当前是否已绑定
    fn is_bound<C>(&self) -> bool
    where
        C: ?Sized + Contract,
    {
        self.can_locate(&CapabilityKey::of::<C>())
    }
}

impl<L: ServiceLocator + ?Sized> LocateExt for L {}
