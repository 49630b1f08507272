//! 注册器抽象接口
//!
//! 注册器是可被发现的注册单元，负责向注册管理器写入零个或多个能力绑定

use crate::locator::ServiceLocator;
use crate::manager::ServiceRegistrationManager;
use sdk_common::DependencyResult;

/// 注册器 trait
///
/// 由模块以 [`TypeDescriptor`](crate::TypeDescriptor) 导出，扫描器发现后创建并调用。
/// 注册器应当是幂等的：完整注册流程可能多次调用同一注册器。
pub trait ServiceRegistrar: Send + Sync {
    /// 向管理器注册能力绑定
    fn register(
        &self,
        manager: &dyn ServiceRegistrationManager,
        locator: &dyn ServiceLocator,
    ) -> DependencyResult<()>;
}
