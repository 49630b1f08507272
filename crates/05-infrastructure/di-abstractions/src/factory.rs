//! 注册器工厂抽象接口
//!
//! 根据类型描述符创建注册器实例

use crate::module::TypeDescriptor;
use crate::registrar::ServiceRegistrar;
use sdk_common::DependencyResult;
use std::sync::Arc;

/// 注册器工厂 trait
pub trait RegistrarFactory: Send + Sync {
    /// 创建注册器实例
    ///
    /// 类型缺少无参构造函数、构造失败或实例不是注册器时返回
    /// [`DependencyError::Instantiation`](sdk_common::DependencyError::Instantiation)。
    fn create(&self, descriptor: &TypeDescriptor) -> DependencyResult<Arc<dyn ServiceRegistrar>>;

    /// 获取工厂名称
    fn name(&self) -> &str;
}
