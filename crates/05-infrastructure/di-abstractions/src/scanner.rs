//! 注册器发现抽象接口
//!
//! 跟踪已加载的模块，并从中发现注册器

use crate::module::ServiceModule;
use crate::registrar::ServiceRegistrar;
use sdk_common::DependencyResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 注册器发现 trait
///
/// 维护模块观察集合，按增量方式扫描新模块。
pub trait RegistrarDiscovery: Send + Sync {
    /// 添加模块到观察集合，模块首次出现时返回 `true`
    fn add_module(&self, module: Arc<ServiceModule>) -> bool;

    /// 是否存在尚未纳入上次扫描的模块（仅探测，不消费）
    fn has_new_modules(&self) -> bool;

    /// 获取当前完整的注册器集合
    fn registrars(&self) -> DependencyResult<Vec<Arc<dyn ServiceRegistrar>>>;

    /// 仅获取自上次交付以来新发现的注册器
    fn new_registrars(&self) -> DependencyResult<Vec<Arc<dyn ServiceRegistrar>>>;

    /// 获取观察集合中的所有模块
    fn watched_modules(&self) -> Vec<Arc<ServiceModule>>;

    /// 重置扫描状态，下次扫描重新处理全部模块
    fn reset(&self);

    /// 获取发现器名称
    fn name(&self) -> &str;
}

/// 注册器排序策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrarOrdering {
    /// 按模块声明的依赖关系排序，被依赖的模块优先
    #[default]
    ModuleDependencies,
    /// 按模块被发现的顺序
    Discovery,
}
