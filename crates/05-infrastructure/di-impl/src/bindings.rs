//! 绑定表
//!
//! 能力标识到服务实例的映射，同一能力最多一个绑定，后写覆盖先写

use di_abstractions::{ErasedService, ServiceInstance};
use parking_lot::Mutex;
use sdk_common::CapabilityKey;
use std::any::TypeId;
use std::collections::HashMap;

/// 单条绑定
#[derive(Debug, Clone)]
pub struct Binding {
    /// 能力标识
    pub capability: CapabilityKey,
    /// 服务实例
    pub instance: ServiceInstance,
}

/// 绑定表
#[derive(Debug)]
pub struct BindingTable {
    name: &'static str,
    bindings: Mutex<HashMap<TypeId, Binding>>,
}

impl BindingTable {
    /// 创建新的绑定表
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            bindings: Mutex::new(HashMap::new()),
        }
    }

    /// 绑定表名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 写入绑定，返回被替换的旧绑定
    pub fn insert(&self, capability: CapabilityKey, instance: ServiceInstance) -> Option<Binding> {
        let mut bindings = self.bindings.lock();
        bindings.insert(
            capability.id(),
            Binding {
                capability,
                instance,
            },
        )
    }

    /// 查找能力的擦除视图
    pub fn lookup(&self, capability: &CapabilityKey) -> Option<ErasedService> {
        let bindings = self.bindings.lock();
        bindings
            .get(&capability.id())
            .and_then(|binding| binding.instance.erased_facet(capability))
    }

    /// 获取绑定
    pub fn get(&self, capability: &CapabilityKey) -> Option<Binding> {
        self.bindings.lock().get(&capability.id()).cloned()
    }

    /// 是否包含能力
    pub fn contains(&self, capability: &CapabilityKey) -> bool {
        self.bindings.lock().contains_key(&capability.id())
    }

    /// 已绑定的能力
    pub fn capabilities(&self) -> Vec<CapabilityKey> {
        self.bindings
            .lock()
            .values()
            .map(|binding| binding.capability.clone())
            .collect()
    }

    /// 绑定数量
    pub fn len(&self) -> usize {
        self.bindings.lock().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.bindings.lock().is_empty()
    }

    /// 清空绑定表，返回清除数量
    pub fn clear(&self) -> usize {
        let mut bindings = self.bindings.lock();
        let count = bindings.len();
        bindings.clear();
        count
    }
}
