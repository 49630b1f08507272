//! 元数据定义
//!
//! 提供类型与能力标识的元数据信息

use crate::contract::Contract;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// 完整类型名称
    pub name: &'static str,
    /// 类型ID
    pub id: TypeId,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        let name = self.name.strip_prefix("dyn ").unwrap_or(self.name);
        name.rsplit("::").next().unwrap_or(name)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// 能力类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// 抽象契约（trait object）
    Contract,
    /// 具体实现类型
    Concrete,
}

/// 能力标识
///
/// 用于在绑定表中定位服务。只有 [`CapabilityKind::Contract`] 类型的标识可以注册绑定。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapabilityKey {
    info: TypeInfo,
    kind: CapabilityKind,
}

impl CapabilityKey {
    /// 契约能力标识
    pub fn of<C: ?Sized + Contract>() -> Self {
        Self {
            info: TypeInfo::of::<C>(),
            kind: CapabilityKind::Contract,
        }
    }

    /// 具体类型标识
    pub fn concrete<T: 'static>() -> Self {
        Self {
            info: TypeInfo::of::<T>(),
            kind: CapabilityKind::Concrete,
        }
    }

    /// 类型ID
    pub fn id(&self) -> TypeId {
        self.info.id
    }

    /// 完整名称
    pub fn name(&self) -> &'static str {
        self.info.name
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.info
    }

    /// 能力类型
    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    /// 是否为契约
    pub fn is_contract(&self) -> bool {
        self.kind == CapabilityKind::Contract
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare_contract;

    trait Greeter: Send + Sync {}
    declare_contract!(dyn Greeter);

    struct English;

    #[test]
    fn test_contract_key() {
        let key = CapabilityKey::of::<dyn Greeter>();
        assert!(key.is_contract());
        assert_eq!(key.id(), TypeId::of::<dyn Greeter>());
        assert!(key.name().ends_with("Greeter"));
        assert_eq!(key.type_info().short_name(), "Greeter");
    }

    #[test]
    fn test_concrete_key() {
        let key = CapabilityKey::concrete::<English>();
        assert_eq!(key.kind(), CapabilityKind::Concrete);
        assert_eq!(key.type_info().short_name(), "English");
        assert_ne!(key, CapabilityKey::of::<dyn Greeter>());
    }
}
