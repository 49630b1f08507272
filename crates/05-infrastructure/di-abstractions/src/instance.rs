//! 服务实例
//!
//! 类型擦除后的服务实例，记录其具体类型、身份以及所实现的能力视图

use crate::registrar::ServiceRegistrar;
use sdk_common::{CapabilityKey, Contract, TypeInfo};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 类型擦除的服务（内部保存 `Arc<C>`）
pub type ErasedService = Arc<dyn Any + Send + Sync>;

/// 实例身份
///
/// 取自共享分配的数据指针，同一 `Arc` 的所有克隆具有相同身份。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(usize);

impl InstanceId {
    /// 获取 `Arc` 的实例身份
    pub fn of<T: ?Sized>(value: &Arc<T>) -> Self {
        Self(Arc::as_ptr(value) as *const () as usize)
    }
}

/// 服务实例
#[derive(Clone)]
pub struct ServiceInstance {
    concrete: TypeInfo,
    id: InstanceId,
    facets: HashMap<TypeId, ErasedService>,
}

impl ServiceInstance {
    /// 以单一契约包装实例
    ///
    /// 契约对象无法还原其实现类型，此时 [`concrete_type`](Self::concrete_type)
    /// 记录的是契约类型本身。需要实现类型名时使用 [`InstanceBuilder`]。
    pub fn from_capability<C: ?Sized + Contract>(instance: Arc<C>) -> Self {
        let id = InstanceId::of(&instance);
        let mut facets = HashMap::new();
        facets.insert(TypeId::of::<C>(), Arc::new(instance) as ErasedService);

        Self {
            concrete: TypeInfo::of::<C>(),
            id,
            facets,
        }
    }

    /// 具体类型信息
    ///
    /// 由 [`ServiceInstance::from_capability`] 创建的实例返回契约类型。
    pub fn concrete_type(&self) -> &TypeInfo {
        &self.concrete
    }

    /// 实例身份
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// 是否实现指定能力
    pub fn satisfies(&self, capability: &CapabilityKey) -> bool {
        self.facets.contains_key(&capability.id())
    }

    /// 获取指定能力的擦除视图
    pub fn erased_facet(&self, capability: &CapabilityKey) -> Option<ErasedService> {
        self.facets.get(&capability.id()).cloned()
    }

    /// 获取指定契约的视图
    pub fn facet<C: ?Sized + Contract>(&self) -> Option<Arc<C>> {
        self.facets
            .get(&TypeId::of::<C>())
            .and_then(|erased| erased.downcast_ref::<Arc<C>>())
            .cloned()
    }

    /// 若实例同时是注册器，返回注册器视图
    pub fn registrar(&self) -> Option<Arc<dyn ServiceRegistrar>> {
        self.facet::<dyn ServiceRegistrar>()
    }
}

impl fmt::Debug for ServiceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceInstance")
            .field("concrete", &self.concrete.name)
            .field("id", &self.id)
            .field("facets", &self.facets.len())
            .finish()
    }
}

/// 服务实例构建器
///
/// ```rust
/// use di_abstractions::InstanceBuilder;
/// use sdk_common::declare_contract;
///
/// pub trait Endpoint: Send + Sync {
///     fn url(&self) -> String;
/// }
/// declare_contract!(dyn Endpoint);
///
/// struct Keystone;
/// impl Endpoint for Keystone {
///     fn url(&self) -> String {
///         "https://keystone.example.com/v3".to_string()
///     }
/// }
///
/// let instance = InstanceBuilder::new(Keystone)
///     .provides::<dyn Endpoint>(|k| k)
///     .build();
/// assert!(instance.facet::<dyn Endpoint>().is_some());
/// ```
pub struct InstanceBuilder<T> {
    value: Arc<T>,
    facets: HashMap<TypeId, ErasedService>,
}

impl<T> InstanceBuilder<T>
where
    T: Send + Sync + 'static,
{
    /// 创建新的构建器
    pub fn new(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// 从已共享的实例创建构建器
    pub fn from_arc(value: Arc<T>) -> Self {
        Self {
            value,
            facets: HashMap::new(),
        }
    }

    /// 声明实例实现的契约
    pub fn provides<C>(mut self, cast: impl FnOnce(Arc<T>) -> Arc<C>) -> Self
    where
        C: ?Sized + Contract,
    {
        let facet: Arc<C> = cast(Arc::clone(&self.value));
        self.facets
            .insert(TypeId::of::<C>(), Arc::new(facet) as ErasedService);
        self
    }

    /// 声明实例同时是注册器
    pub fn registrar(self, cast: impl FnOnce(Arc<T>) -> Arc<dyn ServiceRegistrar>) -> Self {
        self.provides::<dyn ServiceRegistrar>(cast)
    }

    /// 构建服务实例
    pub fn build(self) -> ServiceInstance {
        ServiceInstance {
            concrete: TypeInfo::of::<T>(),
            id: InstanceId::of(&self.value),
            facets: self.facets,
        }
    }
}
