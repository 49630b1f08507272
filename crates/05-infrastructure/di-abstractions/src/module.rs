//! 模块与类型描述
//!
//! 模块以清单形式声明导出的类型，替代运行时的类型扫描。
//! 进程级的 [`ModuleCatalog`] 只追加不删除，由静态初始化或启动代码填充。

use crate::instance::{InstanceBuilder, ServiceInstance};
use crate::registrar::ServiceRegistrar;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use sdk_common::{
    BoxError, CapabilityKey, CapabilityKind, Contract, DependencyError, DependencyResult, TypeInfo,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// 无参构造函数
pub type Constructor = Arc<dyn Fn() -> Result<ServiceInstance, BoxError> + Send + Sync>;

/// 类型描述符
///
/// 描述模块导出的一个类型：类型信息、抽象或具体、声明实现的能力集合以及可选的无参构造函数。
#[derive(Clone)]
pub struct TypeDescriptor {
    info: TypeInfo,
    kind: CapabilityKind,
    capabilities: Vec<CapabilityKey>,
    constructor: Option<Constructor>,
}

impl TypeDescriptor {
    /// 描述一个契约类型
    pub fn contract<C: ?Sized + Contract>() -> Self {
        Self {
            info: TypeInfo::of::<C>(),
            kind: CapabilityKind::Contract,
            capabilities: Vec::new(),
            constructor: None,
        }
    }

    /// 描述一个具体类型
    pub fn concrete<T: 'static>() -> Self {
        Self {
            info: TypeInfo::of::<T>(),
            kind: CapabilityKind::Concrete,
            capabilities: Vec::new(),
            constructor: None,
        }
    }

    /// 描述一个可默认构造的注册器类型
    pub fn registrar<R>() -> Self
    where
        R: ServiceRegistrar + Default + 'static,
    {
        Self::concrete::<R>()
            .implements::<dyn ServiceRegistrar>()
            .with_constructor(|| {
                Ok(InstanceBuilder::new(R::default())
                    .registrar(|r| r)
                    .build())
            })
    }

    /// 描述一个可默认构造、实现单一契约的服务类型
    pub fn default_service<T, C>(cast: fn(Arc<T>) -> Arc<C>) -> Self
    where
        T: Default + Send + Sync + 'static,
        C: ?Sized + Contract,
    {
        Self::concrete::<T>()
            .implements::<C>()
            .with_constructor(move || Ok(InstanceBuilder::new(T::default()).provides(cast).build()))
    }

    /// 声明实现的契约
    pub fn implements<C: ?Sized + Contract>(mut self) -> Self {
        let capability = CapabilityKey::of::<C>();
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// 设置无参构造函数
    pub fn with_constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> Result<ServiceInstance, BoxError> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.info
    }

    /// 类型种类
    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    /// 声明实现的能力集合
    pub fn capabilities(&self) -> &[CapabilityKey] {
        &self.capabilities
    }

    /// 是否声明实现指定能力
    pub fn declares(&self, capability: &CapabilityKey) -> bool {
        self.capabilities.iter().any(|c| c.id() == capability.id())
    }

    /// 是否具有无参构造函数
    pub fn has_default_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// 是否为可实例化的注册器类型
    ///
    /// 要求：具体类型、实现注册器契约、具有无参构造函数。
    pub fn is_registrar(&self) -> bool {
        self.kind == CapabilityKind::Concrete
            && self.declares(&CapabilityKey::of::<dyn ServiceRegistrar>())
            && self.has_default_constructor()
    }

    /// 调用无参构造函数
    pub fn construct(&self) -> DependencyResult<ServiceInstance> {
        let constructor = self.constructor.as_ref().ok_or_else(|| {
            DependencyError::instantiation(self.info.name, "缺少无参构造函数", None)
        })?;

        constructor()
            .map_err(|e| DependencyError::instantiation(self.info.name, "构造函数执行失败", Some(e)))
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type", &self.info.name)
            .field("kind", &self.kind)
            .field("capabilities", &self.capabilities)
            .field("constructor", &self.constructor.as_ref().map(|_| "<function>"))
            .finish()
    }
}

/// 服务模块
///
/// 可部署单元（库或可执行程序）的清单，模块身份由名称决定。
#[derive(Debug, Clone)]
pub struct ServiceModule {
    name: String,
    dependencies: Vec<String>,
    types: Vec<TypeDescriptor>,
}

impl ServiceModule {
    /// 创建新的模块
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
            types: Vec::new(),
        }
    }

    /// 声明依赖的模块
    pub fn depends_on(mut self, module: impl Into<String>) -> Self {
        self.dependencies.push(module.into());
        self
    }

    /// 导出类型
    pub fn export(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    /// 批量导出类型
    pub fn with_exports(mut self, descriptors: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.types.extend(descriptors);
        self
    }

    /// 模块名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 依赖的模块名称
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// 导出的类型
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    /// 导出的注册器类型
    pub fn registrar_types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter().filter(|t| t.is_registrar())
    }
}

/// 全局模块目录
static GLOBAL_MODULE_CATALOG: Lazy<Arc<ModuleCatalog>> =
    Lazy::new(|| Arc::new(ModuleCatalog::new()));

/// 模块目录
///
/// 只追加的模块列表。扫描器通过游标读取新追加的模块。
#[derive(Debug, Default)]
pub struct ModuleCatalog {
    modules: RwLock<Vec<Arc<ServiceModule>>>,
}

impl ModuleCatalog {
    /// 创建新的模块目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取进程级模块目录
    pub fn global() -> Arc<ModuleCatalog> {
        Arc::clone(&GLOBAL_MODULE_CATALOG)
    }

    /// 提交模块
    ///
    /// 同名模块已存在时保留原模块并返回它。
    pub fn submit(&self, module: ServiceModule) -> Arc<ServiceModule> {
        let mut modules = self.modules.write();
        if let Some(existing) = modules.iter().find(|m| m.name() == module.name()) {
            warn!("模块已存在，忽略重复提交: {}", module.name());
            return Arc::clone(existing);
        }

        debug!("提交模块: {} ({} 个导出类型)", module.name(), module.types().len());
        let module = Arc::new(module);
        modules.push(Arc::clone(&module));
        module
    }

    /// 模块数量
    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }

    /// 获取游标之后追加的模块
    pub fn modules_since(&self, cursor: usize) -> Vec<Arc<ServiceModule>> {
        let modules = self.modules.read();
        modules.iter().skip(cursor).cloned().collect()
    }

    /// 按名称查找模块
    pub fn find(&self, name: &str) -> Option<Arc<ServiceModule>> {
        self.modules.read().iter().find(|m| m.name() == name).cloned()
    }
}
