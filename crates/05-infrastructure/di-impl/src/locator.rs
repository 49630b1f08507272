//! 服务定位器实现

use crate::bindings::BindingTable;
use crate::config::LocatorConfig;
use crate::factory::DefaultRegistrarFactory;
use crate::hosting_module;
use crate::managers::{OverrideRegistrationManagerImpl, RuntimeRegistrationManagerImpl};
use crate::scanner::ModuleScanner;
use di_abstractions::{
    ErasedService, InstanceBuilder, ModuleCatalog, OverrideRegistrationManager,
    RegistrarDiscovery, RegistrarFactory, RuntimeRegistrationManager, ServiceLocator,
    ServiceModule, ServiceRegistrar,
};
use sdk_common::{CapabilityKey, DependencyError, DependencyResult};
use std::sync::{Arc, Weak};
use tracing::{debug, info};

/// 定位器统计信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorStats {
    /// 默认绑定数量
    pub default_bindings: usize,
    /// 覆盖绑定数量
    pub override_bindings: usize,
    /// 观察的模块数量
    pub watched_modules: usize,
}

/// 服务定位器实现
///
/// 解析顺序：内置管理器、覆盖绑定、默认绑定。
/// 未命中且观察集合出现新模块时，重新调用全部注册器后再查找一次。
pub struct ServiceLocatorImpl {
    config: LocatorConfig,
    builtins: BindingTable,
    defaults: Arc<BindingTable>,
    overrides: Arc<BindingTable>,
    runtime: Arc<RuntimeRegistrationManagerImpl>,
    override_manager: Arc<OverrideRegistrationManagerImpl>,
    discovery: Arc<dyn RegistrarDiscovery>,
}

impl ServiceLocatorImpl {
    /// 创建构建器
    pub fn builder() -> ServiceLocatorBuilder {
        ServiceLocatorBuilder::new()
    }

    /// 以默认配置创建定位器
    pub fn new() -> DependencyResult<Arc<Self>> {
        Self::builder().build()
    }

    /// 运行时注册管理器
    pub fn runtime_manager(&self) -> Arc<dyn RuntimeRegistrationManager> {
        self.runtime.clone()
    }

    /// 覆盖注册管理器
    pub fn override_manager(&self) -> Arc<dyn OverrideRegistrationManager> {
        self.override_manager.clone()
    }

    /// 注册器发现器
    pub fn discovery(&self) -> &Arc<dyn RegistrarDiscovery> {
        &self.discovery
    }

    /// 当前配置
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// 统计信息
    pub fn stats(&self) -> LocatorStats {
        LocatorStats {
            default_bindings: self.defaults.len(),
            override_bindings: self.overrides.len(),
            watched_modules: self.discovery.watched_modules().len(),
        }
    }

    /// 完整注册：按顺序调用当前全部注册器，返回调用数量
    ///
    /// 注册器需要是幂等的，同一注册器可能被多次调用。
    pub fn register_all(&self) -> DependencyResult<usize> {
        let registrars = self.discovery.registrars()?;
        debug!("调用全部注册器: {} 个", registrars.len());

        for registrar in &registrars {
            registrar.register(self.runtime.as_ref(), self)?;
        }

        Ok(registrars.len())
    }

    fn bind_builtins(&self) {
        self.builtins.insert(
            CapabilityKey::of::<dyn RuntimeRegistrationManager>(),
            InstanceBuilder::from_arc(Arc::clone(&self.runtime))
                .provides::<dyn RuntimeRegistrationManager>(|m| m)
                .build(),
        );
        self.builtins.insert(
            CapabilityKey::of::<dyn OverrideRegistrationManager>(),
            InstanceBuilder::from_arc(Arc::clone(&self.override_manager))
                .provides::<dyn OverrideRegistrationManager>(|m| m)
                .build(),
        );
    }

    fn lookup(&self, capability: &CapabilityKey) -> Option<ErasedService> {
        self.builtins
            .lookup(capability)
            .or_else(|| self.overrides.lookup(capability))
            .or_else(|| self.defaults.lookup(capability))
    }
}

impl ServiceLocator for ServiceLocatorImpl {
    fn locate_erased(&self, capability: &CapabilityKey) -> DependencyResult<ErasedService> {
        if let Some(service) = self.lookup(capability) {
            return Ok(service);
        }

        if self.config.rescan_on_miss && self.discovery.has_new_modules() {
            debug!("未找到 {}，检测到新模块，重新注册", capability);
            self.register_all()?;

            if let Some(service) = self.lookup(capability) {
                return Ok(service);
            }
        }

        debug!("无法解析能力: {}", capability);
        Err(DependencyError::resolution(capability.name()))
    }

    fn can_locate(&self, capability: &CapabilityKey) -> bool {
        self.lookup(capability).is_some()
    }

    fn ensure_module_registration(&self, module: Arc<ServiceModule>) -> DependencyResult<usize> {
        let name = module.name().to_string();
        if self.discovery.add_module(module) {
            info!("添加模块: {}", name);
        } else {
            debug!("模块已在观察集合中: {}", name);
        }

        let registrars = self.discovery.new_registrars()?;
        for registrar in &registrars {
            registrar.register(self.runtime.as_ref(), self)?;
        }

        debug!("模块 {} 注册完成: 调用 {} 个注册器", name, registrars.len());
        Ok(registrars.len())
    }
}

/// 服务定位器构建器
#[derive(Default)]
pub struct ServiceLocatorBuilder {
    config: LocatorConfig,
    catalog: Option<Arc<ModuleCatalog>>,
    modules: Vec<Arc<ServiceModule>>,
    discovery: Option<Arc<dyn RegistrarDiscovery>>,
    factory: Option<Arc<dyn RegistrarFactory>>,
}

impl ServiceLocatorBuilder {
    /// 创建构建器，使用默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置配置
    pub fn with_config(mut self, config: LocatorConfig) -> Self {
        self.config = config;
        self
    }

    /// 跟随指定的模块目录，替代进程级目录
    pub fn with_catalog(mut self, catalog: Arc<ModuleCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// 添加初始模块
    pub fn with_module(mut self, module: impl Into<Arc<ServiceModule>>) -> Self {
        self.modules.push(module.into());
        self
    }

    /// 使用自定义的注册器发现器
    pub fn with_discovery(mut self, discovery: Arc<dyn RegistrarDiscovery>) -> Self {
        self.discovery = Some(discovery);
        self
    }

    /// 使用自定义的注册器工厂
    pub fn with_factory(mut self, factory: Arc<dyn RegistrarFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// 构建定位器并执行首次完整注册
    pub fn build(self) -> DependencyResult<Arc<ServiceLocatorImpl>> {
        let Self {
            config,
            catalog,
            modules,
            discovery,
            factory,
        } = self;

        let discovery = discovery.unwrap_or_else(|| {
            let factory = factory.unwrap_or_else(|| {
                Arc::new(DefaultRegistrarFactory::new()) as Arc<dyn RegistrarFactory>
            });
            let scanner = ModuleScanner::new(factory, config.registrar_ordering);
            let catalog =
                catalog.or_else(|| config.follow_process_catalog.then(ModuleCatalog::global));

            let discovery: Arc<dyn RegistrarDiscovery> = match catalog {
                Some(catalog) => Arc::new(scanner.with_catalog(catalog)),
                None => Arc::new(scanner),
            };
            discovery
        });

        let defaults = Arc::new(BindingTable::new("default"));
        let overrides = Arc::new(BindingTable::new("override"));

        let locator = Arc::new_cyclic(|weak: &Weak<ServiceLocatorImpl>| {
            let weak: Weak<dyn ServiceLocator> = weak.clone();
            ServiceLocatorImpl {
                config,
                builtins: BindingTable::new("builtin"),
                runtime: Arc::new(RuntimeRegistrationManagerImpl::new(
                    Arc::clone(&defaults),
                    weak,
                )),
                override_manager: Arc::new(OverrideRegistrationManagerImpl::new(Arc::clone(
                    &overrides,
                ))),
                defaults,
                overrides,
                discovery,
            }
        });

        locator.bind_builtins();
        locator.discovery.add_module(hosting_module());
        for module in modules {
            locator.discovery.add_module(module);
        }

        let count = locator.register_all()?;
        info!(
            "服务定位器已创建: 发现器 {}, 调用 {} 个注册器",
            locator.discovery.name(),
            count
        );

        Ok(locator)
    }
}
