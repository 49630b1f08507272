//! 模块扫描器
//!
//! 基于模块清单的注册器发现实现

use crate::ordering::order_modules;
use di_abstractions::{
    ModuleCatalog, RegistrarDiscovery, RegistrarFactory, RegistrarOrdering, ServiceModule,
    ServiceRegistrar, TypeDescriptor,
};
use parking_lot::Mutex;
use sdk_common::DependencyResult;
use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// 已知的注册器类型
#[derive(Debug, Clone)]
struct KnownRegistrar {
    module: String,
    descriptor: TypeDescriptor,
}

impl KnownRegistrar {
    fn is_same(&self, module: &str, type_id: TypeId) -> bool {
        self.module == module && self.descriptor.type_info().id == type_id
    }
}

#[derive(Debug, Default)]
struct ScannerState {
    watched: Vec<Arc<ServiceModule>>,
    /// 上次扫描已纳入的模块
    scanned: HashSet<String>,
    /// 只追加，直到重置
    known: Vec<KnownRegistrar>,
    /// 已交付给调用方的注册器数量
    delivered: usize,
    catalog_cursor: usize,
}

impl ScannerState {
    fn watch(&mut self, module: Arc<ServiceModule>) -> bool {
        if self.watched.iter().any(|m| m.name() == module.name()) {
            return false;
        }

        debug!("观察模块: {}", module.name());
        self.watched.push(module);
        true
    }

    fn is_dirty(&self) -> bool {
        self.watched
            .iter()
            .any(|module| !self.scanned.contains(module.name()))
    }
}

/// 模块扫描器
///
/// 观察集合由显式添加的模块和（可选的）进程级模块目录共同组成。
/// 扫描是增量的：只有观察集合出现新模块时才重新计算注册器集合，
/// 已知注册器的位置保持不变，新注册器追加在末尾。
pub struct ModuleScanner {
    factory: Arc<dyn RegistrarFactory>,
    ordering: RegistrarOrdering,
    catalog: Option<Arc<ModuleCatalog>>,
    state: Mutex<ScannerState>,
}

impl ModuleScanner {
    /// 创建新的扫描器
    pub fn new(factory: Arc<dyn RegistrarFactory>, ordering: RegistrarOrdering) -> Self {
        Self {
            factory,
            ordering,
            catalog: None,
            state: Mutex::new(ScannerState::default()),
        }
    }

    /// 跟随模块目录
    pub fn with_catalog(mut self, catalog: Arc<ModuleCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// 排序策略
    pub fn ordering(&self) -> RegistrarOrdering {
        self.ordering
    }

    fn sync_catalog(&self, state: &mut ScannerState) {
        let Some(catalog) = &self.catalog else {
            return;
        };

        for module in catalog.modules_since(state.catalog_cursor) {
            state.catalog_cursor += 1;
            state.watch(module);
        }
    }

    fn rescan(&self, state: &mut ScannerState) {
        if !state.is_dirty() {
            return;
        }

        let modules = match self.ordering {
            RegistrarOrdering::ModuleDependencies => order_modules(&state.watched),
            RegistrarOrdering::Discovery => state.watched.clone(),
        };

        let before = state.known.len();
        for module in &modules {
            for descriptor in module.types() {
                if !descriptor.is_registrar() {
                    trace!(
                        "跳过非注册器类型: {} ({})",
                        descriptor.type_info().short_name(),
                        module.name()
                    );
                    continue;
                }

                let type_id = descriptor.type_info().id;
                if state
                    .known
                    .iter()
                    .any(|known| known.is_same(module.name(), type_id))
                {
                    continue;
                }

                state.known.push(KnownRegistrar {
                    module: module.name().to_string(),
                    descriptor: descriptor.clone(),
                });
            }
        }

        state.scanned = state
            .watched
            .iter()
            .map(|module| module.name().to_string())
            .collect();

        info!(
            "扫描完成: {} 个模块, 新发现 {} 个注册器",
            state.watched.len(),
            state.known.len() - before
        );
    }

    /// 在锁外实例化注册器，注册器构造函数可以访问扫描器
    fn materialize(
        &self,
        registrars: Vec<KnownRegistrar>,
    ) -> DependencyResult<Vec<Arc<dyn ServiceRegistrar>>> {
        registrars
            .iter()
            .map(|known| self.factory.create(&known.descriptor))
            .collect()
    }
}

impl RegistrarDiscovery for ModuleScanner {
    fn add_module(&self, module: Arc<ServiceModule>) -> bool {
        let mut state = self.state.lock();
        self.sync_catalog(&mut state);
        state.watch(module)
    }

    fn has_new_modules(&self) -> bool {
        let mut state = self.state.lock();
        self.sync_catalog(&mut state);
        state.is_dirty()
    }

    fn registrars(&self) -> DependencyResult<Vec<Arc<dyn ServiceRegistrar>>> {
        let known = {
            let mut state = self.state.lock();
            self.sync_catalog(&mut state);
            self.rescan(&mut state);
            state.delivered = state.known.len();
            state.known.clone()
        };

        self.materialize(known)
    }

    fn new_registrars(&self) -> DependencyResult<Vec<Arc<dyn ServiceRegistrar>>> {
        let fresh = {
            let mut state = self.state.lock();
            self.sync_catalog(&mut state);
            self.rescan(&mut state);
            let fresh = state.known[state.delivered..].to_vec();
            state.delivered = state.known.len();
            fresh
        };

        self.materialize(fresh)
    }

    fn watched_modules(&self) -> Vec<Arc<ServiceModule>> {
        let mut state = self.state.lock();
        self.sync_catalog(&mut state);
        state.watched.clone()
    }

    fn reset(&self) {
        let mut state = self.state.lock();
        state.scanned.clear();
        state.known.clear();
        state.delivered = 0;
        info!("重置扫描状态: {} 个模块待重新扫描", state.watched.len());
    }

    fn name(&self) -> &str {
        "ModuleScanner"
    }
}
