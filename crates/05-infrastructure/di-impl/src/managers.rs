//! 注册管理器实现
//!
//! 运行时管理器写入默认绑定表，覆盖管理器写入覆盖绑定表

use crate::bindings::BindingTable;
use crate::validation::{validate_registration, validate_type_registration};
use di_abstractions::{
    InstanceId, OverrideRegistrationManager, RuntimeRegistrationManager, ServiceInstance,
    ServiceLocator, ServiceRegistrar, ServiceRegistrationManager, TypeDescriptor,
};
use parking_lot::Mutex;
use sdk_common::{CapabilityKey, DependencyError, DependencyResult};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// 运行时注册管理器
///
/// 注册的实例若同时是注册器，且该能力此前记录的不是同一实例，
/// 会立即以本管理器和所属定位器调用它的 `register`。
/// 级联失败时撤销该实例的记录，再次注册同一实例会重新级联。
pub struct RuntimeRegistrationManagerImpl {
    bindings: Arc<BindingTable>,
    /// 能力 -> 最近一次注册的实例
    discovered: Mutex<HashMap<TypeId, InstanceId>>,
    locator: Weak<dyn ServiceLocator>,
}

impl RuntimeRegistrationManagerImpl {
    /// 创建新的运行时注册管理器
    pub fn new(bindings: Arc<BindingTable>, locator: Weak<dyn ServiceLocator>) -> Self {
        Self {
            bindings,
            discovered: Mutex::new(HashMap::new()),
            locator,
        }
    }

    /// 记录能力对应的实例，返回是否为新实例
    fn record_discovery(&self, capability: &CapabilityKey, instance: &ServiceInstance) -> bool {
        let mut discovered = self.discovered.lock();
        let previous = discovered.insert(capability.id(), instance.id());
        previous != Some(instance.id())
    }

    /// 撤销实例记录，使同一实例再次注册时重新级联
    fn forget_discovery(&self, capability: &CapabilityKey, instance: &ServiceInstance) {
        let mut discovered = self.discovered.lock();
        if discovered.get(&capability.id()) == Some(&instance.id()) {
            discovered.remove(&capability.id());
        }
    }

    /// 级联调用注册器实例
    fn cascade(&self, capability: &CapabilityKey, instance: &ServiceInstance) -> DependencyResult<()> {
        let Some(registrar) = instance.registrar() else {
            return Ok(());
        };

        let locator = self
            .locator
            .upgrade()
            .ok_or(DependencyError::LocatorReleased)?;

        debug!(
            "级联调用注册器: {} (经由 {})",
            instance.concrete_type().short_name(),
            capability
        );
        registrar.register(self, locator.as_ref())
    }
}

impl ServiceRegistrationManager for RuntimeRegistrationManagerImpl {
    fn register(
        &self,
        capability: Option<&CapabilityKey>,
        instance: Option<ServiceInstance>,
    ) -> DependencyResult<()> {
        let (capability, instance) = validate_registration(capability, instance)?;

        let is_new = self.record_discovery(&capability, &instance);
        info!(
            "注册服务: {} -> {}",
            capability,
            instance.concrete_type().short_name()
        );
        self.bindings.insert(capability.clone(), instance.clone());

        if !is_new {
            debug!("实例已注册过，跳过级联: {}", capability);
            return Ok(());
        }

        // 不持有任何锁，注册器可以重入管理器
        let result = self.cascade(&capability, &instance);
        if let Err(e) = &result {
            warn!("级联注册失败，允许重试: {} ({})", capability, e);
            self.forget_discovery(&capability, &instance);
        }
        result
    }
}

impl RuntimeRegistrationManager for RuntimeRegistrationManagerImpl {
    fn register_type(
        &self,
        capability: Option<&CapabilityKey>,
        descriptor: Option<&TypeDescriptor>,
    ) -> DependencyResult<()> {
        let (capability, descriptor) = validate_type_registration(capability, descriptor)?;

        debug!(
            "通过无参构造函数创建实例: {}",
            descriptor.type_info().short_name()
        );
        let instance = descriptor.construct()?;
        self.register(Some(capability), Some(instance))
    }
}

/// 覆盖注册管理器
///
/// 覆盖绑定优先于默认绑定，不触发级联注册。
pub struct OverrideRegistrationManagerImpl {
    bindings: Arc<BindingTable>,
}

impl OverrideRegistrationManagerImpl {
    /// 创建新的覆盖注册管理器
    pub fn new(bindings: Arc<BindingTable>) -> Self {
        Self { bindings }
    }
}

impl ServiceRegistrationManager for OverrideRegistrationManagerImpl {
    fn register(
        &self,
        capability: Option<&CapabilityKey>,
        instance: Option<ServiceInstance>,
    ) -> DependencyResult<()> {
        let (capability, instance) = validate_registration(capability, instance)?;

        info!(
            "注册覆盖服务: {} -> {}",
            capability,
            instance.concrete_type().short_name()
        );
        self.bindings.insert(capability, instance);
        Ok(())
    }
}

impl OverrideRegistrationManager for OverrideRegistrationManagerImpl {
    fn clear_overrides(&self) -> usize {
        let count = self.bindings.clear();
        info!("清除覆盖绑定: {} 个", count);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocatorConfig;
    use crate::locator::ServiceLocatorImpl;
    use di_abstractions::{InstanceBuilder, LocateExt, RegistrationManagerExt};
    use sdk_common::{declare_contract, RegistrationViolation};

    trait Network: Send + Sync {
        fn cidr(&self) -> &str;
    }
    declare_contract!(dyn Network);

    #[derive(Default)]
    struct ProviderNetwork;

    impl Network for ProviderNetwork {
        fn cidr(&self) -> &str {
            "10.0.0.0/24"
        }
    }

    #[derive(Default)]
    struct NetworkRegistrar;

    impl ServiceRegistrar for NetworkRegistrar {
        fn register(
            &self,
            manager: &dyn ServiceRegistrationManager,
            _locator: &dyn ServiceLocator,
        ) -> DependencyResult<()> {
            let network: Arc<dyn Network> = Arc::new(ProviderNetwork);
            manager.register_instance(network)
        }
    }

    fn detached_runtime() -> (Arc<BindingTable>, RuntimeRegistrationManagerImpl) {
        let bindings = Arc::new(BindingTable::new("default"));
        let locator: Weak<dyn ServiceLocator> = Weak::<ServiceLocatorImpl>::new();
        let manager = RuntimeRegistrationManagerImpl::new(Arc::clone(&bindings), locator);
        (bindings, manager)
    }

    #[test]
    fn test_register_writes_default_table() {
        let (bindings, manager) = detached_runtime();
        let network: Arc<dyn Network> = Arc::new(ProviderNetwork);

        manager.register_instance(network).unwrap();

        assert!(bindings.contains(&CapabilityKey::of::<dyn Network>()));
    }

    #[test]
    fn test_register_type_constructs_instance() {
        let (bindings, manager) = detached_runtime();
        let descriptor = TypeDescriptor::default_service::<ProviderNetwork, dyn Network>(|n| n);

        manager
            .register_type(Some(&CapabilityKey::of::<dyn Network>()), Some(&descriptor))
            .unwrap();

        let binding = bindings.get(&CapabilityKey::of::<dyn Network>()).unwrap();
        assert_eq!(binding.instance.facet::<dyn Network>().unwrap().cidr(), "10.0.0.0/24");
    }

    #[test]
    fn test_cascade_requires_live_locator() {
        let (bindings, manager) = detached_runtime();
        let instance = InstanceBuilder::new(NetworkRegistrar)
            .registrar(|r| r)
            .build();

        let err = manager
            .register(Some(&CapabilityKey::of::<dyn ServiceRegistrar>()), Some(instance))
            .unwrap_err();

        assert!(matches!(err, DependencyError::LocatorReleased));
        assert!(bindings.contains(&CapabilityKey::of::<dyn ServiceRegistrar>()));
        assert!(!bindings.contains(&CapabilityKey::of::<dyn Network>()));
    }

    trait Subnet: Send + Sync {
        fn cidr(&self) -> String;
    }
    declare_contract!(dyn Subnet);

    struct NetworkSubnet(Arc<dyn Network>);

    impl Subnet for NetworkSubnet {
        fn cidr(&self) -> String {
            self.0.cidr().to_string()
        }
    }

    #[derive(Default)]
    struct SubnetRegistrar;

    impl ServiceRegistrar for SubnetRegistrar {
        fn register(
            &self,
            manager: &dyn ServiceRegistrationManager,
            locator: &dyn ServiceLocator,
        ) -> DependencyResult<()> {
            let network = locator.locate::<dyn Network>()?;
            let subnet: Arc<dyn Subnet> = Arc::new(NetworkSubnet(network));
            manager.register_instance(subnet)
        }
    }

    #[test]
    fn test_failed_cascade_can_be_retried() {
        let locator = ServiceLocatorImpl::builder()
            .with_config(LocatorConfig::isolated())
            .build()
            .unwrap();
        let manager = locator.runtime_manager();
        let capability = CapabilityKey::of::<dyn ServiceRegistrar>();
        let instance = InstanceBuilder::new(SubnetRegistrar)
            .registrar(|r| r)
            .build();

        let err = manager
            .register(Some(&capability), Some(instance.clone()))
            .unwrap_err();
        assert!(matches!(err, DependencyError::Resolution { .. }));
        assert!(!locator.is_bound::<dyn Subnet>());

        let network: Arc<dyn Network> = Arc::new(ProviderNetwork);
        manager.register_instance(network).unwrap();
        manager.register(Some(&capability), Some(instance)).unwrap();

        assert_eq!(locator.locate::<dyn Subnet>().unwrap().cidr(), "10.0.0.0/24");
    }

    #[test]
    fn test_override_manager() {
        let bindings = Arc::new(BindingTable::new("override"));
        let manager = OverrideRegistrationManagerImpl::new(Arc::clone(&bindings));
        let network: Arc<dyn Network> = Arc::new(ProviderNetwork);

        manager.register_instance(network).unwrap();
        assert_eq!(bindings.len(), 1);

        let err = manager.register(None, None).unwrap_err();
        assert_eq!(err.violation(), Some(RegistrationViolation::NullCapability));

        assert_eq!(manager.clear_overrides(), 1);
        assert!(bindings.is_empty());
    }
}
