//! 进程级模块目录与静态登记的集成测试

use di_abstractions::{
    LocateExt, ModuleCatalog, RegistrationManagerExt, ServiceLocator, ServiceModule,
    ServiceRegistrar, ServiceRegistrationManager, TypeDescriptor,
};
use di_impl::{LocatorConfig, ServiceLocatorImpl, HOSTING_MODULE_NAME};
use locator_integration_tests::{IdentityEndpoint, IdentityRegistrar, ObjectStoreEndpoint};
use registrar_macros::service_module;
use sdk_common::{declare_contract, DependencyResult};
use std::sync::Arc;

#[service_module(name = "identity")]
fn identity_exports() -> Vec<TypeDescriptor> {
    vec![TypeDescriptor::registrar::<IdentityRegistrar>()]
}

/// 只由本文件的静态登记绑定
trait Region: Send + Sync {
    fn name(&self) -> String;
}

declare_contract!(dyn Region);

struct NamedRegion(String);

impl Region for NamedRegion {
    fn name(&self) -> String {
        self.0.clone()
    }
}

/// 依赖身份认证端点的注册器
#[derive(Default)]
struct RegionRegistrar;

impl ServiceRegistrar for RegionRegistrar {
    fn register(
        &self,
        manager: &dyn ServiceRegistrationManager,
        locator: &dyn ServiceLocator,
    ) -> DependencyResult<()> {
        let identity = locator.locate::<dyn IdentityEndpoint>()?;
        let region = if identity.url().contains("example.com") {
            "RegionOne"
        } else {
            "unknown"
        };
        let region: Arc<dyn Region> = Arc::new(NamedRegion(region.to_string()));
        manager.register_instance(region)
    }
}

#[service_module(depends_on = ["identity"])]
fn region_exports() -> Vec<TypeDescriptor> {
    vec![TypeDescriptor::registrar::<RegionRegistrar>()]
}

#[test]
fn test_static_modules_are_submitted_before_main() {
    let catalog = ModuleCatalog::global();

    let identity = catalog.find("identity").unwrap();
    assert_eq!(identity.registrar_types().count(), 1);

    let region = catalog.find(env!("CARGO_PKG_NAME")).unwrap();
    assert_eq!(region.dependencies(), &["identity".to_string()]);
}

#[test]
fn test_locator_follows_process_catalog() {
    let locator = ServiceLocatorImpl::new().unwrap();

    assert!(locator.is_bound::<dyn IdentityEndpoint>());
    assert_eq!(locator.locate::<dyn Region>().unwrap().name(), "RegionOne");
    assert!(locator
        .discovery()
        .watched_modules()
        .iter()
        .any(|module| module.name() == HOSTING_MODULE_NAME));
}

#[test]
fn test_isolated_locator_ignores_process_catalog() {
    let locator = ServiceLocatorImpl::builder()
        .with_config(LocatorConfig::isolated())
        .build()
        .unwrap();

    assert!(locator.locate::<dyn IdentityEndpoint>().is_err());
    assert_eq!(locator.stats().watched_modules, 1);
}

/// 运行时才登记到目录的模块
trait Quota: Send + Sync {
    fn limit(&self) -> u32;
}

declare_contract!(dyn Quota);

struct FixedQuota;

impl Quota for FixedQuota {
    fn limit(&self) -> u32 {
        20
    }
}

#[derive(Default)]
struct QuotaRegistrar;

impl ServiceRegistrar for QuotaRegistrar {
    fn register(
        &self,
        manager: &dyn ServiceRegistrationManager,
        _locator: &dyn ServiceLocator,
    ) -> DependencyResult<()> {
        let quota: Arc<dyn Quota> = Arc::new(FixedQuota);
        manager.register_instance(quota)
    }
}

#[test]
fn test_late_catalog_submission_is_found_on_miss() {
    let locator = ServiceLocatorImpl::new().unwrap();
    assert!(!locator.is_bound::<dyn Quota>());

    ModuleCatalog::global().submit(
        ServiceModule::new("quota").export(TypeDescriptor::registrar::<QuotaRegistrar>()),
    );

    assert_eq!(locator.locate::<dyn Quota>().unwrap().limit(), 20);
}

#[test]
fn test_override_replaces_catalog_binding() {
    let locator = ServiceLocatorImpl::new().unwrap();
    let replacement: Arc<dyn IdentityEndpoint> =
        Arc::new(locator_integration_tests::StaticEndpoint("http://127.0.0.1:5000/v3"));

    locator
        .override_manager()
        .register_instance(Arc::clone(&replacement))
        .unwrap();

    let resolved = locator.locate::<dyn IdentityEndpoint>().unwrap();
    assert!(Arc::ptr_eq(&resolved, &replacement));
    assert!(locator.try_locate::<dyn ObjectStoreEndpoint>().is_none());
}
