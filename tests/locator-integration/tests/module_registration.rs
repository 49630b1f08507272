//! 宿主程序在运行时加载模块的集成测试

use di_abstractions::{LocateExt, ServiceLocator, ServiceModule, TypeDescriptor};
use di_impl::{LocatorConfig, ServiceLocatorImpl};
use locator_integration_tests::{
    IdentityEndpoint, IdentityRegistrar, ObjectStoreEndpoint, ObjectStoreRegistrar,
};
use std::sync::Arc;

fn storage_module() -> Arc<ServiceModule> {
    Arc::new(
        ServiceModule::new("object-store")
            .depends_on("identity")
            .export(TypeDescriptor::registrar::<ObjectStoreRegistrar>()),
    )
}

fn identity_module() -> Arc<ServiceModule> {
    Arc::new(ServiceModule::new("identity").export(TypeDescriptor::registrar::<IdentityRegistrar>()))
}

#[test]
fn test_ensure_module_registration_from_host() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let locator = ServiceLocatorImpl::builder()
        .with_config(LocatorConfig::isolated())
        .build()
        .unwrap();
    assert!(locator.locate::<dyn ObjectStoreEndpoint>().is_err());

    assert_eq!(locator.ensure_module_registration(storage_module()).unwrap(), 1);
    assert_eq!(
        locator.locate::<dyn ObjectStoreEndpoint>().unwrap().url(),
        "https://swift.example.com/v1"
    );
    assert!(locator.locate::<dyn IdentityEndpoint>().is_err());

    assert_eq!(locator.ensure_module_registration(identity_module()).unwrap(), 1);
    assert!(locator.locate::<dyn IdentityEndpoint>().is_ok());

    // 重复加载不会再次调用注册器
    assert_eq!(locator.ensure_module_registration(storage_module()).unwrap(), 0);
    assert_eq!(locator.stats().watched_modules, 3);
}

#[test]
fn test_registrars_are_idempotent_across_full_passes() {
    let locator = ServiceLocatorImpl::builder()
        .with_config(LocatorConfig::isolated())
        .with_module(identity_module())
        .with_module(storage_module())
        .build()
        .unwrap();

    let before = locator.stats();
    assert_eq!(locator.register_all().unwrap(), 2);
    assert_eq!(locator.register_all().unwrap(), 2);

    assert_eq!(locator.stats(), before);
    assert!(locator.can_locate(&sdk_common::CapabilityKey::of::<dyn IdentityEndpoint>()));
}
