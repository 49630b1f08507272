//! # 服务定位具体实现
//!
//! 提供服务定位器、注册管理器、模块扫描器和注册器工厂的具体实现。
//!
//! ```rust
//! use di_abstractions::{LocateExt, RegistrationManagerExt};
//! use di_impl::{LocatorConfig, ServiceLocatorImpl};
//! use sdk_common::declare_contract;
//! use std::sync::Arc;
//!
//! pub trait Flavor: Send + Sync {
//!     fn vcpus(&self) -> u32;
//! }
//! declare_contract!(dyn Flavor);
//!
//! struct Small;
//! impl Flavor for Small {
//!     fn vcpus(&self) -> u32 {
//!         1
//!     }
//! }
//!
//! let locator = ServiceLocatorImpl::builder()
//!     .with_config(LocatorConfig::isolated())
//!     .build()
//!     .unwrap();
//!
//! let flavor: Arc<dyn Flavor> = Arc::new(Small);
//! locator.runtime_manager().register_instance(flavor).unwrap();
//! assert_eq!(locator.locate::<dyn Flavor>().unwrap().vcpus(), 1);
//! ```

pub mod bindings;
pub mod config;
pub mod factory;
pub mod locator;
pub mod managers;
pub mod ordering;
pub mod scanner;
mod validation;

pub use bindings::*;
pub use self::config::*;
pub use factory::*;
pub use locator::*;
pub use managers::*;
pub use ordering::*;
pub use scanner::*;

use di_abstractions::{
    OverrideRegistrationManager, RuntimeRegistrationManager, ServiceLocator, ServiceModule,
    ServiceRegistrationManager, TypeDescriptor,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// 定位器所在模块的名称
pub const HOSTING_MODULE_NAME: &str = "openstack-sdk-di-impl";

static HOSTING_MODULE: Lazy<Arc<ServiceModule>> = Lazy::new(|| {
    Arc::new(
        ServiceModule::new(HOSTING_MODULE_NAME)
            .depends_on("openstack-sdk-di-abstractions")
            .export(TypeDescriptor::concrete::<ServiceLocatorImpl>().implements::<dyn ServiceLocator>())
            .export(
                TypeDescriptor::concrete::<RuntimeRegistrationManagerImpl>()
                    .implements::<dyn ServiceRegistrationManager>()
                    .implements::<dyn RuntimeRegistrationManager>(),
            )
            .export(
                TypeDescriptor::concrete::<OverrideRegistrationManagerImpl>()
                    .implements::<dyn ServiceRegistrationManager>()
                    .implements::<dyn OverrideRegistrationManager>(),
            ),
    )
});

/// 定位器所在的模块，每个定位器创建时都会观察它
pub fn hosting_module() -> Arc<ServiceModule> {
    Arc::clone(&HOSTING_MODULE)
}
