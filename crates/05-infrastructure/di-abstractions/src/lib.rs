//! # Service Location Abstractions
//!
//! 服务定位抽象层，定义能力注册、注册器发现和服务解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`ServiceLocator`] - 服务定位器接口
//! - [`ServiceRegistrar`] - 注册器接口
//! - [`ServiceRegistrationManager`] - 注册管理器接口
//! - [`RegistrarDiscovery`] - 注册器发现接口
//! - [`RegistrarFactory`] - 注册器工厂接口
//!
//! ## 模块
//!
//! 模块通过 [`ServiceModule`] 显式声明导出的类型，并提交到 [`ModuleCatalog`]，
//! 以替代运行时的类型扫描。

pub mod factory;
pub mod instance;
pub mod locator;
pub mod manager;
pub mod module;
pub mod registrar;
pub mod scanner;

pub use factory::*;
pub use instance::*;
pub use locator::*;
pub use manager::*;
pub use module::*;
pub use registrar::*;
pub use scanner::*;

use sdk_common::declare_contract;

declare_contract!(
    dyn ServiceRegistrar,
    dyn ServiceRegistrationManager,
    dyn RuntimeRegistrationManager,
    dyn OverrideRegistrationManager,
    dyn ServiceLocator,
);
