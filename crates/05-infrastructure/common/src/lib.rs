//! # SDK Common
//!
//! 这个 crate 提供了 OpenStack SDK 服务定位层的公共类型和错误定义。
//!
//! ## 核心类型
//!
//! - [`CapabilityKey`] - 能力标识
//! - [`Contract`] - 契约标记 trait
//! - [`DependencyError`] - 服务定位错误
//!
//! ## 设计原则
//!
//! - 以显式的能力描述替代运行时反射
//! - 错误以 `Result` 返回，不使用 panic 作为控制流

pub mod contract;
pub mod errors;
pub mod metadata;

pub use contract::*;
pub use errors::*;
pub use metadata::*;
