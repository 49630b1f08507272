//! 能力契约标记
//!
//! 只有声明为契约的 trait object 才能作为能力标识注册到服务定位器

/// 契约标记 trait
///
/// 通过 [`declare_contract!`](crate::declare_contract) 为 `dyn Trait` 实现。
/// 契约 trait 需要以 `Send + Sync` 作为父 trait。
pub trait Contract: Send + Sync + 'static {}

/// 声明一个或多个契约
///
/// ```rust
/// use sdk_common::{declare_contract, CapabilityKey};
///
/// pub trait ObjectStore: Send + Sync {}
/// declare_contract!(dyn ObjectStore);
///
/// assert!(CapabilityKey::of::<dyn ObjectStore>().is_contract());
/// ```
#[macro_export]
macro_rules! declare_contract {
    ($($contract:ty),+ $(,)?) => {
        $(impl $crate::Contract for $contract {})+
    };
}
