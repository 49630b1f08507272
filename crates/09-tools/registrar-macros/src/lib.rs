//! # Registrar Macros
//!
//! 这个 crate 提供了在程序启动时把服务模块登记到进程级模块目录的过程宏。
//!
//! ## 核心宏
//!
//! - [`service_module`] - 服务模块登记宏
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use di_abstractions::TypeDescriptor;
//! use registrar_macros::service_module;
//!
//! #[service_module(name = "compute", depends_on = ["identity"])]
//! fn compute_exports() -> Vec<TypeDescriptor> {
//!     vec![TypeDescriptor::registrar::<ComputeRegistrar>()]
//! }
//! ```
//!
//! 使用该宏的 crate 需要依赖 `ctor` 与 `openstack-sdk-di-abstractions`。

use proc_macro::TokenStream;

mod module;
mod utils;

/// 服务模块登记宏
///
/// 标注在返回 `Vec<TypeDescriptor>` 的无参函数上。程序启动时，
/// 生成的静态初始化函数会以该函数的返回值作为导出类型，
/// 把模块提交到 `ModuleCatalog::global()`。
///
/// # 参数
///
/// - `name = "module_name"` - 模块名称（默认为当前包名）
/// - `depends_on = ["a", "b"]` - 依赖的模块名称
///
/// # 示例
///
/// ```rust,ignore
/// #[service_module(name = "image", depends_on = ["identity", "object-store"])]
/// fn image_exports() -> Vec<TypeDescriptor> {
///     vec![TypeDescriptor::registrar::<ImageRegistrar>()]
/// }
/// ```
#[proc_macro_attribute]
pub fn service_module(args: TokenStream, input: TokenStream) -> TokenStream {
    module::service_module_impl(args, input)
}
