//! 服务模块登记宏实现

use crate::utils::{expect_str_array, expect_str_lit, registration_fn_ident, validate_exports_fn};
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Error, ItemFn,
    Meta, Result, Token,
};

/// 服务模块参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceModuleArgs {
    /// 模块名称
    pub name: Option<String>,
    /// 依赖的模块
    pub depends_on: Vec<String>,
}

impl Parse for ServiceModuleArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ServiceModuleArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    let name = expect_str_lit(&nv.value)?;
                    if name.trim().is_empty() {
                        return Err(Error::new_spanned(&nv.value, "模块名称不能为空"));
                    }
                    args.name = Some(name);
                }
                Meta::NameValue(nv) if nv.path.is_ident("depends_on") => {
                    args.depends_on = expect_str_array(&nv.value)?;
                }
                other => {
                    return Err(Error::new_spanned(
                        other,
                        "未知参数，支持: name = \"...\", depends_on = [...]",
                    ));
                }
            }
        }

        Ok(args)
    }
}

/// 实现 #[service_module] 宏
pub fn service_module_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let module_args = if args.is_empty() {
        ServiceModuleArgs::default()
    } else {
        match syn::parse::<ServiceModuleArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let exports_fn = parse_macro_input!(input as ItemFn);
    if let Err(e) = validate_exports_fn(&exports_fn) {
        return e.to_compile_error().into();
    }

    let registration_code = generate_registration_code(&exports_fn, &module_args);

    let expanded = quote! {
        #exports_fn

        #registration_code
    };

    TokenStream::from(expanded)
}

/// 生成模块登记代码
fn generate_registration_code(
    exports_fn: &ItemFn,
    args: &ServiceModuleArgs,
) -> proc_macro2::TokenStream {
    let exports_ident = &exports_fn.sig.ident;
    let registration_fn_name = registration_fn_ident(exports_ident);

    let module_name = match &args.name {
        Some(name) => quote! { #name },
        None => quote! { env!("CARGO_PKG_NAME") },
    };
    let dependencies = &args.depends_on;

    quote! {
        // 使用 ctor 在程序启动时登记模块
        #[::ctor::ctor]
        fn #registration_fn_name() {
            let module = ::di_abstractions::ServiceModule::new(#module_name)
                #(.depends_on(#dependencies))*
                .with_exports(#exports_ident());

            ::di_abstractions::ModuleCatalog::global().submit(module);
        }
    }
}
