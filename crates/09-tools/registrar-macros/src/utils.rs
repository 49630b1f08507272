//! 宏工具函数

use proc_macro2::Span;
use syn::{Error, Expr, Ident, ItemFn, Lit, Result, ReturnType};

/// 从表达式中提取字符串字面量
pub fn expect_str_lit(expr: &Expr) -> Result<String> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Ok(lit_str.value()),
            other => Err(Error::new_spanned(other, "期望字符串字面量")),
        },
        other => Err(Error::new_spanned(other, "期望字符串字面量")),
    }
}

/// 从数组表达式中提取字符串字面量列表
pub fn expect_str_array(expr: &Expr) -> Result<Vec<String>> {
    match expr {
        Expr::Array(array) => array.elems.iter().map(expect_str_lit).collect(),
        other => Err(Error::new_spanned(other, "期望字符串数组，例如 [\"identity\"]")),
    }
}

/// 检查被标注的函数签名
pub fn validate_exports_fn(item: &ItemFn) -> Result<()> {
    let sig = &item.sig;

    if !sig.inputs.is_empty() {
        return Err(Error::new_spanned(&sig.inputs, "服务模块导出函数不能带参数"));
    }

    if !sig.generics.params.is_empty() {
        return Err(Error::new_spanned(&sig.generics, "服务模块导出函数不能是泛型函数"));
    }

    if let Some(asyncness) = &sig.asyncness {
        return Err(Error::new_spanned(asyncness, "服务模块导出函数不能是异步函数"));
    }

    if let ReturnType::Default = sig.output {
        return Err(Error::new_spanned(
            &sig.ident,
            "服务模块导出函数必须返回 Vec<TypeDescriptor>",
        ));
    }

    Ok(())
}

/// 生成静态初始化函数名称
pub fn registration_fn_ident(exports_fn: &Ident) -> Ident {
    Ident::new(
        &format!(
            "__submit_service_module_{}",
            exports_fn.to_string().to_lowercase()
        ),
        Span::call_site(),
    )
}
