//! # Component Macros
//!
//! 这个 crate 提供了用于生成类型描述符并自动注册到全局类型目录的过程宏。
//!
//! ## 核心宏
//!
//! - [`Injectable`] - 可注入类型派生宏
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::Injectable;
//! use std::sync::Arc;
//!
//! #[derive(Injectable)]
//! pub struct Repository;
//!
//! #[derive(Injectable)]
//! pub struct Request {
//!     repository: Arc<Repository>,
//!     #[inject(default = "GET")]
//!     method: String,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

/// 可注入类型派生宏
///
/// 为结构体实现 `di_abstractions::Identify` 与 `di_abstractions::Injectable`，
/// 并在程序启动时把类型描述符注册到全局类型目录。使用方需要依赖
/// `di-abstractions` 与 `ctor`。
///
/// # 字段
///
/// - `Arc<T>` 字段声明为类类型参数，按 `T` 的标识解析
/// - 其他字段声明为内建类型参数，只能通过 `#[inject(default = expr)]` 满足，
///   `expr` 经 `Into` 转换为字段类型
///
/// # 类型属性
///
/// - `name = "custom::Name"` - 自定义注册表标识（默认为 `module_path!()::类型名`）
/// - `implicit` - 不声明构造函数，通过 `Default` 创建，结果不缓存
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Default, Injectable)]
/// #[injectable(name = "app::Clock", implicit)]
/// pub struct Clock;
/// ```
#[proc_macro_derive(Injectable, attributes(injectable, inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
