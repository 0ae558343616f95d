//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义类型反射契约、注册表条目和容器接口。
//!
//! ## 核心接口
//!
//! - [`TypeDescriptor`] - 类型描述符（构造函数、参数、调用能力）
//! - [`TypeCatalog`] - 类型目录接口
//! - [`Entry`] - 注册表条目
//! - [`DiContainer`] - 容器接口
//! - [`ResolveContext`] - 解析上下文

pub mod arguments;
pub mod catalog;
pub mod container;
pub mod factory;
pub mod reflect;
pub mod resolver;

pub use arguments::*;
pub use catalog::*;
pub use container::*;
pub use factory::*;
pub use reflect::*;
pub use resolver::*;
