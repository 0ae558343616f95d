//! # 依赖注入具体实现
//!
//! 提供基于类型描述符自动装配的依赖注入容器与容器构建器

mod builder;
mod container;

pub use builder::DiContainerBuilder;
pub use container::Container;
