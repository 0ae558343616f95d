//! 解析上下文
//!
//! 记录当前正在解析的类型链，用于检测循环依赖和限制递归深度。

use infrastructure_common::{DependencyError, DependencyResult};

/// 解析上下文
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// 当前解析链
    resolution_chain: Vec<String>,
    /// 解析选项
    options: ResolveOptions,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new(options: ResolveOptions) -> Self {
        Self {
            resolution_chain: Vec::new(),
            options,
        }
    }

    /// 添加类型到解析链
    ///
    /// 关闭检测时只记录，不做任何检查。
    pub fn push_type(&mut self, type_name: &str) -> DependencyResult<()> {
        if self.options.detect_cycles {
            if self.resolution_chain.iter().any(|name| name == type_name) {
                return Err(DependencyError::CircularDependency {
                    dependency_chain: self.describe_chain(type_name),
                });
            }
            if self.options.max_depth > 0 && self.resolution_chain.len() >= self.options.max_depth
            {
                return Err(DependencyError::DepthExceeded {
                    max_depth: self.options.max_depth,
                    dependency_chain: self.describe_chain(type_name),
                });
            }
        }
        self.resolution_chain.push(type_name.to_string());
        Ok(())
    }

    /// 从解析链中移除类型
    pub fn pop_type(&mut self) {
        self.resolution_chain.pop();
    }

    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }

    pub fn chain(&self) -> &[String] {
        &self.resolution_chain
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    fn describe_chain(&self, next: &str) -> String {
        self.resolution_chain
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(next))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// 解析选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// 是否检测循环依赖
    pub detect_cycles: bool,
    /// 最大递归深度，0 表示不限制
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            detect_cycles: true,
            max_depth: 100,
        }
    }
}
