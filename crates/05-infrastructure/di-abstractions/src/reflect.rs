//! 类型反射契约
//!
//! Rust 没有运行时反射，容器通过 [`TypeDescriptor`] 了解一个类型：
//! 是否可实例化、构造函数声明了哪些参数、参数的默认值，以及实例是否可被调用。
//! 描述符既可以手写，也可以由 `#[derive(Injectable)]` 生成。

use crate::arguments::{Arguments, Instance};
use infrastructure_common::{DependencyError, DependencyResult};
use std::any::Any;
use std::sync::Arc;

/// 容器自身的标识
///
/// 声明为此类型的参数会被注入容器本身，解析此标识同样得到容器本身。
pub const CONTAINER_ID: &str = "di_abstractions::DiContainer";

/// 拥有注册表标识的类型
pub trait Identify: Any + Send + Sync {
    /// 类型在注册表和类型目录中的名称
    fn identifier() -> &'static str;
}

/// 可由容器自动装配的类型
pub trait Injectable: Identify {
    /// 生成类型描述符
    fn descriptor() -> TypeDescriptor;
}

/// 参数的声明类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
    /// 内建类型（字符串、数字等），只能通过默认值满足
    Builtin,
    /// 类或接口类型，按名称递归解析
    Class(String),
}

/// 构造参数描述符
#[derive(Clone)]
pub struct ParameterDescriptor {
    name: String,
    kind: ParameterKind,
    default: Option<Instance>,
}

impl ParameterDescriptor {
    /// 内建类型参数
    pub fn builtin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Builtin,
            default: None,
        }
    }

    /// 类类型参数
    pub fn class(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Class(type_name.into()),
            default: None,
        }
    }

    /// 以 `T` 的标识作为声明类型的参数
    pub fn of<T: Identify>(name: impl Into<String>) -> Self {
        Self::class(name, T::identifier())
    }

    /// 接收容器自身的参数
    pub fn container(name: impl Into<String>) -> Self {
        Self::class(name, CONTAINER_ID)
    }

    /// 设置默认值
    pub fn with_default<T>(self, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.with_default_instance(Arc::new(value))
    }

    /// 以已擦除类型的实例设置默认值
    pub fn with_default_instance(mut self, value: Instance) -> Self {
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ParameterKind {
        &self.kind
    }

    pub fn default_value(&self) -> Option<&Instance> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

impl std::fmt::Debug for ParameterDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

/// 无参创建函数
pub type CreateFn = Arc<dyn Fn() -> Instance + Send + Sync>;

/// 带参构造函数
pub type BuildFn = Arc<dyn Fn(Arguments) -> DependencyResult<Instance> + Send + Sync>;

/// 实例调用函数，返回 `Some` 时替换原实例
pub type InvokeFn =
    Arc<dyn Fn(&Instance, Arguments) -> DependencyResult<Option<Instance>> + Send + Sync>;

/// 构造方式
#[derive(Clone)]
pub enum Constructor {
    /// 类型未声明构造函数，以无参方式创建，结果不缓存
    Implicit(CreateFn),
    /// 声明了构造函数，结果缓存到注册表
    Declared {
        parameters: Vec<ParameterDescriptor>,
        build: BuildFn,
    },
}

/// 实例调用能力
#[derive(Clone)]
pub struct Invoker {
    parameters: Vec<ParameterDescriptor>,
    call: InvokeFn,
}

impl Invoker {
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// 以解析好的参数调用实例
    pub fn invoke(
        &self,
        target: &Instance,
        arguments: Arguments,
    ) -> DependencyResult<Option<Instance>> {
        (self.call)(target, arguments)
    }
}

/// 类型种类
#[derive(Clone)]
pub enum TypeKind {
    /// 抽象类型或接口，不可实例化
    Abstract,
    /// 具体类型
    Concrete(Constructor),
}

/// 类型描述符
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    invoker: Option<Invoker>,
}

impl TypeDescriptor {
    /// 描述抽象类型或接口
    pub fn abstract_type(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Abstract,
            invoker: None,
        }
    }

    /// 描述未声明构造函数的类型
    pub fn implicit<T, F>(name: impl Into<String>, create: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: TypeKind::Concrete(Constructor::Implicit(Arc::new(move || {
                Arc::new(create()) as Instance
            }))),
            invoker: None,
        }
    }

    /// 描述通过 `Default` 创建、未声明构造函数的类型
    pub fn implicit_default<T>(name: impl Into<String>) -> Self
    where
        T: Any + Send + Sync + Default,
    {
        Self::implicit(name, T::default)
    }

    /// 描述声明了构造函数的类型
    pub fn declared<T, F>(
        name: impl Into<String>,
        parameters: Vec<ParameterDescriptor>,
        build: F,
    ) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Arguments) -> DependencyResult<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: TypeKind::Concrete(Constructor::Declared {
                parameters,
                build: Arc::new(move |arguments| {
                    build(arguments).map(|value| Arc::new(value) as Instance)
                }),
            }),
            invoker: None,
        }
    }

    /// 为实例附加调用能力
    ///
    /// 只有未声明构造函数的类型才会在解析时被调用。
    pub fn with_invoker<T, F>(mut self, parameters: Vec<ParameterDescriptor>, call: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&T, Arguments) -> DependencyResult<Option<Instance>> + Send + Sync + 'static,
    {
        let name = self.name.clone();
        self.invoker = Some(Invoker {
            parameters,
            call: Arc::new(move |target, arguments| {
                let target = target.downcast_ref::<T>().ok_or_else(|| {
                    DependencyError::TypeMismatch {
                        id: name.clone(),
                        expected: std::any::type_name::<T>(),
                    }
                })?;
                call(target, arguments)
            }),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn is_instantiable(&self) -> bool {
        matches!(self.kind, TypeKind::Concrete(_))
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        match &self.kind {
            TypeKind::Concrete(constructor) => Some(constructor),
            TypeKind::Abstract => None,
        }
    }

    pub fn invoker(&self) -> Option<&Invoker> {
        self.invoker.as_ref()
    }

    /// 构造函数声明的参数，未声明构造函数时为空
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        match self.constructor() {
            Some(Constructor::Declared { parameters, .. }) => parameters,
            _ => &[],
        }
    }
}

impl std::fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.kind {
            TypeKind::Abstract => "abstract",
            TypeKind::Concrete(Constructor::Implicit(_)) => "implicit",
            TypeKind::Concrete(Constructor::Declared { .. }) => "declared",
        };
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &kind)
            .field("parameters", &self.parameters())
            .field("invokable", &self.invoker.is_some())
            .finish()
    }
}
