//! 可注入类型派生宏集成测试

use component_macros::Injectable;
use di_abstractions::{
    instance, Constructor, DefaultTypeCatalog, DiContainerExt, Identify, Injectable as _,
    ParameterKind, TypeCatalog,
};
use di_impl::Container;
use std::sync::Arc;

/// 测试仓储
#[derive(Debug, Injectable)]
pub struct Repository;

/// 依赖仓储的服务
#[derive(Injectable)]
pub struct Service {
    repository: Arc<Repository>,
}

/// 带自定义标识和默认值的请求
#[derive(Injectable)]
#[injectable(name = "app::Request")]
pub struct Request {
    #[inject(default = "GET")]
    method: String,
    #[inject(default = 3_u8)]
    retries: u8,
}

/// 通过 Default 创建的时钟
#[derive(Default, Injectable)]
#[injectable(implicit)]
pub struct Clock {
    ticks: u64,
}

/// 元组结构体
#[derive(Injectable)]
pub struct Pair(Arc<Repository>, #[inject(default = 7_i32)] i32);

/// 没有默认值的内建字段
#[derive(Injectable)]
pub struct Greeting {
    text: String,
}

#[test]
fn test_identifier_defaults_to_module_path() {
    assert_eq!(Repository::identifier(), concat!(module_path!(), "::Repository"));
    assert_eq!(Request::identifier(), "app::Request");
}

#[test]
fn test_descriptor_parameters() {
    let descriptor = Service::descriptor();
    assert_eq!(descriptor.name(), Service::identifier());

    let parameters = descriptor.parameters();
    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters[0].name(), "repository");
    assert_eq!(
        parameters[0].kind(),
        &ParameterKind::Class(Repository::identifier().to_string())
    );

    let descriptor = Request::descriptor();
    let parameters = descriptor.parameters();
    assert_eq!(parameters[0].kind(), &ParameterKind::Builtin);
    assert!(parameters.iter().all(|parameter| parameter.has_default()));

    let descriptor = Clock::descriptor();
    assert!(matches!(descriptor.constructor(), Some(Constructor::Implicit(_))));
}

#[test]
fn test_types_are_registered_at_startup() {
    let catalog = DefaultTypeCatalog::global();
    for name in [
        Repository::identifier(),
        Service::identifier(),
        Request::identifier(),
        Clock::identifier(),
        Pair::identifier(),
    ] {
        assert!(catalog.contains(name), "{} should be registered", name);
    }
}

#[test]
fn test_derived_types_resolve() {
    let container = Container::new();

    let service = container.make::<Service>().unwrap();
    let repository = container.make::<Repository>().unwrap();
    assert!(Arc::ptr_eq(&service.repository, &repository));

    let request = container.make::<Request>().unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.retries, 3);

    let pair = container.make::<Pair>().unwrap();
    assert!(Arc::ptr_eq(&pair.0, &repository));
    assert_eq!(pair.1, 7);
}

#[test]
fn test_implicit_types_are_not_cached() {
    let container = Container::new();

    let first = container.make::<Clock>().unwrap();
    let second = container.make::<Clock>().unwrap();
    assert_eq!(first.ticks, 0);
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_builtin_without_default_needs_explicit_parameters() {
    let container = Container::new();

    let error = container.make::<Greeting>().err().unwrap();
    assert!(error.is_not_found());

    let greeting = container
        .make_with::<Greeting>(vec![instance("hello".to_string())])
        .unwrap();
    assert_eq!(greeting.text, "hello");
}
