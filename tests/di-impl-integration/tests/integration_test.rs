//! 依赖注入容器端到端测试：派生宏注册的类型经全局目录自动装配

use component_macros::Injectable;
use di_abstractions::{
    instance, DiContainer, DiContainerExt, Identify, Injectable, Instance, ParameterDescriptor,
    TypeDescriptor,
};
use di_impl::{Container, DiContainerBuilder};
use infrastructure_common::DependencyError;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("di_impl=trace,di_abstractions=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[derive(Injectable)]
pub struct FakeRepository {
    #[inject(default = "Hello World")]
    message: String,
}

impl FakeRepository {
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Injectable)]
pub struct FakeManager {
    repository: Arc<FakeRepository>,
}

impl FakeManager {
    pub fn message(&self) -> &str {
        self.repository.message()
    }
}

#[derive(Injectable)]
pub struct FakeController {
    manager: Arc<FakeManager>,
}

impl FakeController {
    pub fn index(&self) -> &str {
        self.manager.message()
    }
}

#[derive(Injectable)]
pub struct FakeComplexConstructor {
    manager: Arc<FakeManager>,
    name: String,
}

#[derive(Injectable)]
pub struct FakeRequest {
    #[inject(default = "GET")]
    method: String,
}

/// 可调用工厂：调用结果是一个新的控制器
#[derive(Default)]
pub struct FakeFactory;

impl Identify for FakeFactory {
    fn identifier() -> &'static str {
        "fake::FakeFactory"
    }
}

impl Injectable for FakeFactory {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::implicit_default::<Self>(Self::identifier()).with_invoker(
            vec![
                ParameterDescriptor::builtin("name").with_default("factory".to_string()),
                ParameterDescriptor::container("container"),
            ],
            |_factory: &Self, args| {
                let container = args.instance::<Container>(1)?;
                let manager = container.make::<FakeManager>()?;
                Ok(Some(instance(FakeController { manager })))
            },
        )
    }
}

const FAKE_INTERFACE: &str = "fake::FakeInterface";

fn container() -> Container {
    init_test_logger();
    DiContainerBuilder::new()
        .register_descriptor(TypeDescriptor::abstract_type(FAKE_INTERFACE))
        .register_type::<FakeFactory>()
        .build()
}

#[test]
fn test_dependency_injection() {
    let container = container();

    let controller = container.make::<FakeController>().unwrap();
    assert_eq!(controller.index(), "Hello World");

    let manager = container.make::<FakeManager>().unwrap();
    let repository = container.make::<FakeRepository>().unwrap();
    assert!(Arc::ptr_eq(&controller.manager, &manager));
    assert!(Arc::ptr_eq(&manager.repository, &repository));
}

#[test]
fn test_complex_constructor() {
    let container = container();

    let manager: Instance = container.make::<FakeManager>().unwrap();
    let test = container
        .make_with::<FakeComplexConstructor>(vec![manager, instance("coucou".to_string())])
        .unwrap();

    assert_eq!(test.name, "coucou");
    assert_eq!(test.manager.message(), "Hello World");
}

#[test]
fn test_bulk() {
    let container = container();
    container.flush();

    let manager: Instance = container.make::<FakeManager>().unwrap();
    container
        .bulk([
            (FakeController::identifier(), Vec::new()),
            (
                FakeComplexConstructor::identifier(),
                vec![manager, instance("coucou".to_string())],
            ),
        ])
        .unwrap();

    let controller = container.make::<FakeController>().unwrap();
    assert_eq!(controller.index(), "Hello World");

    let test = container.make::<FakeComplexConstructor>().unwrap();
    assert_eq!(test.name, "coucou");
    assert!(Arc::ptr_eq(&test.manager, &controller.manager));
}

#[test]
fn test_not_found_exception() {
    let container = container();
    container.flush();

    let error = container.get(FakeComplexConstructor::identifier()).unwrap_err();
    assert!(matches!(&error, DependencyError::NotFound { parameter } if parameter == "name"));
    assert!(!error.is_container_error());
}

#[test]
fn test_container_exception() {
    let container = container();
    container.flush();

    let error = container.get(FAKE_INTERFACE).unwrap_err();
    assert!(matches!(error, DependencyError::NotInstantiable { .. }));
    assert!(error.is_container_error());
}

#[test]
fn test_default_request_method() {
    let container = container();
    let request = container.make::<FakeRequest>().unwrap();
    assert_eq!(request.method, "GET");
}

#[test]
fn test_invokable_factory() {
    let container = container();

    let controller = container
        .get_as::<FakeController>(FakeFactory::identifier())
        .unwrap();
    assert_eq!(controller.index(), "Hello World");
    assert!(container.has(FakeFactory::identifier()));
}

#[test]
fn test_factory_entry_and_alias() {
    let container = container();
    container
        .alias("repository", FakeRepository::identifier())
        .register(
            "greeting",
            di_abstractions::Entry::factory(|container, args| {
                let repository = container.get_as::<FakeRepository>("repository")?;
                let name = args.value::<String>(0)?;
                Ok(instance(format!("{}, {}", repository.message(), name)))
            }),
        );

    let greeting = container
        .get_with("greeting", vec![instance("Rust".to_string())])
        .unwrap()
        .downcast::<String>()
        .unwrap();
    assert_eq!(*greeting, "Hello World, Rust");

    let via_alias = container.get_as::<FakeRepository>("repository").unwrap();
    let direct = container.make::<FakeRepository>().unwrap();
    assert!(Arc::ptr_eq(&via_alias, &direct));

    assert!(matches!(
        container.get("greeting"),
        Err(DependencyError::MissingArgument { index: 0 })
    ));
}

#[test]
fn test_separate_containers_do_not_share_instances() {
    let first = container();
    let second = Container::new();

    let a = first.make::<FakeRepository>().unwrap();
    let b = second.make::<FakeRepository>().unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(!second.has(FakeFactory::identifier()));
}
