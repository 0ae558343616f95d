//! 可注入类型派生宏实现

use crate::utils::{arc_inner_type, registration_fn_ident};
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Error, Expr, Fields, LitStr, Result, Type};

/// 类型级参数 `#[injectable(...)]`
#[derive(Debug, Default)]
struct InjectableArgs {
    /// 自定义注册表标识
    name: Option<String>,
    /// 通过 `Default` 创建，不声明构造函数
    implicit: bool,
}

impl InjectableArgs {
    fn from_attributes(attrs: &[Attribute]) -> Result<Self> {
        let mut args = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("injectable")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    args.name = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("implicit") {
                    args.implicit = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported injectable attribute, expected `name` or `implicit`"))
                }
            })?;
        }
        Ok(args)
    }
}

/// 构造参数的来源
enum FieldKind {
    /// `Arc<T>`，按 `T` 的标识解析
    Class(Type),
    /// 其他类型，只能由默认值满足
    Builtin { ty: Type, default: Option<Expr> },
}

struct InjectedField {
    /// 参数名，元组结构体为字段位置
    name: String,
    kind: FieldKind,
}

impl InjectedField {
    fn from_field(position: usize, field: &syn::Field) -> Result<Self> {
        let name = field
            .ident
            .as_ref()
            .map_or_else(|| position.to_string(), ToString::to_string);
        let default = field_default(&field.attrs)?;

        let kind = match (arc_inner_type(&field.ty), default) {
            (Some(_), Some(default)) => {
                return Err(Error::new_spanned(
                    default,
                    "`Arc` fields are resolved from the container and cannot carry a default",
                ));
            }
            (Some(inner), None) => FieldKind::Class(inner.clone()),
            (None, default) => FieldKind::Builtin {
                ty: field.ty.clone(),
                default,
            },
        };

        Ok(Self { name, kind })
    }

    fn parameter(&self) -> TokenStream {
        let name = &self.name;
        match &self.kind {
            FieldKind::Class(inner) => quote! {
                ::di_abstractions::ParameterDescriptor::of::<#inner>(#name)
            },
            FieldKind::Builtin {
                ty,
                default: Some(default),
            } => quote! {
                ::di_abstractions::ParameterDescriptor::builtin(#name)
                    .with_default::<#ty>(::core::convert::Into::<#ty>::into(#default))
            },
            FieldKind::Builtin { default: None, .. } => quote! {
                ::di_abstractions::ParameterDescriptor::builtin(#name)
            },
        }
    }

    fn argument(&self, position: usize) -> TokenStream {
        let index = Literal::usize_unsuffixed(position);
        match &self.kind {
            FieldKind::Class(inner) => quote! { __arguments.instance::<#inner>(#index)? },
            FieldKind::Builtin { ty, .. } => quote! { __arguments.value::<#ty>(#index)? },
        }
    }
}

/// 读取字段上的 `#[inject(default = expr)]`
fn field_default(attrs: &[Attribute]) -> Result<Option<Expr>> {
    let mut default = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                default = Some(meta.value()?.parse::<Expr>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported inject attribute, expected `default`"))
            }
        })?;
    }
    Ok(default)
}

/// 实现 #[derive(Injectable)] 宏
pub fn derive_injectable_impl(input: DeriveInput) -> Result<TokenStream> {
    let type_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Injectable cannot be derived for generic types, register a descriptor by hand",
        ));
    }

    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            type_name,
            "Injectable can only be derived for structs",
        ));
    };

    let args = InjectableArgs::from_attributes(&input.attrs)?;
    let identifier = match &args.name {
        Some(name) => quote! { #name },
        None => {
            let short_name = type_name.to_string();
            quote! { ::core::concat!(::core::module_path!(), "::", #short_name) }
        }
    };

    let descriptor = if args.implicit {
        quote! {
            ::di_abstractions::TypeDescriptor::implicit_default::<Self>(
                <Self as ::di_abstractions::Identify>::identifier(),
            )
        }
    } else {
        declared_descriptor(&data.fields)?
    };

    let registration_fn = registration_fn_ident(type_name);

    Ok(quote! {
        impl ::di_abstractions::Identify for #type_name {
            fn identifier() -> &'static str {
                #identifier
            }
        }

        impl ::di_abstractions::Injectable for #type_name {
            fn descriptor() -> ::di_abstractions::TypeDescriptor {
                #descriptor
            }
        }

        // 使用 ctor 在程序启动时自动注册类型描述符
        #[doc(hidden)]
        #[::ctor::ctor]
        fn #registration_fn() {
            ::di_abstractions::DefaultTypeCatalog::global().register_type::<#type_name>();
        }
    })
}

/// 按字段顺序生成声明的构造函数
fn declared_descriptor(fields: &Fields) -> Result<TokenStream> {
    let injected = fields
        .iter()
        .enumerate()
        .map(|(position, field)| InjectedField::from_field(position, field))
        .collect::<Result<Vec<_>>>()?;

    let parameters = injected.iter().map(InjectedField::parameter);
    let arguments = injected
        .iter()
        .enumerate()
        .map(|(position, field)| field.argument(position));

    let construct = match fields {
        Fields::Named(named) => {
            let idents = named.named.iter().map(|field| &field.ident);
            quote! { Self { #(#idents: #arguments),* } }
        }
        Fields::Unnamed(_) => quote! { Self(#(#arguments),*) },
        Fields::Unit => quote! { Self },
    };

    Ok(quote! {
        ::di_abstractions::TypeDescriptor::declared(
            <Self as ::di_abstractions::Identify>::identifier(),
            ::std::vec![#(#parameters),*],
            |__arguments: ::di_abstractions::Arguments| ::core::result::Result::Ok(#construct),
        )
    })
}
