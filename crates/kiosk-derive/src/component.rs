use crate::expand;
use darling::{Error as DarlingError, FromMeta, ast::NestedMeta};
use kiosk_schema::types::{BindingPrim, RenderKind};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Fields, Ident, ItemStruct, Path};

///
/// ComponentArgs
/// Class-level metadata taken from the attribute list.
///

#[derive(Debug, FromMeta)]
pub struct ComponentArgs {
    pub route: String,

    pub render: RenderKind,

    #[darling(default)]
    pub page: Option<PageArgs>,

    #[darling(default)]
    pub nav: Option<String>,

    #[darling(default)]
    pub remove_nav: bool,

    #[darling(default)]
    pub construct: ConstructMode,

    #[darling(multiple, rename = "parent")]
    pub parents: Vec<Path>,

    #[darling(multiple, rename = "child")]
    pub children: Vec<Path>,
}

///
/// PageArgs
///

#[derive(Debug, FromMeta)]
pub struct PageArgs {
    pub title: String,

    #[darling(default)]
    pub description: Option<String>,

    #[darling(default = "default_indexable")]
    pub indexable: bool,
}

const fn default_indexable() -> bool {
    true
}

///
/// ConstructMode
/// `auto` emits a Default-backed Construct impl; `manual` leaves the impl
/// to the author so construction can pull seeded state from the context.
///

#[derive(Clone, Copy, Debug, Default, Eq, FromMeta, PartialEq)]
pub enum ConstructMode {
    #[default]
    Auto,
    Manual,
}

///
/// BindArgs
/// Raw `#[bind(...)]` attribute contents for one field.
///

#[derive(Debug, FromMeta)]
struct BindArgs {
    #[darling(default)]
    key: Option<String>,

    prim: BindingPrim,

    #[darling(default)]
    many: bool,

    #[darling(default)]
    required: bool,
}

///
/// FieldWrapper
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldWrapper {
    List,
    Optional,
    Plain,
}

///
/// Binding
/// One resolved binding: the declared field plus its input contract.
///

#[derive(Debug)]
pub struct Binding {
    pub field: Ident,
    pub key: String,
    pub prim: BindingPrim,
    pub many: bool,
    pub required: bool,
    pub wrapper: FieldWrapper,
}

///
/// ComponentModel
/// Fully parsed and validated input for code emission.
///

pub struct ComponentModel {
    pub item: ItemStruct,
    pub args: ComponentArgs,
    pub bindings: Vec<Binding>,
}

pub fn expand(args: TokenStream, input: TokenStream) -> TokenStream {
    let item = match syn::parse2::<ItemStruct>(input) {
        Ok(item) => item,
        Err(err) => return err.to_compile_error(),
    };

    let attr_args = match NestedMeta::parse_meta_list(args) {
        Ok(args) => args,
        Err(err) => {
            let err = DarlingError::from(err).write_errors();
            return quote!(#item #err);
        }
    };

    match parse_model(&attr_args, item.clone()) {
        Ok(model) => expand::emit(&model),
        Err(err) => {
            // Re-emit the struct so downstream code still sees the type.
            let item = strip_bind_attrs(item);
            let err = err.write_errors();
            quote!(#item #err)
        }
    }
}

fn parse_model(attr_args: &[NestedMeta], item: ItemStruct) -> Result<ComponentModel, DarlingError> {
    let args = ComponentArgs::from_list(attr_args)?;

    let mut acc = DarlingError::accumulator();
    check_item_shape(&item, &mut acc);
    check_class_metadata(&args, &mut acc);
    let bindings = collect_bindings(&item, &mut acc);
    acc.finish()?;

    Ok(ComponentModel {
        item: strip_bind_attrs(item),
        args,
        bindings,
    })
}

fn check_item_shape(item: &ItemStruct, acc: &mut darling::error::Accumulator) {
    if !item.generics.params.is_empty() {
        acc.push(
            DarlingError::custom("component classes cannot be generic")
                .with_span(&item.generics),
        );
    }
    if matches!(item.fields, Fields::Unnamed(_)) {
        acc.push(
            DarlingError::custom("component classes must use named fields")
                .with_span(&item.fields),
        );
    }
}

fn check_class_metadata(args: &ComponentArgs, acc: &mut darling::error::Accumulator) {
    if args.route.is_empty() {
        acc.push(DarlingError::custom("route key cannot be empty"));
    }

    if args.render == RenderKind::Page {
        if args.page.is_none() {
            acc.push(DarlingError::custom(
                "page components must declare page(title = \"...\") metadata",
            ));
        }
        if args.nav.is_some() && args.remove_nav {
            acc.push(DarlingError::custom(
                "remove_nav conflicts with a declared navigation key",
            ));
        }
    } else {
        if args.page.is_some() {
            acc.push(DarlingError::custom(
                "page metadata is only valid on page components",
            ));
        }
        if args.nav.is_some() {
            acc.push(DarlingError::custom(
                "navigation placement is only valid on page components",
            ));
        }
        if args.remove_nav {
            acc.push(DarlingError::custom(
                "remove_nav is only valid on page components",
            ));
        }
    }
}

fn collect_bindings(item: &ItemStruct, acc: &mut darling::error::Accumulator) -> Vec<Binding> {
    let mut bindings = Vec::new();
    let mut seen_keys = Vec::new();

    for field in &item.fields {
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        for attr in &field.attrs {
            if !attr.path().is_ident("bind") {
                continue;
            }
            let Some(args) = acc.handle(BindArgs::from_meta(&attr.meta)) else {
                continue;
            };

            let wrapper = field_wrapper(&field.ty);
            let key = args.key.unwrap_or_else(|| ident.to_string());

            if args.many && wrapper != FieldWrapper::List {
                acc.push(
                    DarlingError::custom(format!(
                        "binding '{key}' is declared `many` but field '{ident}' is not a Vec"
                    ))
                    .with_span(&field.ty),
                );
            }
            if !args.many && wrapper == FieldWrapper::List {
                acc.push(
                    DarlingError::custom(format!(
                        "field '{ident}' is a Vec; declare the binding as `many`"
                    ))
                    .with_span(&field.ty),
                );
            }
            if args.required && wrapper == FieldWrapper::Optional {
                acc.push(
                    DarlingError::custom(format!(
                        "binding '{key}' is `required`; field '{ident}' must not be an Option"
                    ))
                    .with_span(&field.ty),
                );
            }
            if seen_keys.contains(&key) {
                acc.push(
                    DarlingError::custom(format!("input key '{key}' is bound more than once"))
                        .with_span(&ident),
                );
            }
            seen_keys.push(key.clone());

            bindings.push(Binding {
                field: ident.clone(),
                key,
                prim: args.prim,
                many: args.many,
                required: args.required,
                wrapper,
            });
        }
    }

    bindings
}

/// Detect the outer wrapper of a bound field's type.
fn field_wrapper(ty: &syn::Type) -> FieldWrapper {
    let syn::Type::Path(type_path) = ty else {
        return FieldWrapper::Plain;
    };
    let Some(segment) = type_path.path.segments.last() else {
        return FieldWrapper::Plain;
    };

    match segment.ident.to_string().as_str() {
        "Option" => FieldWrapper::Optional,
        "Vec" => FieldWrapper::List,
        _ => FieldWrapper::Plain,
    }
}

fn strip_bind_attrs(mut item: ItemStruct) -> ItemStruct {
    for field in &mut item.fields {
        field.attrs.retain(|attr| !attr.path().is_ident("bind"));
    }

    item
}
