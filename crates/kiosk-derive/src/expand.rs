//! Token emission for `#[component]`. Everything is referenced through
//! absolute `::kiosk` paths so expansion works in any downstream crate.

use crate::component::{Binding, ComponentModel, ConstructMode, FieldWrapper};
use convert_case::{Case, Casing};
use kiosk_schema::types::RenderKind;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

pub fn emit(model: &ComponentModel) -> TokenStream {
    let item = &model.item;
    let name = item.ident.to_string();

    let node_ident = format_ident!("{}_NODE", name.to_case(Case::UpperSnake));
    let make_ident = format_ident!("__kiosk_make_{}", name.to_case(Case::Snake));
    let register_ident = format_ident!("__kiosk_register_{}", name.to_case(Case::Snake));

    let node = node_static(model, &node_ident);
    let kind = impl_component_kind(model, &node_ident);
    let bind = impl_bind_target(model);
    let construct = impl_construct(model);
    let make = make_fn(model, &make_ident);
    let register = register_hook(&node_ident, &make_ident, &register_ident);

    quote! {
        #item

        #node
        #kind
        #bind
        #construct
        #make
        #register
    }
}

/// The class metadata node, emitted as a `static` so the registry can hold
/// `&'static` references to it for the lifetime of the process.
fn node_static(model: &ComponentModel, node_ident: &Ident) -> TokenStream {
    let ident = &model.item.ident;
    let name = ident.to_string();
    let route = &model.args.route;
    let render = &model.args.render;
    let remove_nav = model.args.remove_nav;

    let page = match &model.args.page {
        Some(page) => {
            let title = &page.title;
            let description = quote_opt_str(page.description.as_ref());
            let indexable = page.indexable;

            quote! {
                ::core::option::Option::Some(::kiosk::schema::node::PageModel {
                    title: #title,
                    description: #description,
                    indexable: #indexable,
                })
            }
        }
        None => quote!(::core::option::Option::None),
    };

    let nav = match &model.args.nav {
        Some(key) => quote! {
            ::core::option::Option::Some(::kiosk::schema::node::NavModel { key: #key })
        },
        None => quote!(::core::option::Option::None),
    };

    let parents = relation_paths(&model.args.parents);
    let children = relation_paths(&model.args.children);

    quote! {
        static #node_ident: ::kiosk::schema::node::ComponentNode =
            ::kiosk::schema::node::ComponentNode {
                def: ::kiosk::schema::node::Def {
                    module_path: ::core::module_path!(),
                    ident: #name,
                },
                route: ::kiosk::schema::node::RouteModel { key: #route },
                render: #render,
                page: #page,
                nav: #nav,
                remove_nav: #remove_nav,
                bindings: <#ident as ::kiosk::core::bind::BindTarget>::BINDINGS,
                parents: #parents,
                children: #children,
            };
    }
}

/// Resolve relation targets through their `ComponentKind::PATH` constants,
/// so a misspelled target fails to compile instead of failing at scan.
fn relation_paths(paths: &[syn::Path]) -> TokenStream {
    let entries = paths.iter().map(|path| {
        quote! { <#path as ::kiosk::core::component::ComponentKind>::PATH }
    });

    quote! { &[#(#entries),*] }
}

fn impl_component_kind(model: &ComponentModel, node_ident: &Ident) -> TokenStream {
    let ident = &model.item.ident;
    let name = ident.to_string();
    let route = &model.args.route;

    quote! {
        impl ::kiosk::core::component::ComponentKind for #ident {
            const PATH: &'static str = ::core::concat!(::core::module_path!(), "::", #name);
            const ROUTE: &'static str = #route;

            fn node() -> &'static ::kiosk::schema::node::ComponentNode {
                &#node_ident
            }
        }
    }
}

fn impl_bind_target(model: &ComponentModel) -> TokenStream {
    let ident = &model.item.ident;
    let models = model.bindings.iter().map(binding_model);
    let apply = apply_body(&model.bindings);

    quote! {
        impl ::kiosk::core::bind::BindTarget for #ident {
            const BINDINGS: &'static [::kiosk::schema::node::BindingModel] = &[#(#models),*];

            #apply
        }
    }
}

fn binding_model(binding: &Binding) -> TokenStream {
    let field = binding.field.to_string();
    let key = &binding.key;
    let prim = &binding.prim;
    let many = binding.many;
    let required = binding.required;

    quote! {
        ::kiosk::schema::node::BindingModel {
            field: #field,
            key: #key,
            prim: #prim,
            many: #many,
            required: #required,
        }
    }
}

fn apply_body(bindings: &[Binding]) -> TokenStream {
    if bindings.is_empty() {
        return quote! {
            fn apply(
                &mut self,
                field: &str,
                _value: ::kiosk::core::value::Value,
            ) -> ::core::result::Result<(), ::kiosk::core::bind::BindError> {
                ::core::result::Result::Err(::kiosk::core::bind::BindError::unknown_field(field))
            }
        };
    }

    let arms = bindings.iter().map(|binding| {
        let ident = &binding.field;
        let field = binding.field.to_string();
        let assign = match binding.wrapper {
            FieldWrapper::Optional => quote! {
                self.#ident = ::core::option::Option::Some(
                    ::core::convert::TryInto::try_into(value)
                        .map_err(|e| ::kiosk::core::bind::BindError::apply(#field, e))?,
                );
            },
            FieldWrapper::List | FieldWrapper::Plain => quote! {
                self.#ident = ::core::convert::TryInto::try_into(value)
                    .map_err(|e| ::kiosk::core::bind::BindError::apply(#field, e))?;
            },
        };

        quote! {
            #field => { #assign }
        }
    });

    quote! {
        fn apply(
            &mut self,
            field: &str,
            value: ::kiosk::core::value::Value,
        ) -> ::core::result::Result<(), ::kiosk::core::bind::BindError> {
            match field {
                #(#arms)*
                other => {
                    return ::core::result::Result::Err(
                        ::kiosk::core::bind::BindError::unknown_field(other),
                    );
                }
            }

            ::core::result::Result::Ok(())
        }
    }
}

fn impl_construct(model: &ComponentModel) -> TokenStream {
    if model.args.construct == ConstructMode::Manual {
        return TokenStream::new();
    }
    let ident = &model.item.ident;

    quote! {
        impl ::kiosk::core::component::Construct for #ident {
            fn construct(
                _cx: &::kiosk::core::context::RequestContext,
            ) -> ::core::result::Result<Self, ::kiosk::core::component::ConstructError> {
                ::core::result::Result::Ok(<Self as ::core::default::Default>::default())
            }
        }
    }
}

/// The factory thunk stored in the vtable: construct, bind, then erase into
/// the cell variant matching the declared render strategy.
fn make_fn(model: &ComponentModel, make_ident: &Ident) -> TokenStream {
    let ident = &model.item.ident;
    let cell = cell_variant(model.args.render);

    quote! {
        fn #make_ident(
            cx: &::kiosk::core::context::RequestContext,
            inputs: &::kiosk::core::input::InputBag,
        ) -> ::core::result::Result<
            ::kiosk::core::component::ComponentCell,
            ::kiosk::core::component::MakeError,
        > {
            let mut component = <#ident as ::kiosk::core::component::Construct>::construct(cx)?;
            ::kiosk::core::bind::bind(&mut component, inputs)?;

            ::core::result::Result::Ok(::kiosk::core::component::ComponentCell::#cell(
                ::std::boxed::Box::new(component),
            ))
        }
    }
}

fn cell_variant(render: RenderKind) -> Ident {
    format_ident!("{render}")
}

fn register_hook(node_ident: &Ident, make_ident: &Ident, register_ident: &Ident) -> TokenStream {
    quote! {
        #[::kiosk::__reexports::ctor::ctor(unsafe, anonymous, crate_path = ::kiosk::__reexports::ctor)]
        fn #register_ident() {
            ::kiosk::schema::catalog::catalog_write().insert_node(#node_ident);
            ::kiosk::core::registry::runtime_write().insert(
                ::kiosk::core::registry::ComponentVtable {
                    node: &#node_ident,
                    make: #make_ident,
                },
            );
        }
    }
}

fn quote_opt_str(value: Option<&String>) -> TokenStream {
    match value {
        Some(v) => quote!(::core::option::Option::Some(#v)),
        None => quote!(::core::option::Option::None),
    }
}
