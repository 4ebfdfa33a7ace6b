use proc_macro::TokenStream;

mod component;
mod expand;

///
/// component
///
/// Declares a struct as a routable component class: parses the class
/// metadata and per-field `#[bind]` attributes, then emits the metadata
/// node, the runtime trait impls and a startup registration hook.
///

#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    component::expand(args.into(), input.into()).into()
}
