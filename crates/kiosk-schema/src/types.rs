use darling::FromMeta;
use derive_more::{Display, FromStr};
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};

///
/// BindingPrim
/// Coercion domain a query-bound input is parsed into.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, PartialEq)]
#[remain::sorted]
pub enum BindingPrim {
    Bool,
    Float,
    Int,
    Nat,
    Text,
}

impl BindingPrim {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Float | Self::Int | Self::Nat)
    }
}

impl FromMeta for BindingPrim {
    fn from_string(s: &str) -> Result<Self, darling::Error> {
        s.parse::<Self>()
            .map_err(|_| darling::Error::unknown_value(s))
    }
}

impl ToTokens for BindingPrim {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = format_ident!("{self}");

        tokens.extend(quote!(::kiosk::schema::types::BindingPrim::#ident));
    }
}

///
/// RenderKind
/// Renderer strategy a component class commits to at declaration time.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, PartialEq)]
#[remain::sorted]
pub enum RenderKind {
    Json,
    Page,
    Redirect,
    Text,
}

impl RenderKind {
    /// Lowercase label used in CLI output and dispatch events.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Page => "page",
            Self::Redirect => "redirect",
            Self::Text => "text",
        }
    }
}

impl FromMeta for RenderKind {
    fn from_string(s: &str) -> Result<Self, darling::Error> {
        match s {
            "json" => Ok(Self::Json),
            "page" => Ok(Self::Page),
            "redirect" => Ok(Self::Redirect),
            "text" => Ok(Self::Text),
            _ => Err(darling::Error::unknown_value(s)),
        }
    }
}

impl ToTokens for RenderKind {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = format_ident!("{self}");

        tokens.extend(quote!(::kiosk::schema::types::RenderKind::#ident));
    }
}

///
/// RelationKind
/// Direction selector for relationship-graph lookups.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, PartialEq)]
#[remain::sorted]
pub enum RelationKind {
    Child,
    Parent,
}

impl RelationKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Parent => "parent",
        }
    }
}
