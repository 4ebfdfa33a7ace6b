use crate::{error::ErrorTree, prelude::*, types::BindingPrim};

///
/// BindingModel
/// One query-input binding: the bag key it reads, the struct field it fills
/// and the coercion domain the raw text must parse into.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BindingModel {
    pub field: &'static str,
    pub key: &'static str,
    pub prim: BindingPrim,
    pub many: bool,
    pub required: bool,
}

impl BindingModel {
    pub(crate) fn check(&self, subject: &str, errs: &mut ErrorTree) {
        if self.field.is_empty() {
            err!(errs, subject, "binding declares an empty field name");
        }
        if self.key.is_empty() {
            err!(
                errs,
                subject,
                "binding for field '{0}' declares an empty input key",
                self.field
            );
        }
    }
}
