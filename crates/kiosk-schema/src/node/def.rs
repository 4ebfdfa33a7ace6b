///
/// Def
/// Identity of a component class as captured at its declaration site.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Def {
    pub module_path: &'static str,
    pub ident: &'static str,
}

impl Def {
    /// Fully-qualified class path, unique within a linked process.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}::{}", self.module_path, self.ident)
    }
}
