use crate::{MAX_NAV_KEY_LEN, error::ErrorTree, prelude::*};

///
/// PageModel
/// Head metadata consumed by the HTML page strategy.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageModel {
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub indexable: bool,
}

impl PageModel {
    pub(crate) fn check(&self, subject: &str, errs: &mut ErrorTree) {
        if self.title.is_empty() {
            err!(errs, subject, "page title is empty");
        }
        if self.description.is_some_and(str::is_empty) {
            err!(errs, subject, "page description is declared but empty");
        }
    }
}

///
/// NavModel
/// Navigation placement in the site chrome.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NavModel {
    pub key: &'static str,
}

impl NavModel {
    pub(crate) fn check(&self, subject: &str, errs: &mut ErrorTree) {
        if self.key.is_empty() {
            err!(errs, subject, "navigation key is empty");
        } else if self.key.len() > MAX_NAV_KEY_LEN {
            err!(
                errs,
                subject,
                "navigation key '{0}' exceeds {MAX_NAV_KEY_LEN} bytes",
                self.key
            );
        }
    }
}
