use crate::{MAX_ROUTE_KEY_LEN, error::ErrorTree, prelude::*};

///
/// RouteModel
/// Stable dispatch key declared on a component class.
///
/// Keys are colon-separated lowercase segments, e.g. `advert:spotlight`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RouteModel {
    pub key: &'static str,
}

impl RouteModel {
    /// Enforce the route-key grammar, recording violations under `subject`.
    pub(crate) fn check(&self, subject: &str, errs: &mut ErrorTree) {
        let key = self.key;

        if key.is_empty() {
            err!(errs, subject, "route key is empty");
            return;
        }
        if key.len() > MAX_ROUTE_KEY_LEN {
            err!(
                errs,
                subject,
                "route key '{key}' exceeds {MAX_ROUTE_KEY_LEN} bytes"
            );
        }
        if !key.is_ascii() {
            err!(errs, subject, "route key '{key}' contains non-ASCII bytes");
            return;
        }

        for segment in key.split(':') {
            if segment.is_empty() {
                err!(errs, subject, "route key '{key}' has an empty segment");
            } else if !segment
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
            {
                err!(
                    errs,
                    subject,
                    "route key '{key}' segment '{segment}' has characters outside [a-z0-9-]"
                );
            }
        }
    }
}
