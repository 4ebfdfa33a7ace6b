//! Component-map builder: scans a catalog, encodes the artifact, and swaps
//! it into place atomically so readers never observe a half-written map.

use kiosk_core::obs::{self, EngineEvent};
use kiosk_schema::{
    catalog::Catalog,
    map::MapCodecError,
    scan::{ScanError, scan},
};
use std::{
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum BuildError {
    #[error(transparent)]
    Codec(#[from] MapCodecError),

    #[error("a component map build is already in progress (lock file '{path}' exists)")]
    InProgress { path: String },

    #[error("cannot write component map at '{path}': {cause}")]
    Io { path: String, cause: String },

    #[error(transparent)]
    Scan(#[from] ScanError),
}

///
/// BuildReport
/// Operator-facing summary of a successful build.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BuildReport {
    pub components: usize,
    pub routes: usize,
    pub bytes: usize,
}

/// Scan `catalog` and persist the component map at `path`.
///
/// A failed scan or encode leaves any previous artifact untouched; the new
/// bytes land via a same-directory rename. Concurrent builds against the
/// same path are rejected with [`BuildError::InProgress`].
pub fn build(catalog: &Catalog, path: impl AsRef<Path>) -> Result<BuildReport, BuildError> {
    let path = path.as_ref();
    obs::record(EngineEvent::BuildStarted);

    match run(catalog, path) {
        Ok(report) => {
            obs::record(EngineEvent::BuildFinished {
                routes: report.routes as u64,
            });
            Ok(report)
        }
        Err(err) => {
            obs::record(EngineEvent::BuildFailed);
            Err(err)
        }
    }
}

fn run(catalog: &Catalog, path: &Path) -> Result<BuildReport, BuildError> {
    let _lock = BuildLock::acquire(path)?;

    // Validate before touching the filesystem; a rejected catalog must not
    // disturb the artifact a running dispatcher was loaded from.
    let map = scan(catalog)?;
    let bytes = map.to_bytes()?;

    let tmp = sibling(path, "tmp");
    fs::write(&tmp, &bytes).map_err(|cause| io_error(&tmp, &cause))?;
    fs::rename(&tmp, path).map_err(|cause| io_error(path, &cause))?;

    Ok(BuildReport {
        components: catalog.len(),
        routes: map.route_count(),
        bytes: bytes.len(),
    })
}

///
/// BuildLock
/// Guard file serializing builds against one artifact path. Dropping the
/// guard removes the file, on error paths included.
///

struct BuildLock {
    path: PathBuf,
}

impl BuildLock {
    fn acquire(map_path: &Path) -> Result<Self, BuildError> {
        let path = sibling(map_path, "lock");

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(Self { path }),
            Err(cause) if cause.kind() == io::ErrorKind::AlreadyExists => {
                Err(BuildError::InProgress {
                    path: path.display().to_string(),
                })
            }
            Err(cause) => Err(io_error(&path, &cause)),
        }
    }
}

impl Drop for BuildLock {
    fn drop(&mut self) {
        // A lock left behind by a killed process must be removed by hand;
        // the InProgress message names the file.
        let _ = fs::remove_file(&self.path);
    }
}

fn io_error(path: &Path, cause: &io::Error) -> BuildError {
    BuildError::Io {
        path: path.display().to_string(),
        cause: cause.to_string(),
    }
}

/// `map.json` -> `map.json.tmp` / `map.json.lock`.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_schema::{map::ComponentMap, prelude::*};
    use tempfile::TempDir;

    const fn node(ident: &'static str, route: &'static str) -> ComponentNode {
        ComponentNode {
            def: Def {
                module_path: "build_tests",
                ident,
            },
            route: RouteModel { key: route },
            render: RenderKind::Text,
            page: None,
            nav: None,
            remove_nav: false,
            bindings: &[],
            parents: &[],
            children: &[],
        }
    }

    fn two_class_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert_node(node("Alpha", "alpha:home"));
        catalog.insert_node(node("Beta", "beta:home"));
        catalog
    }

    fn clashing_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert_node(node("Alpha", "shared:route"));
        catalog.insert_node(node("Beta", "shared:route"));
        catalog
    }

    #[test]
    fn build_persists_a_loadable_artifact() {
        let dir = TempDir::new().expect("tempdir should be created");
        let path = dir.path().join("kiosk-map.json");

        let report = build(&two_class_catalog(), &path).expect("build should succeed");
        assert_eq!(report.components, 2);
        assert_eq!(report.routes, 2);

        let bytes = fs::read(&path).expect("artifact should exist");
        assert_eq!(bytes.len(), report.bytes);

        let map = ComponentMap::from_bytes(&bytes).expect("artifact should decode");
        assert_eq!(map.resolve("alpha:home"), Some("build_tests::Alpha"));
    }

    #[test]
    fn rebuilding_an_unchanged_catalog_is_byte_identical() {
        let dir = TempDir::new().expect("tempdir should be created");
        let path = dir.path().join("kiosk-map.json");
        let catalog = two_class_catalog();

        build(&catalog, &path).expect("first build should succeed");
        let first = fs::read(&path).expect("artifact should exist");

        build(&catalog, &path).expect("second build should succeed");
        let second = fs::read(&path).expect("artifact should exist");

        assert_eq!(first, second);
    }

    #[test]
    fn failed_scan_leaves_the_previous_artifact_in_place() {
        let dir = TempDir::new().expect("tempdir should be created");
        let path = dir.path().join("kiosk-map.json");

        build(&two_class_catalog(), &path).expect("seed build should succeed");
        let before = fs::read(&path).expect("artifact should exist");

        let err = build(&clashing_catalog(), &path).expect_err("clashing routes must fail");
        assert!(matches!(err, BuildError::Scan(ScanError::Validation(_))));

        let after = fs::read(&path).expect("artifact should still exist");
        assert_eq!(before, after);
    }

    #[test]
    fn empty_catalog_is_rejected_before_any_write() {
        let dir = TempDir::new().expect("tempdir should be created");
        let path = dir.path().join("kiosk-map.json");

        let err = build(&Catalog::new(), &path).expect_err("empty catalog must fail");
        assert!(matches!(err, BuildError::Scan(ScanError::EmptyCatalog)));
        assert!(!path.exists());
    }

    #[test]
    fn concurrent_build_is_reported_as_in_progress() {
        let dir = TempDir::new().expect("tempdir should be created");
        let path = dir.path().join("kiosk-map.json");
        let lock = sibling(&path, "lock");
        fs::write(&lock, b"").expect("lock file should be created");

        let err = build(&two_class_catalog(), &path).expect_err("held lock must block");
        assert!(matches!(err, BuildError::InProgress { .. }));
        assert!(!path.exists(), "a blocked build must not write the artifact");

        fs::remove_file(&lock).expect("lock file should be removed");
        build(&two_class_catalog(), &path).expect("build should succeed once unlocked");
    }

    #[test]
    fn lock_is_released_after_a_failed_build() {
        let dir = TempDir::new().expect("tempdir should be created");
        let path = dir.path().join("kiosk-map.json");

        build(&clashing_catalog(), &path).expect_err("clashing routes must fail");
        assert!(
            !sibling(&path, "lock").exists(),
            "lock must not outlive the failed build"
        );

        build(&two_class_catalog(), &path).expect("next build should succeed");
    }
}
