//! Lookup of keys shipped as named resources.

use alloc::vec::Vec;

use crate::errors::Result;

/// Source of named binary resources, such as keys bundled with an application.
pub trait ResourceLocator {
    /// Contents of the resource `name.extension`, or `None` if it does not exist.
    ///
    /// A resource that exists but cannot be read is an error, not `None`.
    fn locate(&self, name: &str, extension: &str) -> Result<Option<Vec<u8>>>;
}

impl<L: ResourceLocator + ?Sized> ResourceLocator for &L {
    fn locate(&self, name: &str, extension: &str) -> Result<Option<Vec<u8>>> {
        (**self).locate(name, extension)
    }
}

#[cfg(feature = "std")]
pub use self::directory::Directory;

#[cfg(feature = "std")]
mod directory {
    use super::ResourceLocator;
    use crate::errors::{Error, Result};
    use alloc::{format, vec::Vec};
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    /// Resources stored as files in a single directory.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Directory {
        root: PathBuf,
    }

    impl Directory {
        /// Locate resources under `root`.
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Directory { root: root.into() }
        }

        /// Directory searched by this locator.
        pub fn root(&self) -> &Path {
            &self.root
        }
    }

    impl ResourceLocator for Directory {
        fn locate(&self, name: &str, extension: &str) -> Result<Option<Vec<u8>>> {
            let path = self.root.join(format!("{}.{}", name, extension));
            match std::fs::read(&path) {
                Ok(contents) => Ok(Some(contents)),
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    tracing::debug!(path = ?path, "resource not found");
                    Ok(None)
                }
                Err(err) => {
                    tracing::warn!(path = ?path, error = %err, "resource not readable");
                    Err(Error::ResourceUnreadable)
                }
            }
        }
    }

}
