//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the configuration files of the various
//! tools.  This is a configuration file/struct neutral loading engine, storing only the base
//! directory and with `load()` read the proper file, the default one or the built-in one.
//!
//! This encapsulates the configuration file, available with `.inner()` or `.inner_mut()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::makepath;

/// Config filename
const CONFIG: &str = "config.hcl";

/// Every configuration file carries a `version` field we check against the one the
/// code expects.
///
pub trait Versioned {
    /// Version of the file format the code understands
    const VERSION: usize;

    /// Version found in the loaded file
    fn version(&self) -> usize;
}

/// Where the configuration comes from, mostly for logging purposes.
///
#[derive(Clone, Debug, PartialEq)]
pub enum Origin {
    /// File given on the command-line
    File(PathBuf),
    /// File found in the default location
    Default(PathBuf),
    /// Nothing found, using the built-in one
    Builtin,
}

/// A loaded configuration file.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned + Versioned> {
    /// Tag is the project name.
    tag: String,
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Where did we get it from
    origin: Origin,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned + Versioned,
{
    /// Returns the default directory for `tag`.
    ///
    #[tracing::instrument]
    pub fn config_dir(tag: &str) -> PathBuf {
        let basedir: PathBuf = match BaseDirs::new() {
            Some(base) => {
                #[cfg(unix)]
                let base = base.home_dir().join(".config");

                #[cfg(windows)]
                let base = base.data_local_dir().to_path_buf();

                makepath!(base, tag)
            }
            // No home directory, use the current one.
            //
            None => makepath!(".", tag),
        };
        debug!("base = {basedir:?}");
        basedir
    }

    /// Returns the path of the default config file for `tag`
    ///
    pub fn default_file(tag: &str) -> PathBuf {
        Self::config_dir(tag).join(CONFIG)
    }

    /// Load the configuration and check its version.
    ///
    /// Use the following search path:
    /// - file specified on CLI
    /// - default basedir (base on $HOME or $LOCALAPPDATA)
    /// - `builtin` as a last resort
    ///
    /// A file given explicitly must exist.
    ///
    #[tracing::instrument(skip(builtin))]
    pub fn load(tag: &str, fname: Option<&Path>, builtin: &str) -> Result<ConfigFile<T>> {
        let basedir = Self::config_dir(tag);

        let (origin, data) = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(eyre!("Unknown config file {:?}", fname));
                }
                let fname = fname.canonicalize()?;
                trace!("Loading config file {fname:?}");
                let data = fs::read_to_string(&fname)?;
                (Origin::File(fname), data)
            }
            None => {
                let def = basedir.join(CONFIG);
                if def.exists() {
                    trace!("Loading default config file {def:?}");
                    let data = fs::read_to_string(&def)?;
                    (Origin::Default(def), data)
                } else {
                    trace!("No config in {def:?}, using built-in one");
                    (Origin::Builtin, builtin.to_owned())
                }
            }
        };
        debug!("string data = {data}");

        let inner: T = hcl::from_str(&data)?;
        debug!("struct data = {inner:?}");

        if inner.version() != T::VERSION {
            return Err(eyre!(
                "Bad config file version {}, expected {}",
                inner.version(),
                T::VERSION
            ));
        }

        Ok(ConfigFile {
            tag: tag.to_owned(),
            basedir,
            origin,
            inner,
        })
    }

    /// Project tag
    ///
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Where the configuration was read from
    ///
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration file as mutable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the wrapper
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Foo {
        version: usize,
        name: String,
    }

    impl Versioned for Foo {
        const VERSION: usize = 1;

        fn version(&self) -> usize {
            self.version
        }
    }

    const BUILTIN: &str = r##"
version = 1
name = "builtin"
"##;

    #[test_pretty_log::test]
    fn test_config_load_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "version = 1\nname = \"local\"")?;

        let cfg = ConfigFile::<Foo>::load("dropouts-test", Some(file.path()), BUILTIN)?;
        assert_eq!("local", cfg.inner().name);
        assert!(matches!(cfg.origin(), Origin::File(_)));
        assert_eq!("dropouts-test", cfg.tag());
        Ok(())
    }

    #[test_pretty_log::test]
    fn test_config_load_missing_file() {
        let cfg = ConfigFile::<Foo>::load(
            "dropouts-test",
            Some(Path::new("/nonexistent/config.hcl")),
            BUILTIN,
        );
        assert!(cfg.is_err());
    }

    #[test_pretty_log::test]
    fn test_config_load_builtin() -> Result<()> {
        let cfg = ConfigFile::<Foo>::load("dropouts-test-nonexistent-tag", None, BUILTIN)?;
        assert_eq!(&Origin::Builtin, cfg.origin());
        assert_eq!("builtin", cfg.into_inner().name);
        Ok(())
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(2, false)]
    #[case(42, false)]
    fn test_config_load_version(#[case] version: usize, #[case] ok: bool) -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "version = {version}\nname = \"local\"")?;

        let cfg = ConfigFile::<Foo>::load("dropouts-test", Some(file.path()), BUILTIN);
        assert_eq!(ok, cfg.is_ok());
        Ok(())
    }
}
