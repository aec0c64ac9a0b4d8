//! Runtime configuration read from environment variables.
//!
//! | Variable                   | Default         |
//! |----------------------------|-----------------|
//! | `PROC_METRICS_LISTEN_ADDR` | `0.0.0.0:19637` |
//! | `PROC_METRICS_PROC_ROOT`   | `/proc`         |
//!
//! Log levels are configured separately through `RUST_LOG`.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

pub const LISTEN_ADDR_VAR: &str = "PROC_METRICS_LISTEN_ADDR";
pub const PROC_ROOT_VAR: &str = "PROC_METRICS_PROC_ROOT";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:19637";
pub const DEFAULT_PROC_ROOT: &str = "/proc";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid listen address `{value}` in `{var}`: {source}")]
    InvalidListenAddr {
        var: &'static str,
        value: String,
        #[source]
        source: AddrParseError,
    },
    #[error("`{var}` must not be empty")]
    EmptyProcRoot { var: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP API listens on.
    pub listen_addr: SocketAddr,
    /// Directory procfs files are read from.
    pub proc_root: PathBuf,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from `lookup`, falling back to defaults for unset
    /// variables.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidListenAddr`] if the listen address is not a socket address.
    /// - [`Error::EmptyProcRoot`] if the procfs root is set but empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let listen_addr =
            lookup(LISTEN_ADDR_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr = listen_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|source| Error::InvalidListenAddr {
                var: LISTEN_ADDR_VAR,
                value: listen_addr.clone(),
                source,
            })?;

        let proc_root = match lookup(PROC_ROOT_VAR) {
            Some(root) if root.trim().is_empty() => {
                return Err(Error::EmptyProcRoot { var: PROC_ROOT_VAR });
            }
            Some(root) => PathBuf::from(root),
            None => PathBuf::from(DEFAULT_PROC_ROOT),
        };

        Ok(Self {
            listen_addr,
            proc_root,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:19637".parse::<SocketAddr>().unwrap());
        assert_eq!(config.proc_root, PathBuf::from("/proc"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (LISTEN_ADDR_VAR, "127.0.0.1:8080"),
            (PROC_ROOT_VAR, "/rootfs/proc"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.proc_root, PathBuf::from("/rootfs/proc"));
    }

    #[test]
    fn test_invalid_listen_addr() {
        let err = Config::from_lookup(lookup(&[(LISTEN_ADDR_VAR, "localhost")])).unwrap_err();
        match err {
            Error::InvalidListenAddr { var, value, .. } => {
                assert_eq!(var, LISTEN_ADDR_VAR);
                assert_eq!(value, "localhost");
            }
            _ => panic!("Expected InvalidListenAddr error"),
        }
    }

    #[test]
    fn test_empty_proc_root() {
        let err = Config::from_lookup(lookup(&[(PROC_ROOT_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, Error::EmptyProcRoot { .. }));
    }
}
