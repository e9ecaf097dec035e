//! configurant: compose application configuration from ordered sources
//!
//! Configuration files, environment variables and command-line arguments are
//! each turned into a partial configuration object, then deep-merged in the
//! order the caller lists them. Later sources win on conflicting keys; nested
//! objects are merged key by key.
//!
//! ```no_run
//! use configurant::{OptionsOverrides, Session};
//!
//! let mut session = Session::new();
//! let config = session.compose(OptionsOverrides::new().sources(["file", "env", "argv"]))?;
//! println!("{}", config["name"]);
//! # Ok::<(), configurant::ConfigError>(())
//! ```

pub mod domain;
pub mod error;
pub mod merge;
pub mod session;
pub mod sources;
pub mod utils;

pub use domain::{ConfigObject, Options, OptionsOverrides, SourceKind};
pub use error::{ConfigError, Result};
pub use merge::{deep_merge, nest};
pub use session::{compose, Session};
pub use sources::{ArgvSource, EnvSource, FileSource, Source, SourceRegistry};
