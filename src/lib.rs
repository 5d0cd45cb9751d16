//! Hierarchical resource-path addressing and completion for a
//! feature-flag management shell.
//!
//! Resources live at `config/project/environment/resource` coordinates,
//! addressed with the grammar `//config/project/environment/resource`.
//! The `...` segment stands for the current default at its depth. The
//! [`Completer`] turns a partially typed path plus a chain of per-depth
//! [`Lister`]s into sorted suggestion strings, and [`ShellCompleter`]
//! adapts that to a `reedline` line editor.

pub mod completer;
pub mod error;
pub mod logging;
pub mod path;
pub mod session;
pub mod shell;

pub use completer::{replace_defaults, Completer, DefaultPathSource, Lister};
pub use error::{FlagpathError, Result};
pub use path::ResourcePath;
pub use session::{ConfigDefaults, Session};
pub use shell::ShellCompleter;
