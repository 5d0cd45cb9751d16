//! Path completion against a chain of per-depth listers.
//!
//! A [`Completer`] is wired with one [`Lister`] per hierarchy level plus
//! an optional config-level lister. [`Completer::completions`] classifies
//! the typed input (config-qualified absolute, plain absolute, or
//! relative to the current defaults), resolves placeholder segments
//! through the [`DefaultPathSource`], asks the lister at the resolved
//! depth for child names, and returns decorated, sorted suggestion
//! strings ready for insertion.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::path::{ResourcePath, DEFAULT_SEGMENT};

/// Enumerates the valid child names under a parent path.
///
/// Implementations are supplied by the command layer, typically backed by
/// the flag-management API (config, project, environment, flag, and goal
/// listings). Any closure with the matching signature is a `Lister`.
pub trait Lister: Send + Sync {
    fn list(&self, parent: &ResourcePath) -> Result<Vec<String>>;
}

impl<F> Lister for F
where
    F: Fn(&ResourcePath) -> Result<Vec<String>> + Send + Sync,
{
    fn list(&self, parent: &ResourcePath) -> Result<Vec<String>> {
        self(parent)
    }
}

/// Resolves the currently active path for a config key, or the global
/// default when no key is given.
pub trait DefaultPathSource: Send + Sync {
    fn default_path(&self, config: Option<&str>) -> Result<ResourcePath>;
}

impl<F> DefaultPathSource for F
where
    F: Fn(Option<&str>) -> Result<ResourcePath> + Send + Sync,
{
    fn default_path(&self, config: Option<&str>) -> Result<ResourcePath> {
        self(config)
    }
}

/// Computes completions for partially typed resource paths.
///
/// Holds no mutable state; a single instance can serve every keystroke.
/// The lister chain is positional: `listers[d]` lists the children of a
/// parent at depth `d`. A `None` slot marks a depth that is never listed
/// directly but still counts toward the chain length.
pub struct Completer {
    defaults: Arc<dyn DefaultPathSource>,
    config_lister: Option<Arc<dyn Lister>>,
    listers: Vec<Option<Arc<dyn Lister>>>,
}

/// Listing target resolved from the typed input.
struct Target {
    parent: ResourcePath,
    lister: Option<Arc<dyn Lister>>,
    prefix: String,
    suffix: String,
    extras: Vec<String>,
}

impl Completer {
    pub fn new(
        defaults: Arc<dyn DefaultPathSource>,
        config_lister: Option<Arc<dyn Lister>>,
        listers: Vec<Option<Arc<dyn Lister>>>,
    ) -> Self {
        Self {
            defaults,
            config_lister,
            listers,
        }
    }

    /// Returns the sorted completion candidates for `arg`, the partially
    /// typed path currently in the input buffer.
    ///
    /// Errors from the injected capabilities propagate verbatim; a depth
    /// with no registered lister yields an empty list instead.
    pub fn completions(&self, arg: &str) -> Result<Vec<String>> {
        let target = if ResourcePath::from(arg).is_abs() {
            self.absolute_target(arg)?
        } else {
            self.relative_target()?
        };

        let lister = match target.lister {
            Some(lister) => lister,
            None => return Ok(Vec::new()),
        };
        let options = lister.list(&target.parent)?;
        debug!(parent = %target.parent, ?options, "listed children");

        let mut results: Vec<String> = options
            .iter()
            .map(|name| format!("{}{}{}", target.prefix, name, target.suffix))
            .collect();
        results.extend(
            target
                .extras
                .iter()
                .map(|extra| format!("{}{}", target.prefix, extra)),
        );
        results.sort();
        Ok(results)
    }

    /// Target for absolute input, config-qualified or not.
    fn absolute_target(&self, arg: &str) -> Result<Target> {
        let arg_path = ResourcePath::from(arg);

        let raw_parent;
        let parent;
        if arg_path.depth() == 0 {
            // Bare root: `/`, `//`, or `//config`
            raw_parent = arg_path.clone();
            parent = arg_path.clone();
            if arg_path.config().is_some() {
                return Ok(Target {
                    parent,
                    lister: self.config_lister.clone(),
                    prefix: "//".to_string(),
                    suffix: "/".to_string(),
                    extras: Vec::new(),
                });
            }
        } else {
            // Drop the final (possibly partial) segment, then resolve any
            // leading placeholders so the listing happens at a concrete
            // parent.
            let keys = arg_path.keys();
            raw_parent = ResourcePath::new_abs(arg_path.config(), &keys[..keys.len() - 1]);
            parent = replace_defaults(&raw_parent, self.defaults.as_ref(), self.listers.len())?;
        }

        // A lone empty key is the split artifact of a bare root with a
        // trailing separator and counts as depth 0 here.
        let mut parent_depth = parent.depth();
        if parent_depth == 1 && parent.keys()[0].is_empty() {
            parent_depth = 0;
        }

        let lister = self.listers.get(parent_depth).cloned().flatten();
        let suffix = if self.listers.len() > parent_depth + 1 {
            "/"
        } else {
            ""
        };

        let default_path = self.defaults.default_path(arg_path.config())?;

        let mut extras = Vec::new();
        if parent_depth < self.listers.len() && self.listers.len() <= default_path.depth() {
            // Offer `...` as a shortcut whenever the parent is made up of
            // placeholders only (the bare root included) and the defaults
            // reach deep enough to resolve the whole chain.
            let parent_is_default = parent.keys().iter().all(|key| *key == DEFAULT_SEGMENT);
            if parent_is_default {
                extras.push(format!("{}{}", DEFAULT_SEGMENT, suffix));
            }
        }

        let prefix = if raw_parent.depth() >= 1 {
            format!("{}/", raw_parent)
        } else {
            "/".to_string()
        };
        if arg == "/" {
            extras.push("/".to_string());
        }

        Ok(Target {
            parent,
            lister,
            prefix,
            suffix: suffix.to_string(),
            extras,
        })
    }

    /// Target for relative input: list leaves under the default path and
    /// hint that absolute addressing is available.
    fn relative_target(&self) -> Result<Target> {
        let parent = self.defaults.default_path(None)?;
        let lister = self.listers.last().cloned().flatten();
        Ok(Target {
            parent,
            lister,
            prefix: String::new(),
            suffix: String::new(),
            extras: vec!["/".to_string()],
        })
    }
}

/// Substitutes leading `...` segments of `path` with the corresponding
/// segments of the current default path, up to `depth` positions.
///
/// The scan is strictly left to right and stops at the first concrete
/// segment, so only placeholder prefixes are ever rewritten: in
/// `/foo/.../bar` nothing is replaced because position 0 is already
/// concrete. A default path shallower than the scan leaves the remaining
/// placeholders in place.
pub fn replace_defaults(
    path: &ResourcePath,
    source: &dyn DefaultPathSource,
    depth: usize,
) -> Result<ResourcePath> {
    let mut path = path.clone();
    let mut pos = 0;
    while pos < depth && pos < path.depth() {
        if path.keys()[pos] != DEFAULT_SEGMENT {
            return Ok(path);
        }
        let default_path = source.default_path(path.config())?;
        if pos >= default_path.depth() {
            break;
        }
        let next = {
            let default_keys = default_path.keys();
            let mut keys = path.keys();
            keys[pos] = default_keys[pos];
            ResourcePath::new_abs(path.config(), &keys)
        };
        path = next;
        pos += 1;
    }
    Ok(path)
}
