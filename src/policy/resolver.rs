use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::{ConfigCache, Policy, PolicyError, RuleConfig, RuleSetting};
use crate::config::PropertyStore;

/// Answers "which policy applies to this rule for this file".
///
/// One resolver is built per run and shared by every rule invocation.
pub struct ConfigResolver {
    cache: ConfigCache,
}

impl ConfigResolver {
    pub fn new(store: impl PropertyStore + 'static) -> Self {
        Self {
            cache: ConfigCache::new(store),
        }
    }

    /// Effective policy for rule `T` at `path`.
    ///
    /// The `.editorconfig` value wins; otherwise `fallback` is used, where
    /// [`Policy::Off`] is a valid answer. With neither, returns
    /// [`PolicyError::Incomplete`].
    pub fn get_options<T: RuleSetting>(
        &self,
        path: &Path,
        fallback: Option<Policy<T>>,
    ) -> Result<Policy<T>, PolicyError> {
        let config = self.cache.resolve(path)?;

        if let Some(value) = T::from_config(&config) {
            return Ok(Policy::Enforce(value));
        }

        match fallback {
            Some(fallback) => {
                debug!(rule = %T::RULE, file = %path.display(), ?fallback, "using fallback");
                Ok(fallback)
            }
            None => Err(PolicyError::Incomplete { rule: T::RULE }),
        }
    }

    /// The full rule configuration that applies to `path`.
    pub fn rule_config(&self, path: &Path) -> Result<Arc<RuleConfig>, PolicyError> {
        self.cache.resolve(path)
    }

    pub fn cache(&self) -> &ConfigCache {
        &self.cache
    }
}
