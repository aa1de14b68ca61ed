//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading refund
//! policies from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::RefundPolicy;
use crate::store::PolicyStore;

use super::types::PolicyFile;

/// Loads and provides access to refund policies.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── policies/
///     ├── standard.yaml
///     └── flexible.yaml
/// ```
///
/// Every `*.yaml` file in `policies/` holds exactly one policy.
///
/// # Example
///
/// ```no_run
/// use refund_engine::config::ConfigLoader;
/// use refund_engine::store::PolicyStore;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// let policy = loader.get_policy("standard").unwrap();
/// println!("Policy: {}", policy.name());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policies: BTreeMap<String, RefundPolicy>,
}

impl ConfigLoader {
    /// Loads every policy from `path/policies/`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The policies directory is missing or contains no YAML files
    /// - Any file contains invalid YAML or two files share a policy id
    /// - Any policy has an invalid rule set
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policies_dir = path.as_ref().join("policies");
        let dir_str = policies_dir.display().to_string();

        let entries = fs::read_dir(&policies_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "yaml"))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no policy files found)", dir_str),
            });
        }

        let mut policies = BTreeMap::new();
        for file in files {
            let policy = Self::load_yaml::<PolicyFile>(&file)?.into_policy()?;
            if policies.contains_key(policy.id()) {
                return Err(EngineError::ConfigParseError {
                    path: file.display().to_string(),
                    message: format!("duplicate policy id '{}'", policy.id()),
                });
            }
            policies.insert(policy.id().to_string(), policy);
        }

        info!(
            path = %dir_str,
            policies = policies.len(),
            "Loaded refund policies"
        );

        Ok(Self { policies })
    }

    /// Builds a loader from policies already in memory.
    pub fn from_policies(policies: impl IntoIterator<Item = RefundPolicy>) -> Self {
        Self {
            policies: policies
                .into_iter()
                .map(|p| (p.id().to_string(), p))
                .collect(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the number of loaded policies.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Returns true if no policies are loaded.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl PolicyStore for ConfigLoader {
    fn get_policy(&self, policy_id: &str) -> EngineResult<RefundPolicy> {
        self.policies
            .get(policy_id)
            .cloned()
            .ok_or_else(|| EngineError::PolicyNotFound {
                policy_id: policy_id.to_string(),
            })
    }

    fn all_policies(&self) -> EngineResult<Vec<RefundPolicy>> {
        Ok(self.policies.values().cloned().collect())
    }
}
