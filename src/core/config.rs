//! # Tier Catalog Configuration / 层级目录配置
//!
//! The tier catalog maps each tier to an ordered list of commands. It is read
//! from TOML; when no file is given the catalog embedded in the binary is used.
//!
//! 层级目录将每个层级映射到有序的命令列表。它从 TOML 读取；
//! 未指定文件时使用嵌入在二进制文件中的默认目录。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::{CommandDescriptor, Tier};

/// The default catalog shipped with the binary, also written by `init`.
pub const DEFAULT_CATALOG: &str = include_str!("assets/default_catalog.toml");

/// Default success-rate bar, in percent.
pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 80.0;

pub const DEFAULT_RESULTS_DIR: &str = "test-results";

pub const DEFAULT_REGRESSION_WORKERS: usize = 6;

/// Validation failures for a catalog that parsed but is not usable.
/// 目录可以解析但无法使用时的校验错误。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("tier '{0}' is declared more than once")]
    DuplicateTier(Tier),
    #[error("tier 'regression' is built from critical, important and secondary and cannot be declared")]
    RegressionDeclared,
    #[error("tier '{0}' has a worker bound of zero")]
    ZeroWorkers(Tier),
    #[error("regression_workers must be at least 1")]
    ZeroRegressionWorkers,
    #[error("command #{index} in tier '{tier}' has an empty {field}")]
    BlankField {
        tier: Tier,
        index: usize,
        field: &'static str,
    },
    #[error("success_threshold {0} is outside 0..=100")]
    ThresholdOutOfRange(f64),
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// One command entry of a tier, as written in the catalog file.
/// 目录文件中某个层级的一条命令。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandSpec {
    pub command: String,
    pub component: String,
    pub test_type: String,
    /// Working directory relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workdir: Option<PathBuf>,
}

/// A declared tier: its execution policy and its ordered commands.
/// 已声明的层级：执行策略及其有序命令列表。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TierSpec {
    pub id: Tier,
    /// Upper bound on concurrent commands. Defaults to half the CPUs plus one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// When `false` the tier always runs sequentially, even if parallel
    /// execution was requested.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

/// The whole catalog file.
/// 整个目录文件。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TierCatalog {
    #[serde(default = "default_success_threshold")]
    pub success_threshold: f64,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Optional per-command timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_regression_workers")]
    pub regression_workers: usize,
    #[serde(default)]
    pub tiers: Vec<TierSpec>,
}

fn default_parallel() -> bool {
    true
}

fn default_success_threshold() -> f64 {
    DEFAULT_SUCCESS_THRESHOLD
}

fn default_results_dir() -> PathBuf {
    PathBuf::from(DEFAULT_RESULTS_DIR)
}

fn default_regression_workers() -> usize {
    DEFAULT_REGRESSION_WORKERS
}

/// Worker bound for tiers that do not declare one.
pub fn default_workers() -> usize {
    num_cpus::get() / 2 + 1
}

impl TierCatalog {
    /// Parses the catalog embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CATALOG).context("The embedded default catalog is invalid")
    }

    /// Parses and validates a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: TierCatalog =
            toml::from_str(content).context("Failed to parse tier catalog")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads, parses and validates a catalog file.
    ///
    /// 读取、解析并校验目录文件。
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tier catalog: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid tier catalog: {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if !(0.0..=100.0).contains(&self.success_threshold) {
            return Err(CatalogError::ThresholdOutOfRange(self.success_threshold));
        }
        if self.timeout_secs == Some(0) {
            return Err(CatalogError::ZeroTimeout);
        }
        if self.regression_workers == 0 {
            return Err(CatalogError::ZeroRegressionWorkers);
        }

        let mut seen = Vec::with_capacity(self.tiers.len());
        for spec in &self.tiers {
            if spec.id.is_derived() {
                return Err(CatalogError::RegressionDeclared);
            }
            if seen.contains(&spec.id) {
                return Err(CatalogError::DuplicateTier(spec.id));
            }
            seen.push(spec.id);

            if spec.workers == Some(0) {
                return Err(CatalogError::ZeroWorkers(spec.id));
            }
            for (index, cmd) in spec.commands.iter().enumerate() {
                let blank = [
                    ("command", &cmd.command),
                    ("component", &cmd.component),
                    ("test_type", &cmd.test_type),
                ]
                .into_iter()
                .find(|(_, value)| value.trim().is_empty());
                if let Some((field, _)) = blank {
                    return Err(CatalogError::BlankField {
                        tier: spec.id,
                        index: index + 1,
                        field,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn tier(&self, tier: Tier) -> Option<&TierSpec> {
        self.tiers.iter().find(|spec| spec.id == tier)
    }

    /// The ordered descriptors for `tier`. Regression is the concatenation of
    /// critical, important and secondary, each relabeled as `regression`.
    /// Undeclared tiers have no descriptors.
    pub fn descriptors(&self, tier: Tier) -> Vec<CommandDescriptor> {
        if tier.is_derived() {
            return Tier::REGRESSION_SOURCES
                .iter()
                .flat_map(|source| self.descriptors(*source))
                .map(|desc| desc.relabeled(tier))
                .collect();
        }

        self.tier(tier)
            .map(|spec| {
                spec.commands
                    .iter()
                    .map(|cmd| CommandDescriptor {
                        command: cmd.command.clone(),
                        component: cmd.component.clone(),
                        tier,
                        test_type: cmd.test_type.clone(),
                        workdir: cmd.workdir.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The worker bound for `tier`.
    pub fn workers(&self, tier: Tier) -> usize {
        if tier.is_derived() {
            return self.regression_workers;
        }
        self.tier(tier)
            .and_then(|spec| spec.workers)
            .unwrap_or_else(default_workers)
    }

    /// Whether `tier` may run its commands concurrently.
    pub fn allows_parallel(&self, tier: Tier) -> bool {
        self.tier(tier).is_none_or(|spec| spec.parallel)
    }
}
