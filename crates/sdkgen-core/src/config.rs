use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::transform::TransformOptions;

/// Top-level project configuration loaded from `.sdkgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SdkgenConfig {
    pub input: String,
    /// Output root; every generated path is relative to it.
    pub output: String,
    /// Top-level namespace every generated namespace lives under.
    pub root_namespace: String,
    pub facade: FacadeConfig,
}

impl Default for SdkgenConfig {
    fn default() -> Self {
        Self {
            input: "openapi.json".to_string(),
            output: "src".to_string(),
            root_namespace: "SumUp".to_string(),
            facade: FacadeConfig::default(),
        }
    }
}

impl SdkgenConfig {
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            root_namespace: self.root_namespace.clone(),
            ..TransformOptions::default()
        }
    }
}

/// Options for the façade class that hands out service instances.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    pub class_name: String,
    /// Services that are hand-written and must not get a generated accessor.
    pub reserved_services: Vec<String>,
    /// Map from service class name to accessor method name.
    pub accessor_overrides: IndexMap<String, String>,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        let accessor_overrides = [
            ("Checkouts", "getCheckoutService"),
            ("Customers", "getCustomerService"),
            ("Transactions", "getTransactionService"),
            ("Payouts", "getPayoutService"),
        ]
        .into_iter()
        .map(|(class, method)| (class.to_string(), method.to_string()))
        .collect();

        Self {
            class_name: "SumUp".to_string(),
            reserved_services: vec!["Authorization".to_string(), "Custom".to_string()],
            accessor_overrides,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".sdkgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SdkgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: SdkgenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# sdkgen configuration
input: openapi.json
output: src
root_namespace: SumUp   # every generated namespace lives under this one

facade:
  class_name: SumUp
  reserved_services:    # hand-written services, no generated accessor
    - Authorization
    - Custom
  accessor_overrides:   # service class -> accessor method
    Checkouts: getCheckoutService
    Customers: getCustomerService
    Transactions: getTransactionService
    Payouts: getPayoutService
"#
}
