use std::collections::BTreeSet;

use heck::ToSnakeCase;
use minijinja::{Environment, context};
use sdkgen_core::config::FacadeConfig;
use sdkgen_core::ir::IrSpec;
use sdkgen_core::{GeneratedFile, GeneratorError};

use super::{FACADE_TEMPLATE, render};

const BASE_IMPORTS: &[&str] = &[
    "Application\\ApplicationConfiguration",
    "Application\\ApplicationConfigurationInterface",
    "Authentication\\AccessToken",
    "Exceptions\\SumUpConfigurationException",
    "Exceptions\\SumUpSDKException",
    "HttpClients\\HttpClientsFactory",
    "HttpClients\\SumUpHttpClientInterface",
];

/// Hand-written services the façade body always references.
const BUILTIN_SERVICES: &[&str] = &["Authorization", "Custom"];

/// One generated accessor on the façade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccessor {
    pub class_name: String,
    pub method_name: String,
    pub description: String,
}

/// Accessors for every rendered service, skipping the reserved ones and the
/// built-ins the façade template always declares.
pub fn service_accessors(ir: &IrSpec, config: &FacadeConfig) -> Vec<ServiceAccessor> {
    ir.services()
        .map(|ns| ns.display_name.as_str())
        .filter(|name| !BUILTIN_SERVICES.contains(name))
        .filter(|name| !config.reserved_services.iter().any(|r| r == name))
        .map(|name| ServiceAccessor {
            class_name: name.to_string(),
            method_name: accessor_name(name, config),
            description: accessor_description(name),
        })
        .collect()
}

fn accessor_name(class_name: &str, config: &FacadeConfig) -> String {
    config
        .accessor_overrides
        .get(class_name)
        .cloned()
        .unwrap_or_else(|| format!("get{class_name}Service"))
}

fn accessor_description(class_name: &str) -> String {
    let words = class_name.to_snake_case().replace('_', " ");
    if words.trim().is_empty() {
        class_name.to_lowercase()
    } else {
        words
    }
}

/// Emit `<Root>/<Facade>.php`.
pub fn emit_facade(
    env: &Environment<'_>,
    ir: &IrSpec,
    config: &FacadeConfig,
) -> Result<GeneratedFile, GeneratorError> {
    let root = ir.root_namespace.as_str();
    let accessors = service_accessors(ir, config);

    let services: BTreeSet<String> = BUILTIN_SERVICES
        .iter()
        .map(|name| name.to_string())
        .chain(config.reserved_services.iter().cloned())
        .chain(accessors.iter().map(|a| a.class_name.clone()))
        .map(|name| format!("{root}\\Services\\{name}"))
        .collect();
    let imports: Vec<String> = BASE_IMPORTS
        .iter()
        .map(|import| format!("{root}\\{import}"))
        .chain(services)
        .collect();

    let services_ctx: Vec<minijinja::Value> = accessors
        .iter()
        .map(|a| {
            context! {
                class_name => a.class_name.clone(),
                method_name => a.method_name.clone(),
                description => a.description.clone(),
            }
        })
        .collect();

    let content = render(
        env,
        FACADE_TEMPLATE,
        context! {
            namespace => root,
            class_name => config.class_name.clone(),
            imports => imports,
            services => services_ctx,
        },
    )?;

    log::debug!("rendered facade services={}", accessors.len());

    Ok(GeneratedFile {
        path: format!("{}/{}.php", root.replace('\\', "/"), config.class_name),
        content,
    })
}
