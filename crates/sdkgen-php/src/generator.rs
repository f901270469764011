use sdkgen_core::config::SdkgenConfig;
use sdkgen_core::ir::IrSpec;
use sdkgen_core::{CodeGenerator, GeneratedFile, GeneratorError};

use crate::emitters;

/// PHP client SDK generator: model classes per namespace, one service class
/// per tag, and the façade class.
pub struct PhpClientGenerator;

impl CodeGenerator for PhpClientGenerator {
    type Config = SdkgenConfig;

    fn generate(
        &self,
        ir: &IrSpec,
        config: &SdkgenConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let env = emitters::environment()?;
        let mut files = Vec::new();

        for ns in &ir.namespaces {
            if let Some(file) = emitters::models::emit_models(&env, ir, ns)? {
                files.push(file);
            }
        }
        let model_files = files.len();

        for ns in ir.services() {
            files.push(emitters::services::emit_service(
                &env,
                &ir.root_namespace,
                ns,
            )?);
        }

        files.push(emitters::facade::emit_facade(&env, ir, &config.facade)?);

        log::info!(
            "generated files models={model_files} services={} total={}",
            files.len() - model_files - 1,
            files.len()
        );

        Ok(files)
    }
}
