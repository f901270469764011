use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use sdkgen_core::config::{self, CONFIG_FILE_NAME, SdkgenConfig};
use sdkgen_core::ir::IrSpec;
use sdkgen_core::parse::{self, spec::OpenApiSpec};
use sdkgen_core::transform;
use sdkgen_core::{CodeGenerator, GeneratedFile};
use sdkgen_php::PhpClientGenerator;

#[derive(Parser)]
#[command(name = "sdkgen", about = "OpenAPI 3.x to PHP client SDK generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the PHP SDK from an OpenAPI spec
    Generate {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output root for the generated sources
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate an OpenAPI spec
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the resolved namespaces of an OpenAPI spec
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new sdkgen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output } => cmd_generate(input, output),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "sdkgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<SdkgenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn read_spec(path: &Path) -> Result<OpenApiSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };
    Ok(parsed)
}

fn load_spec(path: &Path, cfg: &SdkgenConfig) -> Result<IrSpec> {
    let parsed = read_spec(path)?;
    let ir = transform::transform_with_options(&parsed, &cfg.transform_options())
        .with_context(|| format!("failed to resolve {}", path.display()))?;
    Ok(ir)
}

/// Write generated files under `base`, creating parent directories.
///
/// A failing file is logged and skipped; the rest are still written.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    let mut failed = 0usize;
    for file in files {
        let path = base.join(&file.path);
        match write_file(&path, &file.content) {
            Ok(()) => log::debug!("wrote {}", path.display()),
            Err(err) => {
                log::error!("{err:#}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("failed to write {failed} of {} files", files.len());
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

fn cmd_generate(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let ir = load_spec(&input, &cfg)?;

    log::info!(
        "resolved {} namespaces, {} models, {} operations from {}",
        ir.namespaces.len(),
        ir.model_count(),
        ir.operation_count(),
        input.display()
    );

    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;

    let files = PhpClientGenerator
        .generate(&ir, &cfg)
        .map_err(|e| anyhow::anyhow!(e))?;

    write_files(&output_dir, &files)?;

    log::info!("generated {} files in {}", files.len(), output_dir.display());
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    for line in validation_report(&input, &cfg)? {
        eprintln!("{line}");
    }
    eprintln!("Validation successful.");
    Ok(())
}

/// Parse and resolve `input` under the project config, describing what the
/// run would produce.
fn validation_report(input: &Path, cfg: &SdkgenConfig) -> Result<Vec<String>> {
    let parsed = read_spec(input)?;
    let ir = transform::transform_with_options(&parsed, &cfg.transform_options())
        .with_context(|| format!("failed to resolve {}", input.display()))?;

    let mut lines = vec![
        format!(
            "Valid OpenAPI {} spec: {}",
            parsed.openapi, parsed.info.title
        ),
        format!("  Version: {}", parsed.info.version),
        format!("  Paths: {}", parsed.paths.len()),
    ];
    if let Some(ref components) = parsed.components {
        lines.push(format!("  Schemas: {}", components.schemas.len()));
    }
    lines.push(format!("  Root namespace: {}", ir.root_namespace));
    lines.push(format!("  Namespaces: {}", ir.namespaces.len()));
    lines.push(format!("  Services: {}", ir.services().count()));
    lines.push(format!("  Models: {}", ir.model_count()));
    lines.push(format!("  Operations: {}", ir.operation_count()));
    Ok(lines)
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let ir = load_spec(&input, &cfg)?;

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrSpec) -> serde_json::Value {
    let namespaces: Vec<serde_json::Value> = ir
        .namespaces
        .iter()
        .map(|ns| {
            let models: Vec<serde_json::Value> = ns
                .models
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "class": m.class_name,
                        "ref": m.reference,
                        "properties": m.properties.iter().map(|p| &p.name).collect::<Vec<_>>(),
                    })
                })
                .collect();

            let operations: Vec<serde_json::Value> = ns
                .operations
                .iter()
                .map(|op| {
                    serde_json::json!({
                        "id": op.id,
                        "method": op.method.as_str(),
                        "path": op.path.as_str(),
                        "deprecated": op.deprecated,
                    })
                })
                .collect();

            serde_json::json!({
                "key": ns.key.key(),
                "name": ns.display_name,
                "namespace": ns.path.join("\\"),
                "models": models,
                "operations": operations,
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
        },
        "root_namespace": ir.root_namespace,
        "namespaces": namespaces,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT_PATHS: &str = include_str!("../../sdkgen-core/tests/fixtures/root-paths.json");

    fn generated(path: &str, content: &str) -> GeneratedFile {
        GeneratedFile {
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_write_files_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let files = [
            generated("SumUp/Services/Meta.php", "<?php\n"),
            generated("SumUp/SumUp.php", "<?php\n// facade\n"),
        ];

        write_files(dir.path(), &files).unwrap();

        let service = fs::read_to_string(dir.path().join("SumUp/Services/Meta.php")).unwrap();
        assert_eq!(service, "<?php\n");
        let facade = fs::read_to_string(dir.path().join("SumUp/SumUp.php")).unwrap();
        assert_eq!(facade, "<?php\n// facade\n");
    }

    #[test]
    fn test_write_files_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blocked"), "not a directory").unwrap();
        let files = [
            generated("blocked/Models.php", "<?php\n"),
            generated("SumUp/SumUp.php", "<?php\n"),
        ];

        let err = write_files(dir.path(), &files).unwrap_err();
        assert!(err.to_string().contains("1 of 2"));
        assert!(dir.path().join("SumUp/SumUp.php").exists());
    }

    #[test]
    fn test_load_spec_json_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("openapi.json");
        fs::write(&spec_path, ROOT_PATHS).unwrap();

        let ir = load_spec(&spec_path, &SdkgenConfig::default()).unwrap();
        assert_eq!(ir.info.title, "Root API");
        assert_eq!(ir.operation_count(), 2);

        let summary = build_inspect_summary(&ir);
        assert_eq!(summary["root_namespace"], "SumUp");
        let namespaces = summary["namespaces"].as_array().unwrap();
        let meta = namespaces.iter().find(|ns| ns["key"] == "meta").unwrap();
        assert_eq!(meta["name"], "Meta");
        assert_eq!(meta["namespace"], "SumUp\\Meta");
        assert_eq!(meta["operations"][0]["id"], "get_root");
    }

    #[test]
    fn test_validation_uses_configured_root_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("openapi.json");
        fs::write(&spec_path, ROOT_PATHS).unwrap();

        let cfg = SdkgenConfig {
            root_namespace: "Acme\\Sdk".to_string(),
            ..SdkgenConfig::default()
        };
        let lines = validation_report(&spec_path, &cfg).unwrap();
        assert!(lines.contains(&"  Root namespace: Acme\\Sdk".to_string()));
        assert!(lines.contains(&"  Operations: 2".to_string()));

        let invalid = SdkgenConfig {
            root_namespace: "Sum Up".to_string(),
            ..SdkgenConfig::default()
        };
        let err = validation_report(&spec_path, &invalid).unwrap_err();
        assert!(format!("{err:#}").contains("invalid root namespace"));
    }

    #[test]
    fn test_load_spec_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_spec(&dir.path().join("missing.yaml"), &SdkgenConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
