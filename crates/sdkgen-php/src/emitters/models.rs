use minijinja::{Environment, context};
use sdkgen_core::ir::{IrModel, IrNamespace, IrSpec, PropertyRecord};
use sdkgen_core::{GeneratedFile, GeneratorError};

use super::{MODELS_TEMPLATE, doc_lines, render};
use crate::type_mapper::php_type;

/// Emit `<Root>/<Display>/<Display>.php` holding every model class of one
/// namespace. Returns `None` for a namespace without models.
pub fn emit_models(
    env: &Environment<'_>,
    ir: &IrSpec,
    ns: &IrNamespace,
) -> Result<Option<GeneratedFile>, GeneratorError> {
    if ns.models.is_empty() {
        return Ok(None);
    }

    let models: Vec<minijinja::Value> = ns.models.iter().map(|m| model_ctx(ir, m)).collect();
    let content = render(
        env,
        MODELS_TEMPLATE,
        context! {
            namespace => ns.path.join("\\"),
            models => models,
        },
    )?;

    log::debug!(
        "rendered models namespace={} classes={}",
        ns.display_name,
        ns.models.len()
    );

    Ok(Some(GeneratedFile {
        path: format!("{}/{}.php", ns.path.join("/"), ns.display_name),
        content,
    }))
}

fn model_ctx(ir: &IrSpec, model: &IrModel) -> minijinja::Value {
    let properties: Vec<minijinja::Value> = model
        .properties
        .iter()
        .map(|p| property_ctx(ir, p))
        .collect();

    context! {
        class_name => model.class_name.clone(),
        description_lines => doc_lines(model.description.as_deref()),
        properties => properties,
    }
}

fn property_ctx(ir: &IrSpec, prop: &PropertyRecord) -> minijinja::Value {
    let mapped = php_type(&prop.resolved, ir);
    let (declared_type, doc_type) = if prop.optional {
        (mapped.nullable_declared(), mapped.nullable_doc())
    } else {
        (mapped.declared, mapped.doc)
    };

    let description_lines: Vec<String> = doc_lines(prop.description.as_deref())
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect();

    context! {
        name => prop.name.clone(),
        declared_type => declared_type,
        doc_type => doc_type,
        optional => prop.optional,
        description_lines => description_lines,
    }
}
