use std::collections::HashSet;

use minijinja::{Environment, context};
use sdkgen_core::ir::{IrNamespace, OperationRecord};
use sdkgen_core::transform::name_normalizer::field_name;
use sdkgen_core::{GeneratedFile, GeneratorError};

use super::{SERVICE_TEMPLATE, doc_lines, php_single_quoted, render};

/// Emit `<Root>/Services/<Display>.php` for one tag namespace.
pub fn emit_service(
    env: &Environment<'_>,
    root_namespace: &str,
    ns: &IrNamespace,
) -> Result<GeneratedFile, GeneratorError> {
    // Deduplicate by rendered method name; the first operation wins.
    let mut seen_methods = HashSet::new();
    let operations: Vec<minijinja::Value> = ns
        .operations
        .iter()
        .filter(|op| {
            let name = op.method_name();
            if seen_methods.insert(name.clone()) {
                true
            } else {
                log::warn!(
                    "duplicate service method dropped service={} method={name} operation_id={} path={}",
                    ns.display_name,
                    op.id,
                    op.path.as_str()
                );
                false
            }
        })
        .map(operation_ctx)
        .collect();

    let content = render(
        env,
        SERVICE_TEMPLATE,
        context! {
            root => root_namespace,
            namespace => format!("{root_namespace}\\Services"),
            class_name => ns.display_name.clone(),
            operations => operations,
        },
    )?;

    Ok(GeneratedFile {
        path: format!(
            "{}/Services/{}.php",
            root_namespace.replace('\\', "/"),
            ns.display_name
        ),
        content,
    })
}

fn operation_ctx(op: &OperationRecord) -> minijinja::Value {
    let mut summary_lines = doc_lines(op.summary.as_deref());
    if summary_lines.is_empty() {
        summary_lines = doc_lines(op.description.as_deref());
    }
    if summary_lines.is_empty() {
        summary_lines = vec![format!(
            "Call {} {}.",
            op.method.as_str(),
            op.path.as_str()
        )];
    }

    let param_tags: Vec<String> = op
        .path_params
        .iter()
        .map(|param| {
            let description = doc_lines(param.description.as_deref())
                .into_iter()
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if description.is_empty() {
                format!("@param string ${}", param.name)
            } else {
                format!("@param string ${} {description}", param.name)
            }
        })
        .collect();

    let mut arguments: Vec<String> = op
        .path_params
        .iter()
        .map(|param| format!("${}", param.name))
        .collect();
    if op.has_query {
        arguments.push("$queryParams = []".to_string());
    }
    if op.has_body {
        arguments.push("$body = null".to_string());
    }

    let has_params = !param_tags.is_empty() || op.has_query || op.has_body;

    context! {
        method_name => op.method_name(),
        http_method => op.method.as_str(),
        summary_lines => summary_lines,
        param_tags => param_tags,
        has_params => has_params,
        arguments => arguments.join(", "),
        path_assignment => path_assignment(op),
        has_query => op.has_query,
        has_body => op.has_body,
        deprecated => op.deprecated,
    }
}

/// `$path = ...;` statement. Placeholders are filled through `sprintf` with
/// URL-encoded arguments, in template order.
fn path_assignment(op: &OperationRecord) -> String {
    if op.path_params.is_empty() || op.path.placeholders().is_empty() {
        return format!("$path = '{}';", php_single_quoted(op.path.as_str()));
    }

    let declared: HashSet<&str> = op.path_params.iter().map(|p| p.name.as_str()).collect();
    let args: Vec<String> = op
        .path
        .placeholders()
        .iter()
        .map(|placeholder| {
            let var = field_name(placeholder);
            if !declared.contains(var.as_str()) {
                log::warn!(
                    "path placeholder without a declared parameter placeholder={placeholder} operation_id={}",
                    op.id
                );
            }
            format!("rawurlencode((string) ${var})")
        })
        .collect();

    format!(
        "$path = sprintf('{}', {});",
        php_single_quoted(&op.path.printf_format()),
        args.join(", ")
    )
}
