pub mod facade;
pub mod models;
pub mod services;

use minijinja::Environment;
use sdkgen_core::GeneratorError;

pub const MODELS_TEMPLATE: &str = "models.php.j2";
pub const SERVICE_TEMPLATE: &str = "service.php.j2";
pub const FACADE_TEMPLATE: &str = "facade.php.j2";

/// Escape `*/` sequences that would prematurely close PHP doc blocks.
fn escape_doc(value: String) -> String {
    value.replace("*/", "*\\/")
}

/// Template environment with every PHP template loaded.
pub fn environment() -> Result<Environment<'static>, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_filter("escape_doc", escape_doc);
    for (name, source) in [
        (MODELS_TEMPLATE, include_str!("../../templates/models.php.j2")),
        (SERVICE_TEMPLATE, include_str!("../../templates/service.php.j2")),
        (FACADE_TEMPLATE, include_str!("../../templates/facade.php.j2")),
    ] {
        env.add_template(name, source)
            .map_err(|err| render_error(name, err))?;
    }
    Ok(env)
}

pub(crate) fn render(
    env: &Environment<'_>,
    name: &str,
    ctx: minijinja::Value,
) -> Result<String, GeneratorError> {
    env.get_template(name)
        .and_then(|tmpl| tmpl.render(ctx))
        .map_err(|err| render_error(name, err))
}

fn render_error(name: &str, err: minijinja::Error) -> GeneratorError {
    GeneratorError::Render {
        template: name.to_string(),
        message: err.to_string(),
    }
}

/// Split free text into trimmed doc lines, dropping leading and trailing
/// blank lines.
pub(crate) fn doc_lines(text: Option<&str>) -> Vec<String> {
    let lines: Vec<&str> = text.unwrap_or_default().lines().map(str::trim).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    lines[start..end].iter().map(|l| l.to_string()).collect()
}

/// Quote `value` as a single-quoted PHP string body.
pub(crate) fn php_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_loads_templates() {
        let env = environment().unwrap();
        assert!(env.get_template(MODELS_TEMPLATE).is_ok());
        assert!(env.get_template(SERVICE_TEMPLATE).is_ok());
        assert!(env.get_template(FACADE_TEMPLATE).is_ok());
    }

    #[test]
    fn test_escape_doc() {
        assert_eq!(escape_doc("a */ b".to_string()), "a *\\/ b");
    }

    #[test]
    fn test_doc_lines() {
        assert_eq!(
            doc_lines(Some("\n  First line.  \n\n  Second.\n\n")),
            ["First line.", "", "Second."]
        );
        assert!(doc_lines(Some("   \n ")).is_empty());
        assert!(doc_lines(None).is_empty());
    }

    #[test]
    fn test_php_single_quoted() {
        assert_eq!(php_single_quoted("/it's/{id}"), "/it\\'s/{id}");
        assert_eq!(php_single_quoted("a\\b"), "a\\\\b");
    }
}
