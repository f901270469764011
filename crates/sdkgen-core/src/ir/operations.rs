use heck::ToLowerCamelCase;
use serde::Serialize;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Trace => "trace",
        }
    }
}

/// A normalized, render-ready API operation, created once per declared tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRecord {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub method: HttpMethod,
    pub path: PathTemplate,
    pub path_params: Vec<PathParam>,
    pub has_query: bool,
    pub has_body: bool,
    pub deprecated: bool,
}

impl OperationRecord {
    /// Method name used by renderers. An empty identifier becomes `call`.
    pub fn method_name(&self) -> String {
        let name = self.id.to_lower_camel_case();
        if name.is_empty() {
            "call".to_string()
        } else {
            name
        }
    }
}

/// A path parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathParam {
    /// Name as written in the path template.
    pub original_name: String,
    /// Normalized identifier.
    pub name: String,
    pub description: Option<String>,
}

/// A URL path with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTemplate {
    template: String,
    placeholders: Vec<String>,
}

impl PathTemplate {
    pub fn parse(template: &str) -> Self {
        let mut placeholders = Vec::new();
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else { break };
            placeholders.push(after[..end].to_string());
            rest = &after[end + 1..];
        }
        Self {
            template: template.to_string(),
            placeholders,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Placeholder names in the order they appear.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// printf-style format: each `{name}` becomes `%s`, literal `%` becomes `%%`.
    pub fn printf_format(&self) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            out.push_str(&rest[..start].replace('%', "%%"));
            out.push_str("%s");
            rest = &rest[start + len + 1..];
        }
        out.push_str(&rest.replace('%', "%%"));
        out
    }
}
