use sdkgen_core::ir::{IrSpec, NamespaceKey, ResolvedType};

/// A PHP type as declared on a property, paired with its `@var` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpType {
    pub declared: String,
    pub doc: String,
}

impl PhpType {
    fn same(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            declared: name.clone(),
            doc: name,
        }
    }

    /// Declared type for a property that may be absent. `mixed` already
    /// admits null and cannot be prefixed.
    pub fn nullable_declared(&self) -> String {
        if self.declared == "mixed" || self.declared.starts_with('?') {
            self.declared.clone()
        } else {
            format!("?{}", self.declared)
        }
    }

    /// `@var` type for a property that may be absent.
    pub fn nullable_doc(&self) -> String {
        if self.doc.split('|').any(|part| part == "null") {
            self.doc.clone()
        } else {
            format!("{}|null", self.doc)
        }
    }
}

/// Map a resolved type to PHP. Classes in other namespaces are fully
/// qualified through the namespace paths of `ir`.
pub fn php_type(resolved: &ResolvedType, ir: &IrSpec) -> PhpType {
    match resolved {
        ResolvedType::Class { name, namespace } => {
            PhpType::same(qualified_class_name(name, namespace.as_ref(), ir))
        }
        ResolvedType::String => PhpType::same("string"),
        ResolvedType::Integer => PhpType::same("int"),
        ResolvedType::Number => PhpType::same("float"),
        ResolvedType::Boolean => PhpType::same("bool"),
        ResolvedType::List { item } => PhpType {
            declared: "array".to_string(),
            doc: format!("{}[]", php_type(item, ir).doc),
        },
        ResolvedType::Map => PhpType::same("array"),
        ResolvedType::Union | ResolvedType::Any => PhpType::same("mixed"),
    }
}

fn qualified_class_name(name: &str, namespace: Option<&NamespaceKey>, ir: &IrSpec) -> String {
    let Some(key) = namespace else {
        return name.to_string();
    };
    match ir.namespace_path(key) {
        Some(path) => format!("\\{}\\{name}", path.join("\\")),
        None => {
            log::debug!("no namespace path for class name={name} namespace={key}");
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdkgen_core::ir::{IrInfo, IrNamespace, NamespacePath};

    fn ir() -> IrSpec {
        IrSpec {
            info: IrInfo {
                title: "t".to_string(),
                description: None,
                version: "1".to_string(),
            },
            root_namespace: "SumUp".to_string(),
            namespaces: vec![IrNamespace {
                key: NamespaceKey::Shared,
                display_name: "Shared".to_string(),
                path: NamespacePath::new(vec!["SumUp".to_string(), "Shared".to_string()]),
                models: vec![],
                operations: vec![],
            }],
        }
    }

    #[test]
    fn test_scalars() {
        let ir = ir();
        assert_eq!(php_type(&ResolvedType::String, &ir).declared, "string");
        assert_eq!(php_type(&ResolvedType::Integer, &ir).declared, "int");
        assert_eq!(php_type(&ResolvedType::Number, &ir).declared, "float");
        assert_eq!(php_type(&ResolvedType::Boolean, &ir).declared, "bool");
        assert_eq!(php_type(&ResolvedType::Map, &ir), PhpType::same("array"));
        assert_eq!(php_type(&ResolvedType::Union, &ir), PhpType::same("mixed"));
        assert_eq!(php_type(&ResolvedType::Any, &ir), PhpType::same("mixed"));
    }

    #[test]
    fn test_nested_list_doc() {
        let ir = ir();
        let nested = ResolvedType::List {
            item: Box::new(ResolvedType::List {
                item: Box::new(ResolvedType::String),
            }),
        };
        let mapped = php_type(&nested, &ir);
        assert_eq!(mapped.declared, "array");
        assert_eq!(mapped.doc, "string[][]");

        let untyped = ResolvedType::List {
            item: Box::new(ResolvedType::Any),
        };
        assert_eq!(php_type(&untyped, &ir).doc, "mixed[]");
    }

    #[test]
    fn test_class_qualification() {
        let ir = ir();
        let local = ResolvedType::Class {
            name: "Charge".to_string(),
            namespace: None,
        };
        assert_eq!(php_type(&local, &ir), PhpType::same("Charge"));

        let shared = ResolvedType::Class {
            name: "Amount".to_string(),
            namespace: Some(NamespaceKey::Shared),
        };
        assert_eq!(
            php_type(&shared, &ir),
            PhpType::same("\\SumUp\\Shared\\Amount")
        );

        let list = ResolvedType::List {
            item: Box::new(shared),
        };
        assert_eq!(php_type(&list, &ir).doc, "\\SumUp\\Shared\\Amount[]");
    }

    #[test]
    fn test_nullable_forms() {
        let string = PhpType::same("string");
        assert_eq!(string.nullable_declared(), "?string");
        assert_eq!(string.nullable_doc(), "string|null");

        let mixed = PhpType::same("mixed");
        assert_eq!(mixed.nullable_declared(), "mixed");
        assert_eq!(mixed.nullable_doc(), "mixed|null");
    }
}
