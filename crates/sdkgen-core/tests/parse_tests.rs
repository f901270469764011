use sdkgen_core::parse;
use sdkgen_core::parse::extension::{self, CODEGEN_EXTENSION, CodegenHints};
use sdkgen_core::parse::parameter::ParameterOrRef;
use sdkgen_core::parse::request_body::RequestBodyOrRef;
use sdkgen_core::parse::response::ResponseOrRef;
use sdkgen_core::parse::schema::SchemaOrRef;

const PAYMENTS: &str = include_str!("fixtures/payments.yaml");
const ROOT_PATHS: &str = include_str!("fixtures/root-paths.json");

#[test]
fn parse_payments_yaml() {
    let spec = parse::from_yaml(PAYMENTS).expect("should parse payments.yaml");
    assert_eq!(spec.openapi, "3.0.3");
    assert_eq!(spec.info.title, "Payments API");
    assert_eq!(spec.paths.len(), 4);
    assert_eq!(spec.tags.len(), 2);

    let charges = spec
        .paths
        .get("/merchants/{id}/charges")
        .expect("should have /merchants/{id}/charges");
    assert!(matches!(
        charges.parameters.first(),
        Some(ParameterOrRef::Ref { .. })
    ));

    let post = charges.post.as_ref().expect("should have POST");
    assert!(matches!(
        post.request_body,
        Some(RequestBodyOrRef::Ref { .. })
    ));
    assert!(matches!(
        post.responses.get("201"),
        Some(ResponseOrRef::Ref { .. })
    ));

    let methods: Vec<&str> = charges
        .operations()
        .map(|(method, _)| method.as_str())
        .collect();
    assert_eq!(methods, ["GET", "POST"]);
}

#[test]
fn parse_vendor_extension() {
    let spec = parse::from_yaml(PAYMENTS).unwrap();
    let get = spec.paths["/merchants/{id}/charges/{chargeId}"]
        .get
        .as_ref()
        .unwrap();
    let hints: CodegenHints = extension::get(&get.extensions, CODEGEN_EXTENSION).unwrap();
    assert_eq!(hints.method_name.as_deref(), Some("fetchCharge"));
}

#[test]
fn parse_schema_components() {
    let spec = parse::from_yaml(PAYMENTS).unwrap();
    let schemas = &spec.components.as_ref().unwrap().schemas;
    let charge = match &schemas["Charge"] {
        SchemaOrRef::Schema(schema) => schema,
        SchemaOrRef::Ref { .. } => panic!("Charge should be inline"),
    };
    let keys: Vec<&str> = charge.properties.keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "amount", "status", "metadata", "tags"]);
    assert_eq!(charge.required, ["id", "amount"]);
    assert_eq!(charge.enum_values.len(), 0);
}

#[test]
fn operations_follow_document_order() {
    let spec = parse::from_yaml(PAYMENTS).unwrap();
    let entries: Vec<(&str, &str)> = spec
        .operations()
        .map(|entry| (entry.method.as_str(), entry.path))
        .collect();
    assert_eq!(
        entries,
        [
            ("GET", "/merchants/{id}/charges"),
            ("POST", "/merchants/{id}/charges"),
            ("GET", "/merchants/{id}/charges/{chargeId}"),
            ("GET", "/payouts"),
            ("GET", "/ping"),
        ]
    );
}

#[test]
fn parse_json_document() {
    let spec = parse::from_json(ROOT_PATHS).expect("should parse root-paths.json");
    assert_eq!(spec.info.version, "0.1");
    assert!(spec.paths.contains_key("/"));
    assert!(spec.components.is_none());
}

#[test]
fn reject_swagger_2() {
    let err = parse::from_yaml("openapi: 2.0.0\ninfo: {title: t, version: '1'}\n").unwrap_err();
    assert!(err.to_string().contains("unsupported OpenAPI version"));
}

#[test]
fn reject_malformed_yaml() {
    assert!(parse::from_yaml("openapi: [3.0").is_err());
}
