//! Schema adapter properties across all calling conventions.

use crm_llm_tools::adapters::{function_calling_schemas, tool_use_schemas};
use crm_llm_tools::{AdapterKind, Catalog, Config, SchemaOptions, Toolkit};
use serde_json::json;

const EXPECTED_ORDER: [&str; 6] = [
    "search_contacts",
    "get_contact",
    "create_contact",
    "update_contact",
    "log_interaction",
    "get_pipeline_summary",
];

fn toolkit() -> Toolkit {
    Toolkit::new(Config::default()).unwrap()
}

#[test]
fn test_same_name_order_everywhere() {
    let toolkit = toolkit();

    let functions: Vec<_> = toolkit
        .function_calling_schemas()
        .into_iter()
        .map(|s| s.name)
        .collect();
    let tools: Vec<_> = toolkit
        .tool_use_schemas()
        .into_iter()
        .map(|s| s.name)
        .collect();
    let catalog: Vec<_> = toolkit.catalog().names();

    assert_eq!(functions, EXPECTED_ORDER);
    assert_eq!(tools, EXPECTED_ORDER);
    assert_eq!(catalog, EXPECTED_ORDER);

    #[cfg(feature = "mcp")]
    {
        let framework: Vec<_> = toolkit
            .framework_tools()
            .unwrap()
            .iter()
            .map(|t| t.name())
            .collect();
        assert_eq!(framework, EXPECTED_ORDER);
    }
}

#[test]
fn test_required_lists_survive_translation() {
    let catalog = Catalog::standard().unwrap();
    let functions = function_calling_schemas(&catalog, SchemaOptions::default());
    let tools = tool_use_schemas(&catalog);

    for ((operation, function), tool) in catalog.operations().iter().zip(&functions).zip(&tools) {
        let expected = json!(operation.required());
        assert_eq!(function.parameters["required"], expected, "{}", operation.name);
        assert_eq!(tool.input_schema["required"], expected, "{}", operation.name);
    }

    let update = &functions[3];
    assert_eq!(update.parameters["required"], json!(["contact_id"]));
    let log = &tools[4];
    assert_eq!(
        log.input_schema["required"],
        json!(["contact_id", "type", "content"])
    );
}

#[test]
fn test_enums_survive_translation() {
    let toolkit = toolkit();
    let statuses = json!(["lead", "customer", "partner", "investor"]);

    for schema in toolkit.function_calling_schemas() {
        if let Some(status) = schema.parameters["properties"].get("status") {
            assert_eq!(status["enum"], statuses, "{}", schema.name);
        }
    }

    let summary = toolkit
        .tool_use_schemas()
        .into_iter()
        .find(|s| s.name == "get_pipeline_summary")
        .unwrap();
    assert_eq!(
        summary.input_schema["properties"]["time_range"]["enum"],
        json!(["7d", "30d", "90d", "all"])
    );
}

#[test]
fn test_adapters_are_deterministic() {
    let toolkit = toolkit();

    for kind in toolkit.integrations().available() {
        let first = serde_json::to_string(&toolkit.schemas(kind).unwrap()).unwrap();
        let second = serde_json::to_string(&toolkit.schemas(kind).unwrap()).unwrap();
        assert_eq!(first, second, "{} output changed between calls", kind);
    }
}

#[test]
fn test_adapter_output_shapes() {
    let toolkit = toolkit();

    let functions = toolkit.schemas(AdapterKind::FunctionCalling).unwrap();
    let tools = toolkit.schemas(AdapterKind::ToolUse).unwrap();

    for (function, tool) in functions.iter().zip(&tools) {
        assert!(function["parameters"].is_object());
        assert!(function.get("input_schema").is_none());
        assert!(tool["input_schema"].is_object());
        assert!(tool.get("parameters").is_none());
        assert_eq!(function["parameters"], tool["input_schema"]);
    }
}

#[cfg(feature = "mcp")]
#[test]
fn test_mcp_schema_shape() {
    let toolkit = toolkit();
    let tools = toolkit.schemas(AdapterKind::Mcp).unwrap();

    assert_eq!(tools.len(), 6);
    let get_contact: &serde_json::Value = &tools[1];
    assert_eq!(get_contact["name"], "get_contact");
    assert_eq!(get_contact["inputSchema"]["required"], json!(["contact_id"]));
}

#[cfg(not(feature = "mcp"))]
#[test]
fn test_mcp_unavailable_without_feature() {
    let toolkit = toolkit();
    let err = toolkit.schemas(AdapterKind::Mcp).unwrap_err();
    assert_eq!(err.kind(), "IntegrationUnavailable");
}
