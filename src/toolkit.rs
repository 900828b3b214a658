//! The toolkit facade.
//!
//! `Toolkit` composes configuration, the HTTP client, the catalog and the
//! dispatcher. Agents use the schema outputs together with `run` (or the
//! string-returning `handle_*` helpers); programmatic callers use the typed
//! methods, which return errors instead of result envelopes.

use crate::adapters::{
    framework_tools, function_calling_schemas, tool_use_schemas, AdapterKind, FrameworkTool,
    FunctionSchema, Integrations, SchemaOptions, ToolUseSchema,
};
use crate::catalog::operations::{
    CREATE_CONTACT, GET_CONTACT, GET_PIPELINE_SUMMARY, LOG_INTERACTION, SEARCH_CONTACTS,
    UPDATE_CONTACT,
};
use crate::catalog::Catalog;
use crate::client::{Backend, CrmClient};
use crate::config::Config;
use crate::dispatcher::{Dispatcher, ToolResult};
use crate::error::{ToolkitError, ToolkitResult};
use crate::metrics::Metrics;
use crate::models::{ContactUpdate, Interaction, NewContact, SearchContactsParams, TimeRange};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Entry point for every caller.
///
/// Cloning is cheap; clones share the catalog, the metrics and the client's
/// connection pool, which is released when the last clone is dropped.
#[derive(Clone)]
pub struct Toolkit {
    config: Arc<Config>,
    dispatcher: Dispatcher,
    integrations: Integrations,
}

impl Toolkit {
    /// Build a toolkit talking to the configured CRM API.
    pub fn new(config: Config) -> ToolkitResult<Self> {
        config.validate()?;

        let metrics = Metrics::new();
        let client = CrmClient::with_metrics(&config, metrics.clone());
        Self::assemble(config, Arc::new(client), metrics)
    }

    /// Build a toolkit from environment variables.
    pub fn from_env() -> ToolkitResult<Self> {
        Self::new(Config::from_env()?)
    }

    /// Build a toolkit over an arbitrary backend.
    pub fn with_backend(config: Config, backend: Arc<dyn Backend>) -> ToolkitResult<Self> {
        config.validate()?;
        Self::assemble(config, backend, Metrics::new())
    }

    /// Override the detected integrations.
    pub fn with_integrations(mut self, integrations: Integrations) -> Self {
        self.integrations = integrations;
        self
    }

    fn assemble(config: Config, backend: Arc<dyn Backend>, metrics: Metrics) -> ToolkitResult<Self> {
        let catalog = Arc::new(Catalog::standard()?);
        let integrations = Integrations::detect();

        tracing::info!(
            base_url = %config.crm_api_url,
            operations = catalog.len(),
            mcp = integrations.mcp,
            "Toolkit ready"
        );

        Ok(Self {
            config: Arc::new(config),
            dispatcher: Dispatcher::new(catalog, backend).with_metrics(metrics),
            integrations,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        self.dispatcher.catalog()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn metrics(&self) -> &Metrics {
        self.dispatcher.metrics()
    }

    pub fn integrations(&self) -> Integrations {
        self.integrations
    }

    // ----- agent entry points -----

    /// Execute an operation by name. Never fails.
    pub fn run(&self, name: &str, arguments: &Value) -> ToolResult {
        self.dispatcher.execute(name, arguments)
    }

    /// Result text for a function-calling loop.
    pub fn handle_function_call(&self, name: &str, arguments: &Value) -> String {
        self.run(name, arguments).to_agent_string()
    }

    /// Result text for a tool-use loop.
    pub fn handle_tool_use(&self, name: &str, input: &Value) -> String {
        self.handle_function_call(name, input)
    }

    // ----- schemas -----

    pub fn function_calling_schemas(&self) -> Vec<FunctionSchema> {
        function_calling_schemas(self.catalog(), SchemaOptions::default())
    }

    pub fn tool_use_schemas(&self) -> Vec<ToolUseSchema> {
        tool_use_schemas(self.catalog())
    }

    /// Bindable tool objects. Requires the framework integration.
    pub fn framework_tools(&self) -> ToolkitResult<Vec<FrameworkTool>> {
        self.require(AdapterKind::Mcp)?;
        Ok(framework_tools(&self.dispatcher))
    }

    /// Schema list for any adapter as plain JSON.
    pub fn schemas(&self, kind: AdapterKind) -> ToolkitResult<Vec<Value>> {
        self.require(kind)?;

        match kind {
            AdapterKind::FunctionCalling => to_values(&self.function_calling_schemas()),
            AdapterKind::ToolUse => to_values(&self.tool_use_schemas()),
            AdapterKind::Mcp => self.mcp_schemas(),
        }
    }

    #[cfg(feature = "mcp")]
    fn mcp_schemas(&self) -> ToolkitResult<Vec<Value>> {
        let tools: Vec<_> = self
            .framework_tools()?
            .iter()
            .map(FrameworkTool::to_mcp_tool)
            .collect();
        to_values(&tools)
    }

    #[cfg(not(feature = "mcp"))]
    fn mcp_schemas(&self) -> ToolkitResult<Vec<Value>> {
        Err(ToolkitError::IntegrationUnavailable(
            AdapterKind::Mcp.to_string(),
        ))
    }

    fn require(&self, kind: AdapterKind) -> ToolkitResult<()> {
        if self.integrations.is_available(kind) {
            Ok(())
        } else {
            Err(ToolkitError::IntegrationUnavailable(kind.to_string()))
        }
    }

    // ----- typed methods -----

    pub fn search_contacts(&self, params: &SearchContactsParams) -> ToolkitResult<Value> {
        self.dispatcher.dispatch(SEARCH_CONTACTS, &to_arguments(params)?)
    }

    /// Fetch a contact, optionally with its most recent `timeline_limit`
    /// timeline entries merged under `timeline`.
    pub fn get_contact(
        &self,
        contact_id: &str,
        include_timeline: bool,
        timeline_limit: Option<u32>,
    ) -> ToolkitResult<Value> {
        let mut arguments = json!({
            "contact_id": contact_id,
            "include_timeline": include_timeline,
        });
        if let (Some(limit), Value::Object(map)) = (timeline_limit, &mut arguments) {
            map.insert("timeline_limit".to_string(), json!(limit));
        }
        self.dispatcher.dispatch(GET_CONTACT, &arguments)
    }

    pub fn create_contact(&self, contact: &NewContact) -> ToolkitResult<Value> {
        self.dispatcher.dispatch(CREATE_CONTACT, &to_arguments(contact)?)
    }

    pub fn update_contact(&self, contact_id: &str, update: &ContactUpdate) -> ToolkitResult<Value> {
        let mut arguments = to_arguments(update)?;
        if let Value::Object(map) = &mut arguments {
            map.insert("contact_id".to_string(), json!(contact_id));
        }
        self.dispatcher.dispatch(UPDATE_CONTACT, &arguments)
    }

    pub fn log_interaction(&self, interaction: &Interaction) -> ToolkitResult<Value> {
        self.dispatcher
            .dispatch(LOG_INTERACTION, &to_arguments(interaction)?)
    }

    pub fn get_pipeline_summary(&self, time_range: TimeRange) -> ToolkitResult<Value> {
        let arguments = json!({"time_range": time_range.as_str()});
        self.dispatcher.dispatch(GET_PIPELINE_SUMMARY, &arguments)
    }
}

fn to_arguments<T: Serialize>(value: &T) -> ToolkitResult<Value> {
    Ok(serde_json::to_value(value)?)
}

fn to_values<T: Serialize>(items: &[T]) -> ToolkitResult<Vec<Value>> {
    items.iter().map(to_arguments).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BackendCall;
    use crate::error::CrmApiResult;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoBackend {
        calls: Mutex<Vec<BackendCall>>,
    }

    impl Backend for EchoBackend {
        fn execute(&self, call: &BackendCall) -> CrmApiResult<Value> {
            self.calls.lock().unwrap().push(call.clone());
            Ok(json!({"path": call.path}))
        }
    }

    fn toolkit() -> (Toolkit, Arc<EchoBackend>) {
        let backend = Arc::new(EchoBackend::default());
        let toolkit = Toolkit::with_backend(Config::default(), backend.clone()).unwrap();
        (toolkit, backend)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = Config::new("ftp://crm.local");
        let err = Toolkit::new(config).err().unwrap();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn test_missing_integration() {
        let (toolkit, _) = toolkit();
        let toolkit = toolkit.with_integrations(Integrations { mcp: false });

        let err = toolkit.schemas(AdapterKind::Mcp).unwrap_err();
        assert_eq!(err.kind(), "IntegrationUnavailable");
        assert!(toolkit.framework_tools().is_err());
        assert_eq!(toolkit.schemas(AdapterKind::ToolUse).unwrap().len(), 6);
    }

    #[test]
    fn test_update_contact_inserts_id() {
        let (toolkit, backend) = toolkit();
        let update = ContactUpdate {
            company: Some("Analytical Engines".to_string()),
            ..Default::default()
        };

        toolkit.update_contact("c-42", &update).unwrap();

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls[0].path, "/api/contacts/c-42");
        assert_eq!(calls[0].body, Some(json!({"company": "Analytical Engines"})));
    }

    #[test]
    fn test_get_contact_passes_timeline_limit() {
        let (toolkit, backend) = toolkit();

        toolkit.get_contact("c-7", true, Some(3)).unwrap();
        toolkit.get_contact("c-7", true, None).unwrap();

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[1].path, "/api/contacts/c-7/timeline");
        assert_eq!(calls[1].query_value("limit"), Some("3"));
        assert_eq!(calls[3].query_value("limit"), None);
    }

    #[test]
    fn test_handle_tool_use_unknown() {
        let (toolkit, backend) = toolkit();
        let text = toolkit.handle_tool_use("delete_everything", &json!({}));
        let parsed: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed["error"], "delete_everything");
        assert_eq!(parsed["kind"], "UnknownOperation");
        assert!(backend.calls.lock().unwrap().is_empty());
    }
}
