//! CRM LLM Tools - contact-relationship tools for large-language-model agents.
//!
//! One catalog of CRM operations is exposed under three tool-calling
//! conventions and executed through a single dispatcher and HTTP client.
//!
//! # Architecture
//!
//! - **catalog**: Operation definitions, parameter specs and call plans
//! - **adapters**: Function-calling, tool-use and framework-tool translators
//! - **dispatcher**: Validation, execution and the `ToolResult` envelope
//! - **toolkit**: The facade callers use
//! - **client**: Blocking HTTP client for the CRM API
//! - **models**: Typed inputs for the direct methods
//! - **error**: Error types with stable kinds
//! - **config**: Configuration from code or environment variables
//! - **metrics**: Request and dispatch counters
//! - **server**: MCP server over stdio (`mcp` feature)
//!
//! # Example
//!
//! ```no_run
//! use crm_llm_tools::{Config, Toolkit};
//! use serde_json::json;
//!
//! let toolkit = Toolkit::new(Config::new("http://localhost:8080"))?;
//! let result = toolkit.run("search_contacts", &json!({"status": "investor"}));
//! println!("{}", result.to_agent_string());
//! # Ok::<(), crm_llm_tools::ToolkitError>(())
//! ```

pub mod adapters;
pub mod catalog;
pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod models;
#[cfg(feature = "mcp")]
pub mod server;
pub mod toolkit;

pub use adapters::{
    AdapterKind, FrameworkTool, FunctionSchema, InputModel, Integrations, SchemaOptions,
    ToolFailure, ToolUseSchema,
};
pub use catalog::{Catalog, Operation, ParamKind, ParameterSpec};
pub use client::{Backend, BackendCall, CrmClient, Method};
pub use config::Config;
pub use dispatcher::{Dispatcher, ToolError, ToolResult};
pub use error::{CatalogError, ConfigError, CrmApiError, ToolkitError, ValidationError};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{
    ContactStatus, ContactUpdate, Interaction, InteractionType, NewContact, SearchContactsParams,
    TimeRange,
};
#[cfg(feature = "mcp")]
pub use server::CrmMcpServer;
pub use toolkit::Toolkit;
