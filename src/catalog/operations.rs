//! Built-in CRM operations.
//!
//! Registration order here is the order every adapter emits.

use super::{Arguments, CallPlan, Operation, ParamKind, ParameterSpec};
use crate::client::BackendCall;
use crate::error::ValidationError;
use crate::models::{ContactStatus, InteractionType, TimeRange};
use serde_json::{json, Map, Value};

pub const SEARCH_CONTACTS: &str = "search_contacts";
pub const GET_CONTACT: &str = "get_contact";
pub const CREATE_CONTACT: &str = "create_contact";
pub const UPDATE_CONTACT: &str = "update_contact";
pub const LOG_INTERACTION: &str = "log_interaction";
pub const GET_PIPELINE_SUMMARY: &str = "get_pipeline_summary";

const CONTACTS_PATH: &str = "/api/contacts";
const TIMELINE_PATH: &str = "/api/timeline";
const CONTACT_ANALYTICS_PATH: &str = "/api/analytics/contacts";

/// All built-in operations in registration order.
pub fn all() -> Vec<Operation> {
    vec![
        search_contacts(),
        get_contact(),
        create_contact(),
        update_contact(),
        log_interaction(),
        get_pipeline_summary(),
    ]
}

fn contact_path(contact_id: &str) -> String {
    format!("{}/{}", CONTACTS_PATH, urlencoding::encode(contact_id))
}

fn search_contacts() -> Operation {
    Operation::new(
        SEARCH_CONTACTS,
        "Search CRM contacts by name, company, status, tags, or engagement level. \
         Returns contact summaries with IDs for further operations.",
        vec![
            ParameterSpec::optional(
                "query",
                ParamKind::String,
                "Free-text search across name, email, company",
            ),
            ParameterSpec::optional("status", ParamKind::String, "Filter by pipeline status")
                .one_of(ContactStatus::NAMES),
            ParameterSpec::optional("tags", ParamKind::StringArray, "Filter by tags"),
            ParameterSpec::optional(
                "min_engagement",
                ParamKind::Number,
                "Minimum engagement score (0-100)",
            ),
            ParameterSpec::optional("limit", ParamKind::Integer, "Maximum results to return")
                .with_default(json!(20)),
        ],
        build_search_contacts,
    )
}

fn build_search_contacts(args: &Arguments) -> Result<CallPlan, ValidationError> {
    let mut call = BackendCall::get(CONTACTS_PATH);

    if let Some(limit) = args.integer("limit") {
        call = call.query("limit", limit.to_string());
    }
    if let Some(query) = args.non_empty_str("query") {
        call = call.query("query", query);
    }
    if let Some(status) = args.non_empty_str("status") {
        call = call.query("status", status);
    }
    // One comma-joined value, not repeated keys
    if let Some(tags) = args.string_list("tags").filter(|tags| !tags.is_empty()) {
        call = call.query("tags", tags.join(","));
    }
    if let Some(min_engagement) = args.number("min_engagement") {
        call = call.query("min_engagement", min_engagement.to_string());
    }

    Ok(CallPlan::single(call))
}

fn get_contact() -> Operation {
    Operation::new(
        GET_CONTACT,
        "Get full details and recent interaction history for a specific contact. \
         Use after search_contacts to dive deeper into a contact's profile.",
        vec![
            ParameterSpec::required(
                "contact_id",
                ParamKind::String,
                "Contact ID from search results",
            )
            .non_empty(),
            ParameterSpec::optional(
                "include_timeline",
                ParamKind::Boolean,
                "Include recent interactions",
            )
            .with_default(json!(true)),
            ParameterSpec::optional(
                "timeline_limit",
                ParamKind::Integer,
                "Number of timeline entries to include",
            ),
        ],
        build_get_contact,
    )
}

fn build_get_contact(args: &Arguments) -> Result<CallPlan, ValidationError> {
    let path = contact_path(args.require_str("contact_id")?);
    let plan = CallPlan::single(BackendCall::get(path.as_str()));

    if !args.bool("include_timeline").unwrap_or(true) {
        return Ok(plan);
    }

    let mut timeline = BackendCall::get(format!("{}/timeline", path));
    if let Some(limit) = args.integer("timeline_limit") {
        timeline = timeline.query("limit", limit.to_string());
    }
    Ok(plan.merge_under("timeline", timeline))
}

fn create_contact() -> Operation {
    Operation::new(
        CREATE_CONTACT,
        "Add a new contact to the CRM. Use when you learn about a new person the user \
         wants to track. Requires at least first and last name.",
        vec![
            ParameterSpec::required("first_name", ParamKind::String, "Contact's first name"),
            ParameterSpec::required("last_name", ParamKind::String, "Contact's last name"),
            ParameterSpec::optional("email", ParamKind::String, "Email address"),
            ParameterSpec::optional("phone", ParamKind::String, "Phone number"),
            ParameterSpec::optional("company", ParamKind::String, "Company name"),
            ParameterSpec::optional("status", ParamKind::String, "Initial pipeline status")
                .one_of(ContactStatus::NAMES)
                .with_default(json!("lead")),
            ParameterSpec::optional("tags", ParamKind::StringArray, "Tags to categorize"),
            ParameterSpec::optional("notes", ParamKind::String, "Initial notes"),
        ],
        build_create_contact,
    )
}

fn build_create_contact(args: &Arguments) -> Result<CallPlan, ValidationError> {
    let mut body = Map::new();
    body.insert("first_name".into(), json!(args.require_str("first_name")?));
    body.insert("last_name".into(), json!(args.require_str("last_name")?));
    body.insert(
        "status".into(),
        json!(args.str("status").unwrap_or(ContactStatus::Lead.as_str())),
    );

    for field in ["email", "phone", "company", "notes"] {
        if let Some(value) = args.non_empty_str(field) {
            body.insert(field.into(), json!(value));
        }
    }
    if let Some(tags) = args.string_list("tags").filter(|tags| !tags.is_empty()) {
        body.insert("tags".into(), json!(tags));
    }

    Ok(CallPlan::single(BackendCall::post(
        CONTACTS_PATH,
        Value::Object(body),
    )))
}

fn update_contact() -> Operation {
    Operation::new(
        UPDATE_CONTACT,
        "Update a contact's information or status. Use to move contacts through the \
         pipeline or update their details. Only the supplied fields change.",
        vec![
            ParameterSpec::required("contact_id", ParamKind::String, "Contact ID to update")
                .non_empty(),
            ParameterSpec::optional("status", ParamKind::String, "New pipeline status")
                .one_of(ContactStatus::NAMES),
            ParameterSpec::optional(
                "tags",
                ParamKind::StringArray,
                "Replace all existing tags",
            ),
            ParameterSpec::optional("email", ParamKind::String, "New email address"),
            ParameterSpec::optional("phone", ParamKind::String, "New phone number"),
            ParameterSpec::optional("company", ParamKind::String, "New company name"),
        ],
        build_update_contact,
    )
}

fn build_update_contact(args: &Arguments) -> Result<CallPlan, ValidationError> {
    let path = contact_path(args.require_str("contact_id")?);

    let mut body = Map::new();
    for field in ["status", "tags", "email", "phone", "company"] {
        if let Some(value) = args.get(field) {
            body.insert(field.into(), value.clone());
        }
    }

    Ok(CallPlan::single(BackendCall::patch(path, Value::Object(body))))
}

fn log_interaction() -> Operation {
    Operation::new(
        LOG_INTERACTION,
        "Record an interaction with a contact (meeting, call, email, note). \
         Always log interactions to maintain relationship context and history.",
        vec![
            ParameterSpec::required("contact_id", ParamKind::String, "Contact ID")
                .non_empty(),
            ParameterSpec::required("type", ParamKind::String, "Type of interaction")
                .one_of(InteractionType::NAMES),
            ParameterSpec::required(
                "content",
                ParamKind::String,
                "Summary of the interaction",
            ),
            ParameterSpec::optional(
                "metadata",
                ParamKind::Object,
                "Additional data (duration, topics, etc.)",
            ),
        ],
        build_log_interaction,
    )
}

fn build_log_interaction(args: &Arguments) -> Result<CallPlan, ValidationError> {
    let mut body = Map::new();
    body.insert("contact".into(), json!(args.require_str("contact_id")?));
    body.insert("type".into(), json!(args.require_str("type")?));
    body.insert("content".into(), json!(args.require_str("content")?));
    if let Some(metadata) = args.object("metadata").filter(|m| !m.is_empty()) {
        body.insert("metadata".into(), Value::Object(metadata.clone()));
    }

    Ok(CallPlan::single(BackendCall::post(
        TIMELINE_PATH,
        Value::Object(body),
    )))
}

fn get_pipeline_summary() -> Operation {
    Operation::new(
        GET_PIPELINE_SUMMARY,
        "Get current pipeline status: how many contacts in each stage, conversion rates, \
         and engagement trends.",
        vec![ParameterSpec::optional(
            "time_range",
            ParamKind::String,
            "Time range for trend data",
        )
        .one_of(TimeRange::NAMES)
        .with_default(json!("30d"))],
        build_get_pipeline_summary,
    )
}

fn build_get_pipeline_summary(args: &Arguments) -> Result<CallPlan, ValidationError> {
    let time_range = args.str("time_range").unwrap_or(TimeRange::Month.as_str());
    Ok(CallPlan::single(
        BackendCall::get(CONTACT_ANALYTICS_PATH).query("time_range", time_range),
    ))
}
