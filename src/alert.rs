//! Alert configuration model and the classification of service responses.
//!
//! The service answers with `{"status": ..., "alert_config": {"type": ..., "params": {...}}}`.
//! Only three `type` values are understood; anything else is kept as raw JSON
//! so it can still be shown to the user.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Fixed `user_id` sent with every request.
pub const USER_ID: &str = "streamlit_user";

/// Body of the POST to the inference service.
#[derive(Debug, Serialize)]
pub struct AlertRequest<'a> {
    pub user_id: &'a str,
    pub message: &'a str,
    pub camera_id: Option<&'a str>,
}

impl<'a> AlertRequest<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            user_id: USER_ID,
            message,
            camera_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Comparison {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = ">")]
    Greater,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "==",
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectCountParams {
    pub class_name: String,
    pub comparison: Comparison,
    pub count_value: Number,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimerParams {
    pub duration: Number,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZoneParams {
    pub target_object: String,
    /// Zone identifiers and anything else; never rendered.
    #[serde(flatten)]
    pub zone: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlertConfig {
    ObjectCount(ObjectCountParams),
    Timer(TimerParams),
    Zone(ZoneParams),
    Unknown(Value),
}

impl AlertConfig {
    /// Never fails: unrecognised types and known types with params of the
    /// wrong shape both become `Unknown`.
    pub fn from_value(value: &Value) -> Self {
        let kind = value.get("type").and_then(Value::as_str);
        let params = value.get("params").cloned().unwrap_or(Value::Null);

        let parsed = match kind {
            Some("ObjectCountAlert") => serde_json::from_value(params).map(Self::ObjectCount),
            Some("TimerAlert") => serde_json::from_value(params).map(Self::Timer),
            Some("ZoneAlert") => serde_json::from_value(params).map(Self::Zone),
            _ => return Self::Unknown(value.clone()),
        };

        parsed.unwrap_or_else(|e| {
            tracing::warn!(alert_type = kind, error = %e, "alert params do not match their type");
            Self::Unknown(value.clone())
        })
    }

    pub fn explanation(&self) -> Option<String> {
        match self {
            Self::ObjectCount(p) => Some(format!(
                "This alert will trigger when the count of '{}' is {} {}",
                p.class_name, p.comparison, p.count_value
            )),
            Self::Timer(p) => Some(format!(
                "This alert will trigger after {} seconds",
                p.duration
            )),
            Self::Zone(p) => Some(format!(
                "This alert will trigger when a {} is detected in the specified zone",
                p.target_object
            )),
            Self::Unknown(_) => None,
        }
    }
}

/// What a parsed response body amounts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Generated { config: Value, alert: AlertConfig },
    NotSuccess { status: Option<String> },
}

pub fn present(body: &Value) -> Presentation {
    let status = body.get("status");
    if status.and_then(Value::as_str) == Some("success") {
        if let Some(config) = body.get("alert_config").filter(|c| c.is_object()) {
            return Presentation::Generated {
                config: config.clone(),
                alert: AlertConfig::from_value(config),
            };
        }
    }
    Presentation::NotSuccess {
        status: status.map(|s| match s {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
    }
}
