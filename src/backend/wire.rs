//! JSON bodies exchanged with the chat backend and their decoding into
//! domain values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    domain::{
        message::{ChatMessage, ChatRole},
        profile::ProfileRecord,
        session::Credential,
    },
    usecases::{auth::LoginGrant, contracts::ApiError},
};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// A failure body that is not JSON at all is unreadable, not a rejection.
    fn rejection(&self) -> ApiError {
        if serde_json::from_str::<Value>(&self.body).is_err() {
            return ApiError::InvalidData;
        }
        ApiError::Rejected {
            status: self.status,
            detail: extract_detail(&self.body),
        }
    }
}

#[derive(Serialize)]
pub struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterBody<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct ChatBody<'a> {
    pub message: &'a str,
}

#[derive(Deserialize)]
struct LoginReply {
    access_token: String,
    #[serde(default)]
    user: Option<Value>,
}

#[derive(Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Deserialize)]
struct HistoryReply {
    history: Vec<WireMessage>,
}

#[derive(Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

/// `detail` from an error body. Strings are taken as-is, any other JSON
/// value is rendered compactly. Non-JSON bodies carry no detail.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// `username` is the name that was submitted; it stands in for the
/// identity when the reply omits `user`.
pub fn decode_login(response: &RawResponse, username: &str) -> Result<LoginGrant, ApiError> {
    if !response.is_success() {
        return Err(response.rejection());
    }

    let reply: LoginReply = parse(&response.body)?;
    let credential = Credential::parse(&reply.access_token).ok_or(ApiError::InvalidData)?;
    let identity = match reply.user {
        Some(Value::Object(user)) => profile_from_object(&user),
        _ => ProfileRecord {
            username: username.to_owned(),
            ..ProfileRecord::default()
        },
    };

    Ok(LoginGrant {
        credential,
        identity,
    })
}

pub fn decode_register(response: &RawResponse) -> Result<(), ApiError> {
    if !response.is_success() {
        return Err(response.rejection());
    }
    Ok(())
}

pub fn decode_chat(response: &RawResponse) -> Result<String, ApiError> {
    if !response.is_success() {
        return Err(response.rejection());
    }

    let reply: ChatReply = parse(&response.body)?;
    Ok(reply.response)
}

pub fn decode_history(response: &RawResponse) -> Result<Vec<ChatMessage>, ApiError> {
    if !response.is_success() {
        return Err(response.rejection());
    }

    let reply: HistoryReply = parse(&response.body)?;
    Ok(reply
        .history
        .into_iter()
        .map(|message| ChatMessage {
            role: ChatRole::from_wire(&message.role),
            content: message.content,
        })
        .collect())
}

pub fn decode_profile(response: &RawResponse) -> Result<ProfileRecord, ApiError> {
    if !response.is_success() {
        return Err(response.rejection());
    }

    match parse::<Value>(&response.body)? {
        Value::Object(fields) => Ok(profile_from_object(&fields)),
        _ => Err(ApiError::InvalidData),
    }
}

fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|error| {
        tracing::warn!(error = %error, "response body does not match the endpoint contract");
        ApiError::InvalidData
    })
}

fn profile_from_object(fields: &Map<String, Value>) -> ProfileRecord {
    ProfileRecord {
        username: text(fields, "username").unwrap_or_default(),
        email: text(fields, "email").unwrap_or_default(),
        account_number: text(fields, "account_number"),
        plan_type: text(fields, "plan_type"),
        monthly_fee: text(fields, "monthly_fee"),
        balance: text(fields, "balance"),
        last_bill_date: text(fields, "last_bill_date").filter(|value| !value.is_empty()),
        last_bill_amount: text(fields, "last_bill_amount"),
        status: text(fields, "status"),
        data_usage: text(fields, "data_usage"),
        data_limit: text(fields, "data_limit"),
        contract_end_date: text(fields, "contract_end_date").filter(|value| !value.is_empty()),
        payment_method: text(fields, "payment_method").filter(|value| !value.is_empty()),
        auto_pay: flag(fields, "auto_pay"),
        paperless_billing: flag(fields, "paperless_billing"),
    }
}

fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null => None,
        Value::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}

fn flag(fields: &Map<String, Value>, key: &str) -> bool {
    match fields.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(value)) => *value,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(value)) => !value.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
