//! Outbound channel to the embedding host.
//!
//! The editor never talks to a host global; it owns a `HostSink` supplied at
//! construction and pushes `HostMessage`s into it.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::info;

use crate::core::{CellValue, DataTable};

/// One keyed value sent to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostMessage {
    pub key: String,
    pub payload: Value,
}

impl HostMessage {
    #[must_use]
    pub fn new(key: impl Into<String>, payload: Value) -> Self {
        Self {
            key: key.into(),
            payload,
        }
    }
}

/// Receiver for host notifications.
pub trait HostSink {
    fn send(&mut self, message: HostMessage);
}

impl<F> HostSink for F
where
    F: FnMut(HostMessage),
{
    fn send(&mut self, message: HostMessage) {
        self(message);
    }
}

/// Sink that drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl HostSink for NullSink {
    fn send(&mut self, _message: HostMessage) {}
}

/// Sink that logs every message through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl HostSink for TracingSink {
    fn send(&mut self, message: HostMessage) {
        info!(key = %message.key, payload = %message.payload, "host message");
    }
}

/// Sink keeping every message in a shared log.
///
/// Clones share the same log, so a host or test keeps one handle while the
/// editor owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    messages: Rc<RefCell<Vec<HostMessage>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<HostMessage> {
        self.messages.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    /// Messages sent under `key`, oldest first.
    #[must_use]
    pub fn with_key(&self, key: &str) -> Vec<HostMessage> {
        self.messages
            .borrow()
            .iter()
            .filter(|message| message.key == key)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn last(&self) -> Option<HostMessage> {
        self.messages.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }
}

impl HostSink for RecordingSink {
    fn send(&mut self, message: HostMessage) {
        self.messages.borrow_mut().push(message);
    }
}

/// Message keys derived from the host-facing identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelKeys {
    base: String,
}

impl ChannelKeys {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn dataframe(&self) -> String {
        format!("{}:dataframe", self.base)
    }

    #[must_use]
    pub fn dataframe_with_date(&self) -> String {
        format!("{}:dataframeWithDate", self.base)
    }

    #[must_use]
    pub fn change(&self) -> String {
        format!("{}_change", self.base)
    }
}

/// Name under which the edited row's x value is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeXKey {
    Category,
    X,
}

impl ChangeXKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::X => "x",
        }
    }
}

/// One user edit of a single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub index: usize,
    pub x_key: ChangeXKey,
    pub x: CellValue,
    pub field: String,
    pub value: f64,
}

impl ChangeRecord {
    /// Host payload: `{index, category | x, field, value}`.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("index".to_owned(), json!(self.index));
        payload.insert(
            self.x_key.as_str().to_owned(),
            serde_json::to_value(&self.x).unwrap_or(Value::Null),
        );
        payload.insert("field".to_owned(), json!(self.field));
        payload.insert("value".to_owned(), json!(self.value));
        Value::Object(payload)
    }
}

/// Payload for a full dataset message.
///
/// Date-keyed tables travel as `{data, date}` so the host knows which column
/// to parse back into dates.
#[must_use]
pub fn dataframe_payload(table: &DataTable, date_field: Option<&str>) -> Value {
    let data = serde_json::to_value(table).unwrap_or(Value::Null);
    match date_field {
        Some(field) => json!({ "data": data, "date": field }),
        None => data,
    }
}
