use std::fmt;

use serde::{
  Deserialize,
  Serialize
};
use tracing::warn;

use crate::datetime;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub enum TaskStatus {
  Open,
  #[serde(rename = "In Progress")]
  InProgress,
  Done
}

impl TaskStatus {
  pub fn all() -> [Self; 3] {
    [
      Self::Open,
      Self::InProgress,
      Self::Done
    ]
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Open => "Open",
      | Self::InProgress => {
        "In Progress"
      }
      | Self::Done => "Done"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    match key {
      | "Open" => Some(Self::Open),
      | "In Progress" => {
        Some(Self::InProgress)
      }
      | "Done" => Some(Self::Done),
      | _ => None
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub enum TaskPriority {
  Low,
  Medium,
  High
}

impl TaskPriority {
  pub fn all() -> [Self; 3] {
    [
      Self::Low,
      Self::Medium,
      Self::High
    ]
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Low => "Low",
      | Self::Medium => "Medium",
      | Self::High => "High"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    match key {
      | "Low" => Some(Self::Low),
      | "Medium" => Some(Self::Medium),
      | "High" => Some(Self::High),
      | _ => None
    }
  }
}

/// Wire shape of a task record as the service sends it. The service
/// has historically used two identifier conventions (`_id` and `id`)
/// and two creation-timestamp conventions (`createdAt` and
/// `created_at`); this shape tolerates all four.
#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct RawTask {
  pub id:              Option<String>,
  #[serde(rename = "_id")]
  pub record_id:       Option<String>,
  #[serde(default)]
  pub title:           String,
  pub description:     Option<String>,
  pub priority:        Option<TaskPriority>,
  pub status:          Option<TaskStatus>,
  pub due_date:        Option<String>,
  pub created_at:      Option<String>,
  #[serde(rename = "createdAt")]
  pub created_at_wire: Option<String>
}

/// Canonical in-memory task. Exactly one identifier field survives
/// normalization; nothing past the ingress boundary branches on which
/// wire field carried it.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
  pub id:          String,
  pub title:       String,
  pub description: Option<String>,
  pub priority:    TaskPriority,
  pub status:      TaskStatus,
  pub due_date:    Option<String>,
  pub created_at:  Option<String>
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum NormalizeError {
  MissingId
}

impl fmt::Display for NormalizeError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | Self::MissingId => write!(
        f,
        "task record carries neither \
         an `_id` nor an `id` field"
      )
    }
  }
}

impl std::error::Error for NormalizeError {}

impl Task {
  pub fn from_raw(
    raw: RawTask
  ) -> Result<Self, NormalizeError> {
    let id = raw
      .record_id
      .or(raw.id)
      .ok_or(
        NormalizeError::MissingId
      )?;

    let created_at = raw
      .created_at_wire
      .or(raw.created_at);

    let due_date =
      raw.due_date.map(|due| {
        match datetime::to_iso_utc(
          &due
        ) {
          | Some(iso) => iso,
          | None => {
            warn!(
              due = %due,
              "due date failed to \
               parse, keeping it \
               verbatim"
            );
            due
          }
        }
      });

    Ok(Self {
      id,
      title: raw.title,
      description: raw.description,
      priority: raw
        .priority
        .unwrap_or(
          TaskPriority::Medium
        ),
      status: raw
        .status
        .unwrap_or(TaskStatus::Open),
      due_date,
      created_at
    })
  }
}

/// Body of a create request. Every field the form collects; the due
/// date is an ISO-8601 timestamp by the time this is built.
#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct TaskCreate {
  pub title:       String,
  pub description: String,
  pub priority:    TaskPriority,
  pub status:      TaskStatus,
  pub due_date:    String
}

/// Explicit allow-list of patchable fields. `None` fields never hit
/// the wire, so a single-field change transmits exactly one field.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Serialize,
)]
pub struct TaskPatch {
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub title:       Option<String>,
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub description: Option<String>,
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub priority:    Option<TaskPriority>,
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub status:      Option<TaskStatus>,
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub due_date:    Option<String>
}

impl TaskPatch {
  pub fn with_status(
    status: TaskStatus
  ) -> Self {
    Self {
      status: Some(status),
      ..Self::default()
    }
  }

  pub fn with_priority(
    priority: TaskPriority
  ) -> Self {
    Self {
      priority: Some(priority),
      ..Self::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn raw(json: &str) -> RawTask {
    serde_json::from_str(json)
      .expect("raw task json")
  }

  #[test]
  fn resolves_record_id_alias() {
    let task = Task::from_raw(raw(
      r#"{"_id":"abc123","title":"t","status":"Open","priority":"Low"}"#
    ))
    .expect("normalize");
    assert_eq!(task.id, "abc123");
  }

  #[test]
  fn resolves_plain_id_alias() {
    let task = Task::from_raw(raw(
      r#"{"id":"abc123","title":"t","status":"Open","priority":"Low"}"#
    ))
    .expect("normalize");
    assert_eq!(task.id, "abc123");
  }

  #[test]
  fn record_id_wins_over_plain_id() {
    let task = Task::from_raw(raw(
      r#"{"_id":"mongo","id":"other","title":"t"}"#
    ))
    .expect("normalize");
    assert_eq!(task.id, "mongo");
  }

  #[test]
  fn missing_identifier_is_an_error()
  {
    let err = Task::from_raw(raw(
      r#"{"title":"orphan"}"#
    ))
    .expect_err("no identifier");
    assert_eq!(
      err,
      NormalizeError::MissingId
    );
  }

  #[test]
  fn created_at_falls_back_to_wire_name()
  {
    let task = Task::from_raw(raw(
      r#"{"id":"1","createdAt":"2025-01-02T03:04:05.000Z"}"#
    ))
    .expect("normalize");
    assert_eq!(
      task.created_at.as_deref(),
      Some("2025-01-02T03:04:05.000Z")
    );
  }

  #[test]
  fn absent_due_date_stays_absent() {
    let task = Task::from_raw(raw(
      r#"{"id":"1","title":"t"}"#
    ))
    .expect("normalize");
    assert_eq!(task.due_date, None);
  }

  #[test]
  fn due_date_rewritten_to_iso() {
    let task = Task::from_raw(raw(
      r#"{"id":"1","due_date":"2025-03-01"}"#
    ))
    .expect("normalize");
    assert_eq!(
      task.due_date.as_deref(),
      Some("2025-03-01T00:00:00.000Z")
    );
  }

  #[test]
  fn unparseable_due_date_kept_verbatim()
  {
    let task = Task::from_raw(raw(
      r#"{"id":"1","due_date":"next tuesday"}"#
    ))
    .expect("normalize");
    assert_eq!(
      task.due_date.as_deref(),
      Some("next tuesday")
    );
  }

  #[test]
  fn defaults_for_missing_enums() {
    let task = Task::from_raw(raw(
      r#"{"id":"1","title":"t"}"#
    ))
    .expect("normalize");
    assert_eq!(
      task.priority,
      TaskPriority::Medium
    );
    assert_eq!(
      task.status,
      TaskStatus::Open
    );
  }

  #[test]
  fn in_progress_round_trips_wire_name()
  {
    let status: TaskStatus =
      serde_json::from_str(
        r#""In Progress""#
      )
      .expect("decode");
    assert_eq!(
      status,
      TaskStatus::InProgress
    );
    assert_eq!(
      serde_json::to_string(&status)
        .expect("encode"),
      r#""In Progress""#
    );
  }

  #[test]
  fn patch_serializes_only_set_fields()
  {
    let patch =
      TaskPatch::with_status(
        TaskStatus::Done
      );
    assert_eq!(
      serde_json::to_string(&patch)
        .expect("encode"),
      r#"{"status":"Done"}"#
    );
  }
}
