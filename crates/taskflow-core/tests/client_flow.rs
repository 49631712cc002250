use taskflow_core::datetime;
use taskflow_core::reconcile;
use taskflow_core::task::{
  RawTask,
  Task,
  TaskPatch,
  TaskStatus
};

fn normalize_list(
  json: &str
) -> Vec<Task> {
  let raw: Vec<RawTask> =
    serde_json::from_str(json)
      .expect("raw task list");
  raw
    .into_iter()
    .filter_map(|record| {
      Task::from_raw(record).ok()
    })
    .collect()
}

#[test]
fn list_update_delete_flow() {
  // A list response mixing both identifier and creation-timestamp
  // conventions, plus one orphan record without any identifier.
  let mut tasks = normalize_list(
    r#"[
      {
        "_id": "65a1",
        "title": "Write spec",
        "priority": "High",
        "status": "Open",
        "due_date": "2025-03-01",
        "createdAt": "2025-02-01T08:00:00.000Z"
      },
      {
        "id": "65a2",
        "title": "Review draft",
        "priority": "Medium",
        "status": "In Progress",
        "created_at": "2025-02-02T08:00:00.000Z"
      },
      { "title": "orphan" }
    ]"#
  );

  assert_eq!(tasks.len(), 2);
  assert_eq!(tasks[0].id, "65a1");
  assert_eq!(
    tasks[0].due_date.as_deref(),
    Some("2025-03-01T00:00:00.000Z")
  );
  assert_eq!(
    tasks[0].created_at.as_deref(),
    Some("2025-02-01T08:00:00.000Z")
  );
  assert_eq!(
    tasks[1].status,
    TaskStatus::InProgress
  );

  // A create response lands at the front of the collection.
  let created = Task::from_raw(
    serde_json::from_str(
      r#"{"_id":"65a3","title":"Ship it","priority":"Low","status":"Open"}"#
    )
    .expect("created record")
  )
  .expect("normalize created");
  reconcile::prepend(
    &mut tasks,
    created
  );
  assert_eq!(tasks[0].id, "65a3");

  // A single-field patch transmits exactly that field.
  let patch = TaskPatch::with_status(
    TaskStatus::Done
  );
  assert_eq!(
    serde_json::to_string(&patch)
      .expect("encode patch"),
    r#"{"status":"Done"}"#
  );

  // The update echo replaces the matching entry in place.
  let echoed = Task::from_raw(
    serde_json::from_str(
      r#"{"_id":"65a1","title":"Write spec","priority":"High","status":"Done"}"#
    )
    .expect("echoed record")
  )
  .expect("normalize echo");
  reconcile::replace(
    &mut tasks,
    echoed
  );
  assert_eq!(tasks.len(), 3);
  assert_eq!(
    tasks[1].status,
    TaskStatus::Done
  );

  // Deleting removes exactly the matching entry.
  reconcile::remove(
    &mut tasks,
    "65a2"
  );
  assert_eq!(tasks.len(), 2);
  assert!(
    tasks
      .iter()
      .all(|task| task.id != "65a2")
  );
}

// Opening the editor on a task and saving without touching the date
// must not move the due date. The form stores local midnight, so the
// editor's date-input value has to reflect the local calendar day,
// whatever timezone the client runs in.
#[test]
fn due_date_edit_round_trip_keeps_day()
{
  let stored = datetime::expand_plain_date("2025-03-01");
  assert_eq!(
    datetime::date_input_value(
      &stored
    ),
    "2025-03-01"
  );

  // A second pass through the same pipeline is a fixed point.
  let restored =
    datetime::expand_plain_date(
      &datetime::date_input_value(
        &stored
      )
    );
  assert_eq!(restored, stored);
}
