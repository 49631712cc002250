//! Reconciliation of the shell's authoritative task collection with
//! server responses. The collection holds at most one entry per
//! identifier; updates replace in place and never duplicate.

use tracing::warn;

use crate::task::Task;

/// A freshly created task goes to the front of the list.
pub fn prepend(
  tasks: &mut Vec<Task>,
  task: Task
) {
  tasks.insert(0, task);
}

/// Replace the entry matching the echoed task's identifier, keeping
/// its position. A miss is logged and ignored; the server echoed a
/// task this client no longer holds (e.g. it was filtered out).
pub fn replace(
  tasks: &mut [Task],
  task: Task
) {
  match tasks
    .iter_mut()
    .find(|entry| entry.id == task.id)
  {
    | Some(slot) => *slot = task,
    | None => {
      warn!(
        task_id = %task.id,
        "updated task is not in the \
         local collection"
      );
    }
  }
}

/// Remove every entry carrying the given identifier.
pub fn remove(
  tasks: &mut Vec<Task>,
  id: &str
) {
  tasks.retain(|entry| entry.id != id);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::task::{
    TaskPriority,
    TaskStatus
  };

  fn task(
    id: &str,
    title: &str
  ) -> Task {
    Task {
      id:          id.to_string(),
      title:       title.to_string(),
      description: None,
      priority:    TaskPriority::Medium,
      status:      TaskStatus::Open,
      due_date:    None,
      created_at:  None
    }
  }

  #[test]
  fn prepend_puts_new_task_first() {
    let mut tasks =
      vec![task("a", "first")];
    prepend(
      &mut tasks,
      task("b", "second")
    );
    assert_eq!(tasks[0].id, "b");
    assert_eq!(tasks.len(), 2);
  }

  #[test]
  fn replace_keeps_order_and_count()
  {
    let mut tasks = vec![
      task("a", "one"),
      task("b", "two"),
      task("c", "three"),
    ];
    replace(
      &mut tasks,
      task("b", "two, revised")
    );
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[1].id, "b");
    assert_eq!(
      tasks[1].title,
      "two, revised"
    );
  }

  #[test]
  fn replace_miss_changes_nothing()
  {
    let mut tasks =
      vec![task("a", "one")];
    replace(
      &mut tasks,
      task("ghost", "gone")
    );
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, "a");
  }

  #[test]
  fn remove_deletes_exactly_the_match()
  {
    let mut tasks = vec![
      task("a", "one"),
      task("b", "two"),
      task("c", "three"),
    ];
    remove(&mut tasks, "b");
    assert_eq!(tasks.len(), 2);
    assert!(
      tasks
        .iter()
        .all(|entry| entry.id != "b")
    );
  }
}
