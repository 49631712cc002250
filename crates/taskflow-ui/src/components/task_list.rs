use taskflow_core::task::{
  RawTask,
  Task
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskItem;
use crate::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:      Vec<Task>,
  pub api:        ApiClient,
  pub on_updated: Callback<RawTask>,
  pub on_deleted: Callback<String>
}

/// Pure projection of the shell's collection; ordering is whatever
/// the shell currently holds.
#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.tasks.is_empty() {
    return html! {
      <div class="empty-state">
        <h3>{ "No tasks found" }</h3>
        <p>{ "Create your first task to get started!" }</p>
      </div>
    };
  }

  html! {
    <div class="task-list">
      <div class="tasks-grid">
        {
          for props.tasks.iter().cloned().map(|task| html! {
            <TaskItem
              key={task.id.clone()}
              task={task.clone()}
              api={props.api.clone()}
              on_updated={props.on_updated.clone()}
              on_deleted={props.on_deleted.clone()}
            />
          })
        }
      </div>
    </div>
  }
}
