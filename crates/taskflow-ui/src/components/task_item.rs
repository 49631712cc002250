use gloo::dialogs;
use taskflow_core::datetime;
use taskflow_core::task::{
  RawTask,
  Task,
  TaskPatch,
  TaskPriority,
  TaskStatus
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement
};
use yew::{
  Callback,
  Event,
  Html,
  InputEvent,
  Properties,
  TargetCast,
  UseStateHandle,
  classes,
  function_component,
  html,
  use_state
};

use crate::api::ApiClient;

/// Local working copy for edit mode; written back only through the
/// update round-trip.
#[derive(Clone, PartialEq)]
struct EditDraft {
  title:       String,
  description: String,
  priority:    TaskPriority,
  due_date:    String
}

impl EditDraft {
  fn from_task(task: &Task) -> Self {
    Self {
      title:       task.title.clone(),
      description: task
        .description
        .clone()
        .unwrap_or_default(),
      priority:    task.priority,
      due_date:    task
        .due_date
        .as_deref()
        .map(datetime::date_input_value)
        .unwrap_or_default()
    }
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskItemProps {
  pub task:       Task,
  pub api:        ApiClient,
  pub on_updated: Callback<RawTask>,
  pub on_deleted: Callback<String>
}

#[function_component(TaskItem)]
pub fn task_item(
  props: &TaskItemProps
) -> Html {
  let editing =
    use_state(|| None::<EditDraft>);
  let busy = use_state(|| false);

  let on_status_change = {
    let api = props.api.clone();
    let task_id = props.task.id.clone();
    let busy = busy.clone();
    let editing = editing.clone();
    let on_updated =
      props.on_updated.clone();
    Callback::from(
      move |event: Event| {
        let Some(select) = event
          .target_dyn_into::<HtmlSelectElement>(
          )
        else {
          return;
        };
        if let Some(status) =
          TaskStatus::from_key(
            &select.value()
          )
        {
          submit_patch(
            api.clone(),
            task_id.clone(),
            TaskPatch::with_status(
              status
            ),
            busy.clone(),
            editing.clone(),
            false,
            on_updated.clone()
          );
        }
      }
    )
  };

  let on_priority_change = {
    let api = props.api.clone();
    let task_id = props.task.id.clone();
    let busy = busy.clone();
    let editing = editing.clone();
    let on_updated =
      props.on_updated.clone();
    Callback::from(
      move |event: Event| {
        let Some(select) = event
          .target_dyn_into::<HtmlSelectElement>(
          )
        else {
          return;
        };
        if let Some(priority) =
          TaskPriority::from_key(
            &select.value()
          )
        {
          submit_patch(
            api.clone(),
            task_id.clone(),
            TaskPatch::with_priority(
              priority
            ),
            busy.clone(),
            editing.clone(),
            false,
            on_updated.clone()
          );
        }
      }
    )
  };

  let on_delete = {
    let api = props.api.clone();
    let task_id = props.task.id.clone();
    let busy = busy.clone();
    let on_deleted =
      props.on_deleted.clone();
    Callback::from(move |_| {
      if !dialogs::confirm(
        "Are you sure you want to \
         delete this task?"
      ) {
        return;
      }

      busy.set(true);
      let api = api.clone();
      let task_id = task_id.clone();
      let busy = busy.clone();
      let on_deleted =
        on_deleted.clone();
      wasm_bindgen_futures::spawn_local(async move {
        match api
          .delete_task(&task_id)
          .await
        {
          | Ok(()) => {
            tracing::info!(
              %task_id,
              "task deleted"
            );
            on_deleted
              .emit(task_id.clone());
          }
          | Err(error) => {
            tracing::error!(
              %error,
              %task_id,
              "task deletion failed"
            );
            dialogs::alert(&format!(
              "Failed to delete \
               task: {error}"
            ));
          }
        }
        busy.set(false);
      });
    })
  };

  let on_edit_click = {
    let editing = editing.clone();
    let task = props.task.clone();
    Callback::from(move |_| {
      editing.set(Some(
        EditDraft::from_task(&task)
      ));
    })
  };

  let on_cancel = {
    let editing = editing.clone();
    Callback::from(move |_| {
      editing.set(None);
    })
  };

  if let Some(draft) =
    (*editing).clone()
  {
    return render_editor(
      props,
      draft,
      editing,
      busy,
      on_cancel
    );
  }

  let task = &props.task;
  let overdue = datetime::is_overdue(
    task.due_date.as_deref(),
    task.status,
    datetime::today_local()
  );
  let title = if task.title.is_empty()
  {
    "Untitled Task"
  } else {
    task.title.as_str()
  };

  html! {
    <div class={classes!(
      "task-item",
      overdue.then_some("overdue")
    )}>
      <div class="task-header">
        <h4 class="task-title">{ title }</h4>
        <div class="task-actions">
          <button
            class="btn-icon"
            title="Edit task"
            disabled={*busy}
            onclick={on_edit_click}
          >
            { "Edit" }
          </button>
          <button
            class="btn-icon"
            title="Delete task"
            disabled={*busy}
            onclick={on_delete}
          >
            { if *busy { "..." } else { "Delete" } }
          </button>
        </div>
      </div>

      {
        match task.description.as_deref() {
          | Some(description) if !description.is_empty() => html! {
            <p class="task-description">{ description }</p>
          },
          | _ => html! {}
        }
      }

      <div class="task-meta">
        <span class={priority_badge_class(task.priority)}>
          { task.priority.as_str() }
        </span>
        <span class={status_badge_class(task.status)}>
          { task.status.as_str() }
        </span>
        <span class={classes!(
          "due-date",
          overdue.then_some("overdue")
        )}>
          { datetime::display_date(task.due_date.as_deref()) }
          { if overdue { " (Overdue)" } else { "" } }
        </span>
      </div>

      <div class="task-controls">
        <select
          class="form-control"
          disabled={*busy}
          onchange={on_status_change}
        >
          {
            for TaskStatus::all().into_iter().map(|status| html! {
              <option
                value={status.as_str()}
                selected={status == task.status}
              >
                { status.as_str() }
              </option>
            })
          }
        </select>

        <select
          class="form-control"
          disabled={*busy}
          onchange={on_priority_change}
        >
          {
            for TaskPriority::all().into_iter().map(|priority| html! {
              <option
                value={priority.as_str()}
                selected={priority == task.priority}
              >
                { priority.as_str() }
              </option>
            })
          }
        </select>
      </div>
    </div>
  }
}

fn render_editor(
  props: &TaskItemProps,
  draft: EditDraft,
  editing: UseStateHandle<
    Option<EditDraft>
  >,
  busy: UseStateHandle<bool>,
  on_cancel: Callback<yew::MouseEvent>
) -> Html {
  let on_draft_title = {
    let editing = editing.clone();
    let draft = draft.clone();
    Callback::from(
      move |event: InputEvent| {
        if let Some(input) = event
          .target_dyn_into::<HtmlInputElement>(
          )
        {
          editing.set(Some(
            EditDraft {
              title: input.value(),
              ..draft.clone()
            }
          ));
        }
      }
    )
  };

  let on_draft_description = {
    let editing = editing.clone();
    let draft = draft.clone();
    Callback::from(
      move |event: InputEvent| {
        if let Some(area) = event
          .target_dyn_into::<HtmlTextAreaElement>(
          )
        {
          editing.set(Some(
            EditDraft {
              description: area
                .value(),
              ..draft.clone()
            }
          ));
        }
      }
    )
  };

  let on_draft_priority = {
    let editing = editing.clone();
    let draft = draft.clone();
    Callback::from(
      move |event: Event| {
        let Some(select) = event
          .target_dyn_into::<HtmlSelectElement>(
          )
        else {
          return;
        };
        if let Some(priority) =
          TaskPriority::from_key(
            &select.value()
          )
        {
          editing.set(Some(
            EditDraft {
              priority,
              ..draft.clone()
            }
          ));
        }
      }
    )
  };

  let on_draft_due = {
    let editing = editing.clone();
    let draft = draft.clone();
    Callback::from(
      move |event: InputEvent| {
        if let Some(input) = event
          .target_dyn_into::<HtmlInputElement>(
          )
        {
          editing.set(Some(
            EditDraft {
              due_date: input.value(),
              ..draft.clone()
            }
          ));
        }
      }
    )
  };

  let on_save = {
    let api = props.api.clone();
    let task_id = props.task.id.clone();
    let busy = busy.clone();
    let editing = editing.clone();
    let on_updated =
      props.on_updated.clone();
    let draft = draft.clone();
    Callback::from(move |_| {
      let patch = TaskPatch {
        title: Some(
          draft.title.clone()
        ),
        description: Some(
          draft.description.clone()
        ),
        priority: Some(
          draft.priority
        ),
        status: None,
        due_date: Some(
          draft.due_date.clone()
        )
      };
      submit_patch(
        api.clone(),
        task_id.clone(),
        patch,
        busy.clone(),
        editing.clone(),
        true,
        on_updated.clone()
      );
    })
  };

  html! {
    <div class="task-item">
      <div class="task-edit">
        <input
          type="text"
          class="form-control"
          placeholder="Task title"
          value={draft.title.clone()}
          oninput={on_draft_title}
        />
        <textarea
          class="form-control"
          placeholder="Task description"
          rows="3"
          value={draft.description.clone()}
          oninput={on_draft_description}
        />
        <select
          class="form-control"
          onchange={on_draft_priority}
        >
          {
            for TaskPriority::all().into_iter().map(|priority| html! {
              <option
                value={priority.as_str()}
                selected={priority == draft.priority}
              >
                { priority.as_str() }
              </option>
            })
          }
        </select>
        <input
          type="date"
          class="form-control"
          min={datetime::today_input_value()}
          value={draft.due_date.clone()}
          oninput={on_draft_due}
        />
        <div class="task-edit-actions">
          <button
            class="btn btn-primary btn-sm"
            disabled={*busy}
            onclick={on_save}
          >
            { if *busy { "Saving..." } else { "Save" } }
          </button>
          <button
            class="btn btn-secondary btn-sm"
            disabled={*busy}
            onclick={on_cancel}
          >
            { "Cancel" }
          </button>
        </div>
      </div>
    </div>
  }
}

/// Issue a partial update. A due date matching a plain calendar date
/// is expanded to a full timestamp first; on success the server echo
/// flows up through `on_updated` and, when the request came from the
/// editor, the editor closes.
fn submit_patch(
  api: ApiClient,
  task_id: String,
  mut patch: TaskPatch,
  busy: UseStateHandle<bool>,
  editing: UseStateHandle<
    Option<EditDraft>
  >,
  close_editor: bool,
  on_updated: Callback<RawTask>
) {
  if let Some(due) =
    patch.due_date.take()
  {
    patch.due_date = Some(
      datetime::expand_plain_date(
        &due
      )
    );
  }

  busy.set(true);
  wasm_bindgen_futures::spawn_local(
    async move {
      match api
        .update_task(&task_id, &patch)
        .await
      {
        | Ok(updated) => {
          tracing::info!(
            %task_id,
            "task updated"
          );
          on_updated.emit(updated);
          if close_editor {
            editing.set(None);
          }
        }
        | Err(error) => {
          // Editor stays open so the attempt can be retried.
          tracing::error!(
            %error,
            %task_id,
            "task update failed"
          );
          dialogs::alert(&format!(
            "Failed to update task: \
             {error}"
          ));
        }
      }
      busy.set(false);
    }
  );
}

fn priority_badge_class(
  priority: TaskPriority
) -> &'static str {
  match priority {
    | TaskPriority::High => {
      "badge badge-high"
    }
    | TaskPriority::Medium => {
      "badge badge-medium"
    }
    | TaskPriority::Low => {
      "badge badge-low"
    }
  }
}

fn status_badge_class(
  status: TaskStatus
) -> &'static str {
  match status {
    | TaskStatus::Open => {
      "badge badge-open"
    }
    | TaskStatus::InProgress => {
      "badge badge-progress"
    }
    | TaskStatus::Done => {
      "badge badge-done"
    }
  }
}
