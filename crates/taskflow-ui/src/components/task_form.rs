use gloo::dialogs;
use taskflow_core::datetime;
use taskflow_core::task::{
  RawTask,
  TaskCreate,
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
  SubmitEvent,
  TargetCast,
  function_component,
  html,
  use_state
};

use crate::api::ApiClient;

#[derive(Clone, PartialEq)]
struct Draft {
  title:       String,
  description: String,
  priority:    TaskPriority,
  due_date:    String,
  status:      TaskStatus
}

impl Default for Draft {
  fn default() -> Self {
    Self {
      title:       String::new(),
      description: String::new(),
      priority:    TaskPriority::Medium,
      due_date:    String::new(),
      status:      TaskStatus::Open
    }
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub api:        ApiClient,
  pub on_created: Callback<RawTask>
}

/// New-task form. Required fields are enforced by the native form
/// controls; the raw server response is handed upward and
/// normalization happens in the shell.
#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let draft = use_state(Draft::default);
  let busy = use_state(|| false);

  let on_title = {
    let draft = draft.clone();
    Callback::from(
      move |event: InputEvent| {
        if let Some(input) = event
          .target_dyn_into::<HtmlInputElement>(
          )
        {
          draft.set(Draft {
            title: input.value(),
            ..(*draft).clone()
          });
        }
      }
    )
  };

  let on_description = {
    let draft = draft.clone();
    Callback::from(
      move |event: InputEvent| {
        if let Some(area) = event
          .target_dyn_into::<HtmlTextAreaElement>(
          )
        {
          draft.set(Draft {
            description: area.value(),
            ..(*draft).clone()
          });
        }
      }
    )
  };

  let on_priority = {
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
          draft.set(Draft {
            priority,
            ..(*draft).clone()
          });
        }
      }
    )
  };

  let on_due_date = {
    let draft = draft.clone();
    Callback::from(
      move |event: InputEvent| {
        if let Some(input) = event
          .target_dyn_into::<HtmlInputElement>(
          )
        {
          draft.set(Draft {
            due_date: input.value(),
            ..(*draft).clone()
          });
        }
      }
    )
  };

  let on_status = {
    let draft = draft.clone();
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
          draft.set(Draft {
            status,
            ..(*draft).clone()
          });
        }
      }
    )
  };

  let onsubmit = {
    let draft = draft.clone();
    let busy = busy.clone();
    let api = props.api.clone();
    let on_created =
      props.on_created.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        if *busy {
          return;
        }

        let create = TaskCreate {
          title:       draft
            .title
            .clone(),
          description: draft
            .description
            .clone(),
          priority:    draft.priority,
          status:      draft.status,
          due_date:
            datetime::expand_plain_date(
              &draft.due_date
            )
        };

        busy.set(true);
        let draft = draft.clone();
        let busy = busy.clone();
        let api = api.clone();
        let on_created =
          on_created.clone();
        wasm_bindgen_futures::spawn_local(async move {
          match api
            .create_task(&create)
            .await
          {
            | Ok(created) => {
              tracing::info!(
                title = %create.title,
                "task created"
              );
              on_created
                .emit(created);
              draft.set(
                Draft::default()
              );
            }
            | Err(error) => {
              // Draft stays as typed so the user can retry.
              tracing::error!(
                %error,
                "task creation \
                 failed"
              );
              dialogs::alert(&format!(
                "Error creating \
                 task: {error}"
              ));
            }
          }
          busy.set(false);
        });
      }
    )
  };

  html! {
    <form class="task-form" onsubmit={onsubmit}>
      <h3>{ "Create New Task" }</h3>

      <div class="form-group">
        <label for="title">{ "Task Title *" }</label>
        <input
          type="text"
          id="title"
          class="form-control"
          placeholder="Enter task title"
          required=true
          value={draft.title.clone()}
          oninput={on_title}
        />
      </div>

      <div class="form-group">
        <label for="description">{ "Description" }</label>
        <textarea
          id="description"
          class="form-control"
          placeholder="Enter task description"
          rows="3"
          value={draft.description.clone()}
          oninput={on_description}
        />
      </div>

      <div class="form-group">
        <label for="priority">{ "Priority *" }</label>
        <select
          id="priority"
          class="form-control"
          required=true
          onchange={on_priority}
        >
          {
            for TaskPriority::all().into_iter().map(|priority| html! {
              <option
                value={priority.as_str()}
                selected={priority == draft.priority}
              >
                { format!("{} Priority", priority.as_str()) }
              </option>
            })
          }
        </select>
      </div>

      <div class="form-group">
        <label for="due_date">{ "Due Date *" }</label>
        <input
          type="date"
          id="due_date"
          class="form-control"
          required=true
          min={datetime::today_input_value()}
          value={draft.due_date.clone()}
          oninput={on_due_date}
        />
      </div>

      <div class="form-group">
        <label for="status">{ "Status" }</label>
        <select
          id="status"
          class="form-control"
          onchange={on_status}
        >
          {
            for TaskStatus::all().into_iter().map(|status| html! {
              <option
                value={status.as_str()}
                selected={status == draft.status}
              >
                { status.as_str() }
              </option>
            })
          }
        </select>
      </div>

      <button
        type="submit"
        class="btn btn-primary w-full"
        disabled={*busy}
      >
        {
          if *busy {
            html! {
              <>
                <span class="loading-spinner"></span>
                { "Creating Task..." }
              </>
            }
          } else {
            html! { "Create Task" }
          }
        }
      </button>
    </form>
  }
}
