use gloo::dialogs;
use taskflow_core::filter::StatusFilter;
use taskflow_core::reconcile;
use taskflow_core::task::{
  RawTask,
  Task
};
use web_sys::HtmlSelectElement;
use yew::{
  Callback,
  Event,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_state
};

use crate::api::ApiClient;
use crate::components::{
  InsightsPanel,
  TaskForm,
  TaskList
};

#[derive(
  Clone, Copy, PartialEq, Eq,
)]
enum Tab {
  Tasks,
  Insights
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
  pub api: ApiClient
}

/// Application shell: owns the authoritative task collection, the
/// active status filter, and the tab switch, and reconciles the
/// collection with whatever the child components hear back from the
/// service.
#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
  let tasks =
    use_state(Vec::<Task>::new);
  let loading = use_state(|| false);
  let filter =
    use_state(|| StatusFilter::All);
  let active_tab =
    use_state(|| Tab::Tasks);
  let refresh_tick =
    use_state(|| 0_u64);
  // Monotonic tag for list fetches; a response that is not the
  // latest issued is discarded so rapid refreshes cannot let a
  // stale list overwrite a fresher one.
  let list_seq = use_mut_ref(|| 0_u64);

  {
    let api = props.api.clone();
    let tasks = tasks.clone();
    let loading = loading.clone();
    let list_seq = list_seq.clone();
    use_effect_with(
      (*filter, *refresh_tick),
      move |(filter, tick)| {
        let filter = *filter;
        let tick = *tick;
        let seq = {
          let mut counter =
            list_seq.borrow_mut();
          *counter += 1;
          *counter
        };
        loading.set(true);

        wasm_bindgen_futures::spawn_local(async move {
          tracing::info!(
            filter = %filter.as_key(),
            tick,
            seq,
            "refreshing task list"
          );

          let result =
            api.list_tasks(filter).await;

          if *list_seq.borrow() != seq {
            tracing::debug!(
              seq,
              "discarding stale task \
               list response"
            );
            return;
          }
          loading.set(false);

          match result {
            | Ok(records) => {
              let mut next =
                Vec::with_capacity(
                  records.len()
                );
              for record in records {
                match Task::from_raw(
                  record
                ) {
                  | Ok(task) => {
                    next.push(task)
                  }
                  | Err(error) => {
                    tracing::warn!(
                      %error,
                      "skipping task \
                       record that \
                       failed \
                       normalization"
                    );
                  }
                }
              }
              tasks.set(next);
            }
            | Err(error) => {
              // Prior collection stays on screen; a transient
              // failure should not clear a working view.
              tracing::error!(
                %error,
                "task list fetch \
                 failed"
              );
              dialogs::alert(
                "Failed to load \
                 tasks. Make sure \
                 the backend is \
                 running."
              );
            }
          }
        });

        || ()
      }
    );
  }

  let on_created = {
    let tasks = tasks.clone();
    Callback::from(
      move |record: RawTask| {
        match Task::from_raw(record) {
          | Ok(task) => {
            let mut next =
              (*tasks).clone();
            reconcile::prepend(
              &mut next, task
            );
            tasks.set(next);
          }
          | Err(error) => {
            tracing::error!(
              %error,
              "created task failed \
               normalization"
            );
            dialogs::alert(&format!(
              "Server returned an \
               unusable task record: \
               {error}"
            ));
          }
        }
      }
    )
  };

  let on_updated = {
    let tasks = tasks.clone();
    Callback::from(
      move |record: RawTask| {
        match Task::from_raw(record) {
          | Ok(task) => {
            let mut next =
              (*tasks).clone();
            reconcile::replace(
              &mut next, task
            );
            tasks.set(next);
          }
          | Err(error) => {
            tracing::error!(
              %error,
              "updated task failed \
               normalization"
            );
            dialogs::alert(&format!(
              "Server returned an \
               unusable task record: \
               {error}"
            ));
          }
        }
      }
    )
  };

  let on_deleted = {
    let tasks = tasks.clone();
    Callback::from(move |id: String| {
      let mut next = (*tasks).clone();
      reconcile::remove(
        &mut next, &id
      );
      tasks.set(next);
    })
  };

  let on_filter_change = {
    let filter = filter.clone();
    Callback::from(
      move |event: Event| {
        if let Some(select) = event
          .target_dyn_into::<HtmlSelectElement>(
          )
        {
          filter.set(
            StatusFilter::from_key(
              &select.value()
            )
          );
        }
      }
    )
  };

  let on_refresh = {
    let refresh_tick =
      refresh_tick.clone();
    Callback::from(move |_| {
      refresh_tick.set(
        (*refresh_tick)
          .saturating_add(1)
      );
    })
  };

  let tab_button =
    |tab: Tab, label: &str| {
      let active_tab =
        active_tab.clone();
      let active =
        *active_tab == tab;
      html! {
        <button
          class={classes!(
            "nav-tab",
            active.then_some("active")
          )}
          onclick={move |_| {
            active_tab.set(tab)
          }}
        >
          { label }
        </button>
      }
    };

  html! {
    <div class="app">
      <header class="app-header">
        <div class="logo">
          <h1>{ "TaskFlow Manager" }</h1>
          <p>{ "Streamline your workflow with intelligent task management" }</p>
        </div>
      </header>

      <nav class="app-nav">
        { tab_button(Tab::Tasks, "Tasks") }
        { tab_button(Tab::Insights, "Analytics") }
      </nav>

      <main class="app-main">
        {
          match *active_tab {
            | Tab::Tasks => html! {
              <div class="tasks-container">
                <div class="tasks-sidebar">
                  <TaskForm
                    api={props.api.clone()}
                    on_created={on_created}
                  />
                </div>

                <div class="tasks-content">
                  <div class="tasks-header">
                    <h3>{ "Task Overview" }</h3>
                    <div class="tasks-controls">
                      <select
                        class="form-control"
                        onchange={on_filter_change}
                      >
                        {
                          for StatusFilter::all().into_iter().map(|option| html! {
                            <option
                              value={option.as_key()}
                              selected={option == *filter}
                            >
                              { option.label() }
                            </option>
                          })
                        }
                      </select>
                      <button
                        class="btn btn-secondary"
                        onclick={on_refresh}
                      >
                        { "Refresh" }
                      </button>
                    </div>
                  </div>

                  {
                    if *loading {
                      html! {
                        <div class="loading">
                          <div class="loading-spinner"></div>
                          <p>{ "Loading tasks..." }</p>
                        </div>
                      }
                    } else {
                      html! {
                        <TaskList
                          tasks={(*tasks).clone()}
                          api={props.api.clone()}
                          on_updated={on_updated}
                          on_deleted={on_deleted}
                        />
                      }
                    }
                  }
                </div>
              </div>
            },
            | Tab::Insights => html! {
              <InsightsPanel
                api={props.api.clone()}
              />
            }
          }
        }
      </main>
    </div>
  }
}
