use taskflow_core::insights::{
  InsightsSnapshot,
  bar_width_percent
};
use taskflow_core::task::TaskPriority;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_effect_with,
  use_state
};

use crate::api::ApiClient;

const FALLBACK_SUMMARY: &str =
  "No insights available. Create \
   some tasks to see analytics.";
const FALLBACK_INSIGHT: &str =
  "Start by creating your first \
   task to get personalized \
   insights.";

#[derive(Properties, PartialEq)]
pub struct InsightsPanelProps {
  pub api: ApiClient
}

/// Analytics panel. Fetches its snapshot independently of the task
/// list's local state, on mount and on explicit refresh; no polling.
#[function_component(InsightsPanel)]
pub fn insights_panel(
  props: &InsightsPanelProps
) -> Html {
  let snapshot = use_state(|| {
    None::<InsightsSnapshot>
  });
  let loading = use_state(|| true);
  let error =
    use_state(|| None::<String>);

  let fetch = {
    let api = props.api.clone();
    let snapshot = snapshot.clone();
    let loading = loading.clone();
    let error = error.clone();
    Callback::from(move |_: ()| {
      loading.set(true);
      error.set(None);

      let api = api.clone();
      let snapshot = snapshot.clone();
      let loading = loading.clone();
      let error = error.clone();
      wasm_bindgen_futures::spawn_local(async move {
        match api.insights().await {
          | Ok(data) => {
            tracing::info!(
              total = data
                .analytics
                .total_tasks,
              "insights refreshed"
            );
            snapshot.set(Some(data));
          }
          | Err(fetch_error) => {
            tracing::error!(
              error = %fetch_error,
              "insights fetch failed"
            );
            error.set(Some(
              fetch_error.to_string()
            ));
          }
        }
        loading.set(false);
      });
    })
  };

  {
    let fetch = fetch.clone();
    use_effect_with((), move |_| {
      fetch.emit(());
      || ()
    });
  }

  if *loading {
    return html! {
      <div class="insights-panel">
        <div class="loading">
          <div class="loading-spinner"></div>
          <p>{ "Loading analytics..." }</p>
        </div>
      </div>
    };
  }

  if let Some(message) =
    (*error).clone()
  {
    let on_retry = {
      let fetch = fetch.clone();
      Callback::from(move |_| {
        fetch.emit(())
      })
    };
    return html! {
      <div class="insights-panel">
        <div class="error-state">
          <h3>{ "Unable to Load Analytics" }</h3>
          <p>{ message }</p>
          <p class="error-help">
            { format!(
              "Make sure the backend server is running on {}",
              props.api.base_url()
            ) }
          </p>
          <button
            class="btn btn-primary"
            onclick={on_retry}
          >
            { "Try Again" }
          </button>
        </div>
      </div>
    };
  }

  let data = (*snapshot)
    .clone()
    .unwrap_or_default();
  let analytics = &data.analytics;
  let summary =
    if data.summary.is_empty() {
      FALLBACK_SUMMARY.to_string()
    } else {
      data.summary.clone()
    };
  let insights: Vec<String> = if data
    .detailed_insights
    .is_empty()
  {
    vec![FALLBACK_INSIGHT.to_string()]
  } else {
    data.detailed_insights.clone()
  };

  let on_refresh = {
    let fetch = fetch.clone();
    Callback::from(move |_| {
      fetch.emit(())
    })
  };

  html! {
    <div class="insights-panel">
      <div class="insights-header">
        <h2>{ "Performance Analytics" }</h2>
        <button
          class="btn btn-secondary"
          onclick={on_refresh}
        >
          { "Refresh Data" }
        </button>
      </div>

      <div class="insights-content">
        <div class="summary-card">
          <h3>{ "Executive Summary" }</h3>
          <p class="summary-text">{ summary }</p>
        </div>

        <div class="analytics-grid">
          { metric_card("Total Tasks", analytics.total_tasks, false) }
          { metric_card("Open Tasks", analytics.open_tasks, false) }
          { metric_card("Due Soon", analytics.due_soon, false) }
          { metric_card("Overdue", analytics.overdue, analytics.overdue > 0) }
        </div>

        {
          if analytics.open_tasks > 0 {
            let open_tasks = analytics.open_tasks;
            html! {
              <div class="priority-distribution">
                <h4>{ "Priority Distribution" }</h4>
                <div class="priority-bars">
                  {
                    for analytics.priority_distribution.iter().map(|entry| {
                      let width = bar_width_percent(entry.count, open_tasks);
                      html! {
                        <div class="priority-bar">
                          <div class="priority-label">
                            { entry.priority.as_str() }
                          </div>
                          <div class="bar-container">
                            <div
                              class="bar-fill"
                              style={format!(
                                "width:{width:.1}%;background-color:{};",
                                priority_bar_color(entry.priority)
                              )}
                            ></div>
                          </div>
                          <div class="priority-count">
                            { entry.count }
                          </div>
                        </div>
                      }
                    })
                  }
                </div>
              </div>
            }
          } else {
            html! {}
          }
        }

        <div class="detailed-insights">
          <h4>{ "Actionable Insights" }</h4>
          <ul class="insights-list">
            {
              for insights.iter().map(|insight| html! {
                <li>{ insight }</li>
              })
            }
          </ul>
        </div>

        {
          if analytics.total_tasks == 0 {
            html! {
              <div class="empty-state">
                <h3>{ "No Data Available" }</h3>
                <p>{ "Create your first task to see detailed analytics and insights." }</p>
              </div>
            }
          } else {
            html! {}
          }
        }
      </div>
    </div>
  }
}

fn metric_card(
  label: &str,
  value: u64,
  highlight: bool
) -> Html {
  html! {
    <div class="metric-card">
      <h4>{ label }</h4>
      <div class={classes!(
        "metric-value",
        highlight
          .then_some("overdue-count")
      )}>
        { value }
      </div>
    </div>
  }
}

fn priority_bar_color(
  priority: TaskPriority
) -> &'static str {
  match priority {
    | TaskPriority::High => "#ef4444",
    | TaskPriority::Medium => {
      "#f59e0b"
    }
    | TaskPriority::Low => "#10b981"
  }
}
