use serde::Deserialize;

use crate::task::TaskPriority;

/// Server-computed aggregate numbers. Every field is defaulted so a
/// sparse payload still decodes.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Default,
  Deserialize,
)]
#[serde(
  default,
  rename_all = "camelCase"
)]
pub struct TaskAnalytics {
  pub total_tasks: u64,
  pub open_tasks:  u64,
  pub due_soon:    u64,
  pub overdue:     u64,
  pub priority_distribution:
    Vec<PriorityCount>
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct PriorityCount {
  pub priority: TaskPriority,
  pub count:    u64
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Default,
  Deserialize,
)]
#[serde(default)]
pub struct InsightsSnapshot {
  pub analytics: TaskAnalytics,
  pub summary:   String,
  #[serde(rename = "detailedInsights")]
  pub detailed_insights: Vec<String>
}

/// Width of a priority-distribution bar as a percentage of the open
/// task count. Zero open tasks yields zero rather than dividing.
pub fn bar_width_percent(
  count: u64,
  open_tasks: u64
) -> f64 {
  if open_tasks == 0 {
    return 0.0;
  }
  count as f64 * 100.0
    / open_tasks as f64
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bars_are_proportional() {
    let high =
      bar_width_percent(1, 3);
    let medium =
      bar_width_percent(2, 3);
    assert!(
      (high - 100.0 / 3.0).abs()
        < 1e-9
    );
    assert!(
      (medium - 200.0 / 3.0).abs()
        < 1e-9
    );
  }

  #[test]
  fn zero_open_tasks_is_guarded() {
    assert_eq!(
      bar_width_percent(5, 0),
      0.0
    );
  }

  #[test]
  fn snapshot_decodes_camel_case() {
    let snapshot: InsightsSnapshot =
      serde_json::from_str(
        r#"{
          "analytics": {
            "totalTasks": 4,
            "openTasks": 3,
            "dueSoon": 1,
            "overdue": 2,
            "priorityDistribution": [
              { "priority": "High", "count": 1 },
              { "priority": "Medium", "count": 2 }
            ]
          },
          "summary": "Busy week.",
          "detailedInsights": ["Close the overdue items first."]
        }"#
      )
      .expect("decode snapshot");

    assert_eq!(
      snapshot.analytics.total_tasks,
      4
    );
    assert_eq!(
      snapshot.analytics.open_tasks,
      3
    );
    assert_eq!(
      snapshot
        .analytics
        .priority_distribution
        .len(),
      2
    );
    assert_eq!(
      snapshot.detailed_insights.len(),
      1
    );
  }

  #[test]
  fn sparse_snapshot_uses_defaults()
  {
    let snapshot: InsightsSnapshot =
      serde_json::from_str("{}")
        .expect("decode empty");
    assert_eq!(
      snapshot.analytics.total_tasks,
      0
    );
    assert!(
      snapshot.summary.is_empty()
    );
    assert!(
      snapshot
        .detailed_insights
        .is_empty()
    );
  }
}
