use crate::task::TaskStatus;

/// Status filter for the task list. `All` omits the status query
/// parameter entirely; anything else becomes `?status=...`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum StatusFilter {
  All,
  Only(TaskStatus)
}

impl StatusFilter {
  pub fn all() -> [Self; 4] {
    [
      Self::All,
      Self::Only(TaskStatus::Open),
      Self::Only(
        TaskStatus::InProgress
      ),
      Self::Only(TaskStatus::Done)
    ]
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::All => "all",
      | Self::Only(status) => {
        status.as_str()
      }
    }
  }

  pub fn from_key(key: &str) -> Self {
    match TaskStatus::from_key(key) {
      | Some(status) => {
        Self::Only(status)
      }
      | None => Self::All
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::All => "All Tasks",
      | Self::Only(status) => {
        status.as_str()
      }
    }
  }

  pub fn query_value(
    self
  ) -> Option<&'static str> {
    match self {
      | Self::All => None,
      | Self::Only(status) => {
        Some(status.as_str())
      }
    }
  }
}
