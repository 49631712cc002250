use std::fmt;

use gloo::net::http::{
  Request,
  Response
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use taskflow_core::filter::StatusFilter;
use taskflow_core::insights::InsightsSnapshot;
use taskflow_core::task::{
  RawTask,
  TaskCreate,
  TaskPatch
};

/// Thin REST client over the task service. Constructed once at
/// startup and threaded explicitly into every component that talks
/// to the network; nothing reads ambient configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiClient {
  base_url: String
}

#[derive(Debug, Clone)]
pub enum ApiError {
  Transport(String),
  Status {
    status:  u16,
    message: Option<String>
  },
  Decode(String)
}

impl fmt::Display for ApiError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | Self::Transport(error) => {
        write!(
          f,
          "network error: {error}"
        )
      }
      | Self::Status {
        message: Some(message),
        ..
      } => write!(f, "{message}"),
      | Self::Status {
        status, ..
      } => write!(
        f,
        "request failed with status \
         {status}"
      ),
      | Self::Decode(error) => {
        write!(
          f,
          "invalid response body: \
           {error}"
        )
      }
    }
  }
}

impl std::error::Error for ApiError {}

/// The service reports failures as `{ "message": ... }` when it has
/// something to say.
#[derive(Deserialize)]
struct ErrorBody {
  message: Option<String>
}

impl ApiClient {
  pub fn new(
    base_url: impl Into<String>
  ) -> Self {
    let mut base_url = base_url.into();
    while base_url.ends_with('/') {
      base_url.pop();
    }
    Self {
      base_url
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub async fn list_tasks(
    &self,
    filter: StatusFilter
  ) -> Result<Vec<RawTask>, ApiError>
  {
    let mut request = Request::get(
      &self.url("/tasks")
    );
    if let Some(status) =
      filter.query_value()
    {
      request = request
        .query([("status", status)]);
    }

    let response = request
      .send()
      .await
      .map_err(transport)?;
    decode(response).await
  }

  pub async fn create_task(
    &self,
    create: &TaskCreate
  ) -> Result<RawTask, ApiError> {
    let response = Request::post(
      &self.url("/tasks")
    )
    .json(create)
    .map_err(transport)?
    .send()
    .await
    .map_err(transport)?;
    decode(response).await
  }

  pub async fn update_task(
    &self,
    id: &str,
    patch: &TaskPatch
  ) -> Result<RawTask, ApiError> {
    let response = Request::patch(
      &self
        .url(&format!("/tasks/{id}"))
    )
    .json(patch)
    .map_err(transport)?
    .send()
    .await
    .map_err(transport)?;
    decode(response).await
  }

  pub async fn delete_task(
    &self,
    id: &str
  ) -> Result<(), ApiError> {
    let response = Request::delete(
      &self
        .url(&format!("/tasks/{id}"))
    )
    .send()
    .await
    .map_err(transport)?;

    if !response.ok() {
      return Err(
        status_error(response).await
      );
    }
    Ok(())
  }

  pub async fn insights(
    &self
  ) -> Result<InsightsSnapshot, ApiError>
  {
    let response = Request::get(
      &self.url("/insights")
    )
    .send()
    .await
    .map_err(transport)?;
    decode(response).await
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}{}",
      self.base_url, path
    )
  }
}

fn transport(
  error: gloo::net::Error
) -> ApiError {
  ApiError::Transport(
    error.to_string()
  )
}

async fn decode<T>(
  response: Response
) -> Result<T, ApiError>
where
  T: DeserializeOwned
{
  if !response.ok() {
    return Err(
      status_error(response).await
    );
  }

  response.json::<T>().await.map_err(
    |error| {
      ApiError::Decode(
        error.to_string()
      )
    }
  )
}

async fn status_error(
  response: Response
) -> ApiError {
  let status = response.status();
  let message = match response
    .text()
    .await
  {
    | Ok(body) => {
      serde_json::from_str::<ErrorBody>(
        &body
      )
      .ok()
      .and_then(|body| body.message)
    }
    | Err(_) => None
  };

  ApiError::Status {
    status,
    message
  }
}
