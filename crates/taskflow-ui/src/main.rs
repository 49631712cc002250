mod api;
mod app;
mod components;

use api::ApiClient;

/// Overridable at build time; the hosted backend is the fallback.
const DEFAULT_API_URL: &str =
  "https://task-tracker-backend-umar.onrender.com";

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  let base_url =
    option_env!("TASKFLOW_API_URL")
      .unwrap_or(DEFAULT_API_URL);

  tracing::info!(
    %base_url,
    "starting TaskFlow frontend"
  );

  let mount = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.get_element_by_id("app")
    })
    .expect(
      "missing #app mount element"
    );

  yew::Renderer::<app::App>::with_root_and_props(
    mount,
    app::AppProps {
      api: ApiClient::new(base_url)
    }
  )
  .render();
}
