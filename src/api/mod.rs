use crate::models::{SayHiRequest, UserInfo};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
    /// Backend answered with an HTML page (session expired); the page is being reloaded.
    HtmlReload,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }

    fn html_reload() -> Self {
        Self {
            kind: ApiErrorKind::HtmlReload,
            message: "Received an HTML page, reloading".to_string(),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Dev-server proxy prefix; `/proxy` is stripped before forwarding to the backend.
pub(crate) const DEFAULT_API_URL: &str = "/proxy/api/v1";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        // `window.ENV.API_URL` wins over the lowercase `window.ENV.api_url`.
        if let Some(env) = web_sys::window().and_then(|w| w.get("ENV")) {
            if !env.is_undefined() && env.is_object() {
                for key in ["API_URL", "api_url"] {
                    if let Ok(v) = js_sys::Reflect::get(&env, &key.into()) {
                        if let Some(url) = v.as_string() {
                            return Self { api_url: url };
                        }
                    }
                }
            }
        }

        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// True when a successful response is really an HTML document.
///
/// JSON bodies only count when they decode to a bare string.
pub(crate) fn is_html_page(body: &str) -> bool {
    if !body.contains("<html>") {
        return false;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => v.as_str().is_some_and(|s| s.contains("<html>")),
        Err(_) => true,
    }
}

fn reload_page() {
    if let Some(w) = web_sys::window() {
        if let Err(e) = w.location().reload() {
            leptos::logging::error!("reload failed: {e:?}");
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    pub(crate) fn user_info_url(&self, name: &str) -> String {
        format!(
            "{}/user/info?name={}",
            self.base_url,
            urlencoding::encode(name)
        )
    }

    pub(crate) fn hello_url(&self) -> String {
        format!("{}/user/hello", self.base_url)
    }

    async fn send<T: DeserializeOwned>(req: reqwest::RequestBuilder) -> ApiResult<T> {
        let res = req.send().await.map_err(|e| {
            leptos::logging::error!("request failed: {e}");
            ApiError::network(e)
        })?;

        let status = res.status();
        let body = res.text().await.map_err(ApiError::network)?;

        if !status.is_success() {
            let e = ApiError::http(status, body, "Request failed");
            leptos::logging::error!("{e}");
            return Err(e);
        }

        if is_html_page(&body) {
            leptos::logging::warn!("html response from api, reloading page");
            reload_page();
            return Err(ApiError::html_reload());
        }

        serde_json::from_str(&body).map_err(ApiError::parse)
    }

    pub async fn who(&self, name: &str) -> ApiResult<UserInfo> {
        let req = reqwest::Client::new().get(self.user_info_url(name));
        Self::send(req).await
    }

    pub async fn say_hi(&self, name: &str, message: &str) -> ApiResult<serde_json::Value> {
        let req = reqwest::Client::new()
            .post(self.hello_url())
            .json(&SayHiRequest {
                name: name.to_string(),
                message: message.to_string(),
            });
        Self::send(req).await
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn set_env(env: &JsValue) {
        let w = web_sys::window().expect("window");
        js_sys::Reflect::set(&w, &"ENV".into(), env).expect("set window.ENV");
    }

    #[wasm_bindgen_test]
    fn test_env_config_defaults_to_proxy() {
        set_env(&JsValue::UNDEFINED);
        assert_eq!(EnvConfig::new().api_url, DEFAULT_API_URL);
    }

    #[wasm_bindgen_test]
    fn test_env_config_prefers_upper_case_key() {
        let env = js_sys::Object::new();
        js_sys::Reflect::set(&env, &"api_url".into(), &"http://lower".into()).expect("set");
        set_env(&env);
        assert_eq!(EnvConfig::new().api_url, "http://lower");

        js_sys::Reflect::set(&env, &"API_URL".into(), &"http://upper".into()).expect("set");
        assert_eq!(ApiClient::from_env().base_url, "http://upper");

        set_env(&JsValue::UNDEFINED);
    }
}
