use crate::pages::HomePage;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // Leptos CSR requires the `csr` feature on `leptos`.
    view! { <HomePage /> }
}
