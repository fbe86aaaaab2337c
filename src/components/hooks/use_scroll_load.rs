use crate::scroll_load::{bind_scroll_load, ScrollLoadError, ScrollLoadHandle, ScrollLoadOptions};
use leptos::html;
use leptos::prelude::*;

/// Hook for scroll-triggered loading on a scrollable element
///
/// Binds `options` to the element behind `node_ref` once it is mounted, and
/// detaches the listener when the owning reactive scope is disposed.
///
/// Returns an `RwSignal<Option<ScrollLoadError>>` holding the last bind failure, if any.
pub fn use_scroll_load(
    node_ref: NodeRef<html::Div>,
    options: ScrollLoadOptions,
) -> RwSignal<Option<ScrollLoadError>> {
    let error_signal = RwSignal::new(None);
    let handle = StoredValue::new_local(None::<ScrollLoadHandle>);

    Effect::new(move |_| {
        let Some(el) = node_ref.get() else {
            return;
        };

        // Replacing the stored handle detaches the previous listener.
        match bind_scroll_load(&el, options.clone()) {
            Ok(h) => {
                handle.set_value(Some(h));
                error_signal.set(None);
            }
            Err(e) => {
                leptos::logging::error!("use_scroll_load: {e}");
                handle.set_value(None);
                error_signal.set(Some(e));
            }
        }
    });

    on_cleanup(move || {
        let _ = handle.try_update_value(|h| h.take());
    });

    error_signal
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use leptos::mount::mount_to;
    use leptos::task::Executor;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    type ErrorSlot = Rc<Cell<Option<RwSignal<Option<ScrollLoadError>>>>>;

    fn host() -> web_sys::HtmlElement {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("document should exist");
        let host = document
            .create_element("div")
            .expect("create div")
            .unchecked_into::<web_sys::HtmlElement>();
        document
            .body()
            .expect("body should exist")
            .append_child(&host)
            .expect("append host");
        host
    }

    fn fire_scroll(el: &web_sys::Element) {
        let ev = web_sys::Event::new("scroll").expect("create event");
        el.dispatch_event(&ev).expect("dispatch scroll");
    }

    /// Mount a scrollable feed under `owner`, bound through the hook.
    fn mount_feed(
        owner: &Owner,
        host: &web_sys::HtmlElement,
        options: ScrollLoadOptions,
    ) -> ErrorSlot {
        let slot: ErrorSlot = Rc::new(Cell::new(None));
        let s = slot.clone();
        let host = host.clone();
        let mounted = owner.with(move || {
            mount_to(host, move || {
                let node_ref: NodeRef<html::Div> = NodeRef::new();
                s.set(Some(use_scroll_load(node_ref, options)));
                view! {
                    <div class="feed" node_ref=node_ref style="height:100px;overflow:auto">
                        <div style="height:1000px"></div>
                    </div>
                }
            })
        });
        // Unmounting is driven by `owner.cleanup()` in the tests.
        std::mem::forget(mounted);
        slot
    }

    async fn settle() {
        Executor::tick().await;
        Executor::tick().await;
    }

    #[wasm_bindgen_test]
    async fn test_hook_binds_after_mount_and_detaches_on_cleanup() {
        let _ = Executor::init_wasm_bindgen();
        let host = host();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let options = ScrollLoadOptions::new()
            .bi_direction(true)
            .method(move |_, _| c.set(c.get() + 1));

        let owner = Owner::new();
        let slot = mount_feed(&owner, &host, options);
        settle().await;

        let feed = host
            .query_selector(".feed")
            .ok()
            .flatten()
            .expect("feed should be mounted");
        fire_scroll(&feed);
        assert_eq!(count.get(), 1);

        let error = slot.get().expect("hook should have run");
        assert_eq!(error.get_untracked(), None);

        owner.cleanup();
        fire_scroll(&feed);
        assert_eq!(count.get(), 1);

        host.remove();
    }

    #[wasm_bindgen_test]
    async fn test_hook_publishes_bind_error() {
        let _ = Executor::init_wasm_bindgen();
        let host = host();

        let owner = Owner::new();
        let slot = mount_feed(&owner, &host, ScrollLoadOptions::new());
        settle().await;

        let error = slot.get().expect("hook should have run");
        assert_eq!(error.get_untracked(), Some(ScrollLoadError::MissingCallback));

        owner.cleanup();
        host.remove();
    }
}
