use leptos::html;
use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::*;

mod components {
    use super::*;
    clx! {ScrollAreaStatus, div, "flex items-center justify-center gap-2 py-3 text-xs text-muted-foreground"}
}

pub use components::*;

/* ========================================================== */
/*                     ✨ COMPONENTS ✨                       */
/* ========================================================== */

/// Bounded scroll container. `node_ref` points at the element that actually
/// scrolls, so `use_scroll_load` can be bound to it.
#[component]
pub fn ScrollArea(
    children: Children,
    #[prop(into, optional)] class: String,
    #[prop(optional)] node_ref: NodeRef<html::Div>,
) -> impl IntoView {
    let merged_class = tw_merge!("relative overflow-hidden rounded-md border", class);

    view! {
        <div data-name="ScrollArea" class=merged_class>
            <div
                data-name="ScrollAreaViewport"
                class="size-full rounded-[inherit] overflow-auto outline-none"
                node_ref=node_ref
            >
                {children()}
            </div>
        </div>
    }
}
