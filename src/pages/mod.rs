use crate::api::{ApiError, ApiErrorKind};
use crate::components::hooks::use_scroll_load;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardItem,
    CardList, CardTitle, Input, Label, ScrollArea, ScrollAreaStatus, Spinner,
};
use crate::scroll_load::{ScrollDirection, ScrollLoadOptions};
use crate::state::AppContext;
use crate::util::{feed_page, TopHits, FEED_PAGE_SIZE};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn report_error(error: RwSignal<Option<String>>, e: ApiError) {
    // The page is already reloading.
    if e.kind != ApiErrorKind::HtmlReload {
        error.set(Some(e.to_string()));
    }
}

#[component]
fn ErrorLine(error: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
            <div class="rounded-md border border-destructive/30 px-3 py-2 text-xs text-destructive">
                {move || error.get().unwrap_or_default()}
            </div>
        </Show>
    }
}

#[component]
pub fn LookupCard() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let name: RwSignal<String> = RwSignal::new(String::new());
    let result: RwSignal<Option<String>> = RwSignal::new(None);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let name_val = name.get_untracked();
        let api_client = app_state.0.api_client.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.who(&name_val).await {
                Ok(info) => {
                    result.set(Some(
                        serde_json::to_string_pretty(&info.extra).unwrap_or_default(),
                    ));
                }
                Err(e) => {
                    result.set(None);
                    report_error(error, e);
                }
            }
            loading.set(false);
        });
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Who"</CardTitle>
                <CardDescription>"Look up a user by name."</CardDescription>
            </CardHeader>
            <CardContent>
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <div class="flex flex-col gap-2">
                        <Label html_for="who_name">"Name"</Label>
                        <Input id="who_name" placeholder="alice" bind_value=name required=true />
                    </div>
                    <ErrorLine error=error />
                    <Button attr:disabled=move || loading.get()>
                        <Show when=move || loading.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        "Look up"
                    </Button>
                    <Show when=move || result.get().is_some() fallback=|| ().into_view()>
                        <pre class="overflow-auto rounded-md bg-muted p-3 text-xs">
                            {move || result.get().unwrap_or_default()}
                        </pre>
                    </Show>
                </form>
            </CardContent>
        </Card>
    }
}

#[component]
pub fn GreetingCard() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let name: RwSignal<String> = RwSignal::new(String::new());
    let message: RwSignal<String> = RwSignal::new(String::new());
    let sent: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let name_val = name.get_untracked();
        let message_val = message.get_untracked();
        let api_client = app_state.0.api_client.get_untracked();

        loading.set(true);
        sent.set(false);
        error.set(None);

        spawn_local(async move {
            match api_client.say_hi(&name_val, &message_val).await {
                Ok(_) => sent.set(true),
                Err(e) => report_error(error, e),
            }
            loading.set(false);
        });
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Say hi"</CardTitle>
                <CardDescription>"Send a greeting."</CardDescription>
            </CardHeader>
            <CardContent>
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <div class="flex flex-col gap-2">
                        <Label html_for="hi_name">"Name"</Label>
                        <Input id="hi_name" placeholder="alice" bind_value=name required=true />
                    </div>
                    <div class="flex flex-col gap-2">
                        <Label html_for="hi_message">"Message"</Label>
                        <Input id="hi_message" placeholder="hello" bind_value=message />
                    </div>
                    <ErrorLine error=error />
                    <div class="flex items-center gap-3">
                        <Button attr:disabled=move || loading.get()>
                            <Show when=move || loading.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            "Send"
                        </Button>
                        <Show when=move || sent.get() fallback=|| ().into_view()>
                            <span class="text-xs text-muted-foreground">"Sent."</span>
                        </Show>
                    </div>
                </form>
            </CardContent>
        </Card>
    }
}

/// Infinite list: a page is appended whenever the viewport nears its bottom.
#[component]
pub fn FeedCard() -> impl IntoView {
    let items = RwSignal::new(feed_page(0, FEED_PAGE_SIZE));
    let next_page: RwSignal<u32> = RwSignal::new(1);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let exhausted: RwSignal<bool> = RwSignal::new(false);
    let top_hits: RwSignal<TopHits> = RwSignal::new(TopHits::default());
    let feed_ref: NodeRef<html::Div> = NodeRef::new();

    // The monitor fires on every event inside the band; `loading` keeps it to one page per trigger.
    let options = ScrollLoadOptions::new()
        .distance(40)
        .bi_direction(true)
        .method(move |direction, _| match direction {
            ScrollDirection::Down => {
                if loading.get_untracked() || exhausted.get_untracked() {
                    return;
                }
                loading.set(true);
                let page = next_page.get_untracked();

                spawn_local(async move {
                    let batch = feed_page(page, FEED_PAGE_SIZE);
                    if batch.is_empty() {
                        exhausted.set(true);
                    } else {
                        items.update(|v| v.extend(batch));
                        next_page.set(page + 1);
                    }
                    loading.set(false);
                });
            }
            ScrollDirection::Up => top_hits.update(|h| h.record()),
        });

    let bind_error = use_scroll_load(feed_ref, options);

    let on_reset = move |_| {
        items.set(feed_page(0, FEED_PAGE_SIZE));
        next_page.set(1);
        exhausted.set(false);
        let el = feed_ref.get_untracked();
        let was_scrolled = el.as_ref().is_some_and(|el| el.scroll_top() > 0);
        top_hits.update(|h| h.reset(was_scrolled));
        if let Some(el) = el {
            el.set_scroll_top(0);
        }
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Feed"</CardTitle>
                <CardDescription>
                    {move || format!("{} loaded, top reached {} times", items.get().len(), top_hits.get().count())}
                </CardDescription>
            </CardHeader>
            <CardContent class="flex flex-col gap-3">
                <Show when=move || bind_error.get().is_some() fallback=|| ().into_view()>
                    <div class="text-xs text-destructive">
                        {move || bind_error.get().map(|e| e.to_string()).unwrap_or_default()}
                    </div>
                </Show>
                <ScrollArea class="h-72" node_ref=feed_ref>
                    <CardList class="p-3">
                        <For each=move || items.get() key=|item| item.id let:item>
                            <CardItem>{item.title}</CardItem>
                        </For>
                    </CardList>
                    <Show when=move || loading.get() fallback=|| ().into_view()>
                        <ScrollAreaStatus>
                            <Spinner />
                            "Loading more..."
                        </ScrollAreaStatus>
                    </Show>
                    <Show when=move || exhausted.get() fallback=|| ().into_view()>
                        <ScrollAreaStatus>"No more items."</ScrollAreaStatus>
                    </Show>
                </ScrollArea>
                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=on_reset>
                    "Reset"
                </Button>
            </CardContent>
        </Card>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex w-full max-w-[720px] flex-col gap-4 px-4 py-8">
                <div class="space-y-1">
                    <h1 class="text-xl font-semibold">"Scroll load"</h1>
                    <p class="text-xs text-muted-foreground">"Demo scaffold"</p>
                </div>
                <LookupCard />
                <GreetingCard />
                <FeedCard />
            </div>
        </div>
    }
}
