/// Popup UI for the TabFlow extension

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::actions::{
    apply_suggestion, create_group, load_popup, open_tab, remove_group, suggestions_for, toggle_group,
    toggle_suggestions,
};
use crate::chrome::{ChromeStore, ChromeTabs};
use crate::config::Settings;
use crate::suggestions::{Suggestion, SuggestionAction};
use crate::tab_data::{Group, TabRecord};
use crate::ui::components::{GroupCard, SuggestionList};

#[derive(Clone, PartialEq)]
enum PopupState {
    Loading,
    Idle,
    Busy(String),
    Error(String),
}

/// Handles shared by every callback that rewrites the groups
#[derive(Clone)]
struct PopupHandles {
    state: UseStateHandle<PopupState>,
    groups: UseStateHandle<Vec<Group>>,
    suggestions: UseStateHandle<Vec<Suggestion>>,
}

impl PopupHandles {
    /// Run a group update in the background, then re-derive the suggestions
    fn run<F, Fut>(&self, message: &str, update: F)
    where
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = crate::error::Result<Vec<Group>>> + 'static,
    {
        let handles = self.clone();
        handles.state.set(PopupState::Busy(message.to_string()));

        spawn_local(async move {
            let result = match update().await {
                Ok(groups) => suggestions_for(&ChromeTabs, &groups, js_sys::Date::now())
                    .await
                    .map(|suggestions| (groups, suggestions)),
                Err(e) => Err(e),
            };

            match result {
                Ok((groups, suggestions)) => {
                    handles.groups.set(groups);
                    handles.suggestions.set(suggestions);
                    handles.state.set(PopupState::Idle);
                }
                Err(e) => {
                    log::error!("{}", e);
                    handles.state.set(PopupState::Error(e.to_string()));
                }
            }
        });
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[function_component(App)]
pub fn app() -> Html {
    let handles = PopupHandles {
        state: use_state(|| PopupState::Loading),
        groups: use_state(Vec::<Group>::new),
        suggestions: use_state(Vec::<Suggestion>::new),
    };
    let settings = use_state(Settings::default);

    // Load groups on mount
    {
        let handles = handles.clone();
        let settings = settings.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_popup(&ChromeStore, &ChromeTabs, js_sys::Date::now()).await {
                    Ok(view) => {
                        handles.groups.set(view.groups);
                        handles.suggestions.set(view.suggestions);
                        settings.set(view.settings);
                        handles.state.set(PopupState::Idle);
                    }
                    Err(e) => {
                        log::error!("Failed to load groups: {}", e);
                        handles.state.set(PopupState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    let on_new_group = {
        let handles = handles.clone();
        Callback::from(move |_: MouseEvent| {
            handles.run("Creating group...", || create_group(&ChromeStore));
        })
    };

    let on_toggle = {
        let handles = handles.clone();
        Callback::from(move |group_id: String| {
            handles.run("Saving...", move || async move { toggle_group(&ChromeStore, &group_id).await });
        })
    };

    let on_delete = {
        let handles = handles.clone();
        Callback::from(move |group_id: String| {
            if confirm("Delete this group? Tabs will remain open.") {
                handles.run("Deleting group...", move || async move { remove_group(&ChromeStore, &group_id).await });
            }
        })
    };

    let on_open = {
        let handles = handles.clone();
        Callback::from(move |record: TabRecord| {
            handles.run("Opening tab...", move || async move {
                open_tab(&ChromeStore, &ChromeTabs, &record, js_sys::Date::now()).await
            });
        })
    };

    let on_apply = {
        let handles = handles.clone();
        Callback::from(move |action: SuggestionAction| {
            handles.run("Applying suggestion...", move || {
                apply_suggestion(&ChromeStore, &ChromeTabs, action, js_sys::Date::now())
            });
        })
    };

    let on_toggle_suggestions = {
        let settings = settings.clone();
        let state = handles.state.clone();
        Callback::from(move |_: MouseEvent| {
            let settings = settings.clone();
            let state = state.clone();
            spawn_local(async move {
                match toggle_suggestions(&ChromeStore).await {
                    Ok(updated) => settings.set(updated),
                    Err(e) => state.set(PopupState::Error(format!("Failed to save settings: {}", e))),
                }
            });
        })
    };

    let is_busy = !matches!(*handles.state, PopupState::Idle | PopupState::Error(_));
    let now = js_sys::Date::now();

    html! {
        <div class="padding-20">
            <div class="popup-header">
                <h1 class="popup-title">{"TabFlow"}</h1>
                <Button onclick={on_toggle_suggestions} variant={ButtonVariant::Plain}>
                    {if settings.ai_enabled { "Hide suggestions" } else { "Show suggestions" }}
                </Button>
                <Button onclick={on_new_group} disabled={is_busy} variant={ButtonVariant::Primary}>
                    {"New Group"}
                </Button>
            </div>

            // Status display
            {match &*handles.state {
                PopupState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                PopupState::Busy(msg) => html! {
                    <p class="loading-text">{msg}</p>
                },
                PopupState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                PopupState::Idle => html! {}
            }}

            if settings.ai_enabled {
                <div class="ai-panel">
                    <SuggestionList
                        suggestions={(*handles.suggestions).clone()}
                        on_apply={on_apply}
                        disabled={is_busy}
                    />
                </div>
            }

            if handles.groups.is_empty() && *handles.state != PopupState::Loading {
                <div class="empty-state">
                    <p>{"No groups yet. Create one to get started."}</p>
                </div>
            } else {
                <div class="groups-container">
                    {for handles.groups.iter().map(|group| html! {
                        <GroupCard
                            key={group.id.clone()}
                            group={group.clone()}
                            now={now}
                            on_toggle={on_toggle.clone()}
                            on_delete={on_delete.clone()}
                            on_open={on_open.clone()}
                        />
                    })}
                </div>
            }

            <p class="footer-popup">
                {"TabFlow v0.1.0"}
            </p>
        </div>
    }
}
