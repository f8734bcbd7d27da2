/// Popup UI for Redmine Formatter

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::*;
use crate::issue_data::IssueRecord;
use crate::links::same_site;
use crate::messages::{Request, Response};
use crate::settings::Settings;
use crate::template::{format_records, records_to_json};
use crate::ui::bridge::{active_tab, load_settings, save_settings, send_request};
use crate::ui::components::{FieldInput, RecordList};

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Success(String),
    Error(String),
}

#[derive(Clone, PartialEq)]
enum Panel {
    Format,
    Batch,
    Settings,
}

#[derive(Clone, Copy, PartialEq)]
enum OutputKind {
    Template,
    Json,
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Idle);
    let settings = use_state(Settings::default);
    let panel = use_state(|| Panel::Format);
    let records = use_state(Vec::<IssueRecord>::new);
    let output = use_state(String::new);
    let batch_value = use_state(String::new);
    let site_url_input = use_state(String::new);
    let site_warning = use_state(|| None::<String>);

    // Load settings and check the active tab on mount
    {
        let settings = settings.clone();
        let site_url_input = site_url_input.clone();
        let site_warning = site_warning.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let loaded = load_settings().await;
                site_url_input.set(loaded.site_url.clone());

                match active_tab().await {
                    Ok(tab) if !same_site(&tab.url, &loaded.site_url) => {
                        site_warning.set(Some(format!("This tab is not on {}", loaded.site_url)));
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("{}", e),
                }

                settings.set(loaded);
            });
            || ()
        });
    }

    let on_format = {
        let state = state.clone();
        let settings = settings.clone();
        let records = records.clone();
        let output = output.clone();

        move |kind: OutputKind| {
            let state = state.clone();
            let settings = settings.clone();
            let records = records.clone();
            let output = output.clone();

            Callback::from(move |_| {
                let state = state.clone();
                let template = settings.effective_template().to_string();
                let records = records.clone();
                let output = output.clone();

                state.set(AppState::Loading("Reading issues...".to_string()));

                spawn_local(async move {
                    match fetch_records().await {
                        Ok(data) => {
                            let text = match kind {
                                OutputKind::Template => Ok(format_records(&data, &template)),
                                OutputKind::Json => records_to_json(&data)
                                    .map_err(|e| format!("Failed to render JSON: {}", e)),
                            };
                            match text {
                                Ok(text) => {
                                    output.set(text);
                                    records.set(data);
                                    state.set(AppState::Idle);
                                }
                                Err(e) => state.set(AppState::Error(e)),
                            }
                        }
                        Err(e) => state.set(AppState::Error(e)),
                    }
                });
            })
        }
    };

    let on_template_input = {
        let settings = settings.clone();
        Callback::from(move |template: String| {
            let mut updated = (*settings).clone();
            updated.template = template;
            persist(&updated);
            settings.set(updated);
        })
    };

    let on_toggle_visibility = {
        let state = state.clone();
        let settings = settings.clone();

        Callback::from(move |e: Event| {
            let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
            let mut updated = (*settings).clone();
            updated.show_only_selected = checked;
            persist(&updated);
            settings.set(updated);

            let state = state.clone();
            spawn_local(async move {
                let request = Request::ToggleVisibility { show_only_selected: checked };
                if let Err(e) = send_request(&request).await {
                    state.set(AppState::Error(e));
                }
            });
        })
    };

    let on_batch_field_input = {
        let settings = settings.clone();
        Callback::from(move |field: String| {
            let mut updated = (*settings).clone();
            updated.batch_field = field;
            persist(&updated);
            settings.set(updated);
        })
    };

    let on_batch_value_input = {
        let batch_value = batch_value.clone();
        Callback::from(move |value: String| batch_value.set(value))
    };

    let on_batch = {
        let state = state.clone();
        let settings = settings.clone();
        let batch_value = batch_value.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let key = settings.batch_field.trim().to_string();
            let value = batch_value.trim().to_string();

            if key.is_empty() || value.is_empty() {
                state.set(AppState::Error("Enter both a field and a value".to_string()));
                return;
            }

            state.set(AppState::Loading(format!("Setting {} to {}...", key, value)));

            spawn_local(async move {
                match send_request(&Request::BatchUpdate { key, value }).await {
                    Ok(Response::Outcome { success: true, .. }) => {
                        state.set(AppState::Success("Batch update finished".to_string()));
                    }
                    Ok(Response::Outcome { error, .. }) => {
                        let message = error.unwrap_or_else(|| "Unknown error".to_string());
                        state.set(AppState::Error(format!("Batch update failed: {}", message)));
                    }
                    Ok(Response::Data { .. }) => {
                        state.set(AppState::Error("Unexpected response from the page".to_string()));
                    }
                    Err(e) => state.set(AppState::Error(e)),
                }
            });
        })
    };

    let on_site_url_input = {
        let site_url_input = site_url_input.clone();
        Callback::from(move |value: String| site_url_input.set(value))
    };

    let on_site_url_save = {
        let state = state.clone();
        let settings = settings.clone();
        let site_url_input = site_url_input.clone();

        Callback::from(move |_| {
            let mut updated = (*settings).clone();
            if updated.set_site_url(&site_url_input) {
                site_url_input.set(updated.site_url.clone());
                persist(&updated);
                settings.set(updated);
                state.set(AppState::Success("Site URL saved".to_string()));
            } else {
                state.set(AppState::Error("Site URL must be an http(s) address".to_string()));
            }
        })
    };

    let on_reset = {
        let settings = settings.clone();
        let site_url_input = site_url_input.clone();
        let state = state.clone();

        Callback::from(move |_| {
            let defaults = Settings::default();
            site_url_input.set(defaults.site_url.clone());
            persist(&defaults);
            settings.set(defaults);
            state.set(AppState::Idle);
        })
    };

    let is_busy = matches!(*state, AppState::Loading(_));

    let on_panel_click = {
        let panel = panel.clone();
        move |target: Panel| {
            let panel = panel.clone();
            Callback::from(move |_| {
                panel.set(target.clone());
            })
        }
    };

    let tab_class = |target: Panel| {
        if *panel == target { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Redmine Formatter"}</h1>

            if let Some(warning) = (*site_warning).clone() {
                <Alert r#type={AlertType::Warning} title={warning} inline={true}>
                </Alert>
            }

            // Panel navigation
            <div class="pf-v5-c-tabs tabs-nav">
                <ul class="pf-v5-c-tabs__list">
                    <li class={tab_class(Panel::Format)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_panel_click(Panel::Format)}>
                            <span class="pf-v5-c-tabs__item-text">{"Format"}</span>
                        </button>
                    </li>
                    <li class={tab_class(Panel::Batch)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_panel_click(Panel::Batch)}>
                            <span class="pf-v5-c-tabs__item-text">{"Batch update"}</span>
                        </button>
                    </li>
                    <li class={tab_class(Panel::Settings)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_panel_click(Panel::Settings)}>
                            <span class="pf-v5-c-tabs__item-text">{"Settings"}</span>
                        </button>
                    </li>
                </ul>
            </div>

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Success(msg) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Success} title={msg.clone()} inline={true}>
                        </Alert>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            <div class="tab-pane-content">
                {match &*panel {
                    Panel::Format => html! {
                        <div class="flex-column-gap">
                            <FieldInput
                                label="Template"
                                value={settings.template.clone()}
                                placeholder={crate::template::DEFAULT_TEMPLATE}
                                oninput={on_template_input}
                            />
                            <label class="switch-row">
                                <input
                                    type="checkbox"
                                    checked={settings.show_only_selected}
                                    onchange={on_toggle_visibility}
                                />
                                <span>{"Show only selected rows"}</span>
                            </label>
                            <div class="button-row">
                                <Button onclick={on_format(OutputKind::Template)} disabled={is_busy} variant={ButtonVariant::Primary}>
                                    {"Format"}
                                </Button>
                                <Button onclick={on_format(OutputKind::Json)} disabled={is_busy} variant={ButtonVariant::Secondary}>
                                    {"JSON"}
                                </Button>
                            </div>
                            <textarea class="pf-v5-c-form-control result-area" readonly=true rows="8" value={(*output).clone()} />
                            <RecordList records={(*records).clone()} />
                        </div>
                    },
                    Panel::Batch => html! {
                        <div class="flex-column-gap">
                            <FieldInput
                                label="Field"
                                value={settings.batch_field.clone()}
                                placeholder="狀態"
                                oninput={on_batch_field_input}
                            />
                            <FieldInput
                                label="New value"
                                value={(*batch_value).clone()}
                                placeholder="已解決"
                                oninput={on_batch_value_input}
                            />
                            <Button onclick={on_batch} disabled={is_busy} variant={ButtonVariant::Primary} block={true}>
                                {"Apply to selected issues"}
                            </Button>
                        </div>
                    },
                    Panel::Settings => html! {
                        <div class="flex-column-gap">
                            <FieldInput
                                label="Redmine site URL"
                                value={(*site_url_input).clone()}
                                placeholder={crate::settings::DEFAULT_SITE_URL}
                                oninput={on_site_url_input}
                            />
                            <div class="button-row">
                                <Button onclick={on_site_url_save} variant={ButtonVariant::Primary}>
                                    {"Save"}
                                </Button>
                                <Button onclick={on_reset} variant={ButtonVariant::Secondary}>
                                    {"Reset to defaults"}
                                </Button>
                            </div>
                        </div>
                    },
                }}
            </div>

            <p class="footer-popup">
                {"Redmine Formatter v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

async fn fetch_records() -> Result<Vec<IssueRecord>, String> {
    match send_request(&Request::GetSelectedData).await? {
        Response::Data { data } => Ok(data),
        Response::Outcome { .. } => Err("Unexpected response from the page".to_string()),
    }
}

fn persist(settings: &Settings) {
    let settings = settings.clone();
    spawn_local(async move {
        save_settings(&settings).await;
    });
}
