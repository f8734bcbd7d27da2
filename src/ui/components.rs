/// Reusable UI components

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::issue_data::IssueRecord;

#[derive(Properties, PartialEq)]
pub struct FieldInputProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub oninput: Callback<String>,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or(false)]
    pub disabled: bool,
}

/// Labelled single-line text input reporting its value on every keystroke
#[function_component(FieldInput)]
pub fn field_input(props: &FieldInputProps) -> Html {
    let oninput = {
        let callback = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                callback.emit(input.value());
            }
        })
    };

    html! {
        <label class="field-input">
            <span class="field-label">{props.label.clone()}</span>
            <input
                class="pf-v5-c-form-control"
                type="text"
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                {oninput}
            />
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct RecordListProps {
    pub records: Vec<IssueRecord>,
}

#[function_component(RecordList)]
pub fn record_list(props: &RecordListProps) -> Html {
    if props.records.is_empty() {
        return html! {};
    }

    html! {
        <div class="records-container">
            <h2 class="records-title">{format!("{} issues", props.records.len())}</h2>
            <ul class="records-box">
                {for props.records.iter().map(|record| html! {
                    <li class="record-item">
                        <span class="record-id">{format!("#{}", record.id)}</span>
                        <span class="record-subject">{&record.subject}</span>
                        if !record.status.is_empty() {
                            <span class="record-status">{&record.status}</span>
                        }
                    </li>
                })}
            </ul>
        </div>
    }
}
