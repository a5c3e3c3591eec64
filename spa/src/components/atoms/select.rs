use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlSelectElement};
use yew::prelude::*;

/// `(value, label)` pair.
pub type SelectOption = (String, String);

#[derive(Properties, PartialEq)]
pub struct SelectProps {
    #[prop_or_default]
    pub id: String,
    #[prop_or_default]
    pub name: String,
    #[prop_or_default]
    pub class: String,
    pub options: Vec<SelectOption>,
    #[prop_or_default]
    pub selected: Option<String>,
    /// Leading empty option, selected when nothing else is.
    #[prop_or_default]
    pub placeholder: Option<String>,
    #[prop_or_default]
    pub on_change: Callback<String>,
}

#[function_component(Select)]
pub fn select(props: &SelectProps) -> Html {
    let on_change = {
        let on_change_cb = props.on_change.clone();
        Callback::from(move |event: Event| {
            let target: EventTarget = event.target().expect("Fail to cast to EventTarget");
            let select_element = target.unchecked_into::<HtmlSelectElement>();
            on_change_cb.emit(select_element.value());
        })
    };

    let placeholder_html = props.placeholder.as_ref().map(|label| {
        html! {
            <option value="" selected={props.selected.is_none()}>{label}</option>
        }
    });

    let options_html = props.options.iter().map(|(value, label)| {
        let is_selected = props.selected.as_deref() == Some(value.as_str());
        html! {
            <option value={value.clone()} selected={is_selected}>
                {label}
            </option>
        }
    });

    html! {
        <select
            id={props.id.clone()}
            name={props.name.clone()}
            class={if props.class.is_empty() {
                "form-select form-select-sm".to_string()
            } else {
                props.class.clone()
            }}
            onchange={on_change}>
            { for placeholder_html }
            { for options_html }
        </select>
    }
}
