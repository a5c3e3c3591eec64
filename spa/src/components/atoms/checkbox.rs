use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub checked: bool,
    #[prop_or_default]
    pub label: Option<String>,
    pub on_toggle: Callback<bool>,
}

#[function_component(Checkbox)]
pub fn checkbox(props: &Props) -> Html {
    let on_change = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |event: Event| {
            let target: EventTarget = event.target().expect("Fail to cast to EventTarget");
            on_toggle.emit(target.unchecked_into::<HtmlInputElement>().checked());
        })
    };

    html! {
        <input
            class="form-check-input"
            type="checkbox"
            aria-label={props.label.clone().unwrap_or_default()}
            checked={props.checked}
            onchange={on_change} />
    }
}
