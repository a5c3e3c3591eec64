use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlInputElement};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
    Search,
    Tel,
}

impl InputType {
    fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Password => "password",
            InputType::Search => "search",
            InputType::Tel => "tel",
        }
    }
}

#[derive(PartialEq, Properties)]
pub struct Props {
    pub id: String,
    #[prop_or_default]
    pub name: String,
    #[prop_or_default]
    pub placeholder: String,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub input_type: InputType,
    #[prop_or_default]
    pub value: String,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub invalid: bool,
    pub on_change: Callback<String>,
}

#[function_component(InputText)]
pub fn input_text(props: &Props) -> Html {
    let on_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |event: InputEvent| {
            let target: EventTarget = event.target().expect("Fail to cast to EventTarget");
            on_change.emit(target.unchecked_into::<HtmlInputElement>().value());
        })
    };

    let class = if props.invalid {
        classes!(props.class.clone(), "is-invalid")
    } else {
        props.class.clone()
    };

    html! {
        <input
            id={props.id.clone()}
            name={props.name.clone()}
            type={props.input_type.as_str()}
            placeholder={props.placeholder.clone()}
            value={props.value.clone()}
            required={props.required}
            class={class}
            oninput={on_input} />
    }
}
