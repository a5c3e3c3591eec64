use yew::prelude::*;

use crate::components::atoms::input_text::{InputText, InputType};

#[derive(PartialEq, Properties)]
pub struct Props {
    /// Term the grid is currently filtered by.
    pub value: String,
    #[prop_or(AttrValue::Static("Search"))]
    pub placeholder: AttrValue,
    pub on_search: Callback<String>,
}

#[function_component(SearchBar)]
pub fn search_bar(props: &Props) -> Html {
    let input = use_state(|| props.value.clone());

    {
        let input = input.clone();
        use_effect_with(props.value.clone(), move |value| {
            input.set(value.clone());
        });
    }

    let on_input_search_change = {
        let input = input.clone();
        Callback::from(move |text: String| input.set(text))
    };

    let on_submit = {
        let input = input.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_search.emit(input.trim().to_string());
        })
    };

    html! {
        <form onsubmit={on_submit} class="d-flex flex-grow-1">
            <InputText
                id="grid-search"
                name="search"
                placeholder={props.placeholder.to_string()}
                input_type={InputType::Search}
                class={classes!("form-control", "form-control-sm", "me-2")}
                value={(*input).clone()}
                on_change={on_input_search_change} />
            <input class="btn btn-sm btn-outline-success" type="submit" value="Search" />
        </form>
    }
}
