use yew::prelude::*;

use crate::components::atoms::select::{Select, SelectOption};
use crate::components::composite::modal::Modal;

#[derive(PartialEq, Properties)]
pub struct Props {
    /// Label of the single select filter.
    pub label: AttrValue,
    pub options: Vec<SelectOption>,
    pub selected: Option<String>,
    pub on_apply: Callback<Option<String>>,
    pub on_close: Callback<()>,
}

#[function_component(FiltersModal)]
pub fn filters_modal(props: &Props) -> Html {
    let pending = use_state(|| props.selected.clone());

    let on_change = {
        let pending = pending.clone();
        Callback::from(move |value: String| {
            pending.set(Some(value).filter(|v| !v.is_empty()));
        })
    };

    let on_reset = {
        let on_apply = props.on_apply.clone();
        Callback::from(move |_: MouseEvent| on_apply.emit(None))
    };

    let on_apply = {
        let pending = pending.clone();
        let on_apply = props.on_apply.clone();
        Callback::from(move |_: MouseEvent| on_apply.emit((*pending).clone()))
    };

    html! {
        <Modal
            title="Filters"
            on_close={props.on_close.clone()}
            footer={html! {
                <>
                    <button class="btn btn-outline-secondary" onclick={on_reset}>{"Reset"}</button>
                    <button class="btn btn-primary" onclick={on_apply}>{"Apply"}</button>
                </>
            }}>
            <label for="filter-select" class="form-label">{props.label.clone()}</label>
            <Select
                id="filter-select"
                class="form-select"
                options={props.options.clone()}
                selected={(*pending).clone()}
                placeholder={Some("All".to_string())}
                on_change={on_change} />
        </Modal>
    }
}

#[derive(PartialEq, Properties)]
pub struct BubbleProps {
    pub label: AttrValue,
    pub on_clear: Callback<()>,
}

/// Chip for an applied filter, clicking the cross removes it.
#[function_component(FilterBubble)]
pub fn filter_bubble(props: &BubbleProps) -> Html {
    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };
    html! {
        <span class="badge rounded-pill text-bg-light border me-2 mb-2">
            {props.label.clone()}
            <button type="button" class="btn-close btn-close-sm ms-2" aria-label="Remove filter" onclick={on_clear}></button>
        </span>
    }
}
