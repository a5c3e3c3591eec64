use client::grid::{page_items, parse_go_to_page, PageItem};
use yew::prelude::*;

use crate::components::atoms::input_text::InputText;

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct Props {
    pub current_page: u32,
    pub total_pages: u32,
    pub on_go_to: Callback<u32>,
}

#[function_component(PaginationControls)]
pub fn pagination_controls(props: &Props) -> Html {
    let go_to_input = use_state(String::default);
    let current = props.current_page;
    let total = props.total_pages.max(1);

    let page_link = |page: u32, label: Html, disabled: bool| {
        let on_go_to = props.on_go_to.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_go_to.emit(page);
        });
        let classes = classes!(
            "page-item",
            disabled.then_some("disabled"),
            (page == current && !disabled).then_some("active")
        );
        html! {
            <li class={classes}>
                <a class="page-link" href="#" onclick={onclick}>{label}</a>
            </li>
        }
    };

    let items = page_items(current, total).into_iter().map(|item| match item {
        PageItem::Page(page) => page_link(page, html! { {page} }, false),
        PageItem::Ellipsis => html! {
            <li class="page-item disabled"><span class="page-link">{item.to_string()}</span></li>
        },
    });

    let on_go_to_change = {
        let go_to_input = go_to_input.clone();
        Callback::from(move |text: String| go_to_input.set(text))
    };

    let on_go_to_submit = {
        let go_to_input = go_to_input.clone();
        let on_go_to = props.on_go_to.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if let Some(page) = parse_go_to_page(&go_to_input, total) {
                on_go_to.emit(page);
                go_to_input.set(String::new());
            }
        })
    };

    html! {
        <nav aria-label="Grid pagination" class="d-flex align-items-center gap-3">
            <ul class="pagination pagination-sm mb-0">
                { page_link(current.saturating_sub(1).max(1), html! { <span aria-hidden="true">{"«"}</span> }, current <= 1) }
                { for items }
                { page_link((current + 1).min(total), html! { <span aria-hidden="true">{"»"}</span> }, current >= total) }
            </ul>
            <form onsubmit={on_go_to_submit} class="d-flex align-items-center gap-1">
                <label for="go-to-page" class="text-muted small text-nowrap">{"Go to page"}</label>
                <InputText
                    id="go-to-page"
                    class={classes!("form-control", "form-control-sm")}
                    value={(*go_to_input).clone()}
                    on_change={on_go_to_change} />
            </form>
        </nav>
    }
}
