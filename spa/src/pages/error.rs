use client::error_page::error_page_copy;
use client::routes::HOME_PATH;
use yew::prelude::*;

use crate::app::use_app_context;

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct Props {
    pub code: String,
}

#[function_component(ErrorPage)]
pub fn error_page(props: &Props) -> Html {
    let context = use_app_context();
    let copy = error_page_copy(&props.code);

    {
        let client = context.client.clone();
        use_effect_with(copy.is_none(), move |unknown| {
            if *unknown {
                client.navigator().navigate(HOME_PATH);
            }
        });
    }

    let Some(copy) = copy else {
        return html! {};
    };

    html! {
        <div class="container text-center mt-5">
            <h1 class="display-1 fw-bold">{copy.code}</h1>
            <h4 class="text-muted">{copy.title}</h4>
            <h2 class="mt-4">{copy.headline}</h2>
            <p class="lead">{copy.description}</p>
            <a class="btn btn-primary mt-3" href={HOME_PATH} onclick={context.link(HOME_PATH)}>{"Back to home"}</a>
        </div>
    }
}
