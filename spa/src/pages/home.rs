use client::routes::home_entries;
use yew::prelude::*;

use crate::app::use_app_context;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let context = use_app_context();
    let greeting = context
        .session
        .user()
        .map(|user| format!("Welcome, {}", user.full_name))
        .unwrap_or_else(|| "Welcome".to_string());

    let cards = home_entries(context.session.user_type()).into_iter().map(|entry| {
        html! {
            <div class="col-md-4 mb-3">
                <div class="card h-100">
                    <div class="card-body">
                        <h5 class="card-title">{entry.title}</h5>
                        <p class="card-text text-muted">{entry.description}</p>
                        <a href={entry.path} class="btn btn-outline-primary" onclick={context.link(entry.path)}>{"Open"}</a>
                    </div>
                </div>
            </div>
        }
    });

    html! {
        <div class="container">
            <h2 class="mb-4">{greeting}</h2>
            <div class="row">
                { for cards }
            </div>
        </div>
    }
}
