use client::routes::{available_routes, CHANGE_PASSWORD_PATH, COUNTING_PATH, SURVEYS_PATH, USERS_PATH};
use yew::prelude::*;

use crate::app::use_app_context;
use crate::components::composite::modal::Modal;

const MENU: [(&str, &str); 3] = [
    (SURVEYS_PATH, "Surveys"),
    (USERS_PATH, "Users"),
    (COUNTING_PATH, "Counting"),
];

#[function_component(NavigationBar)]
pub fn navigation_bar() -> Html {
    let context = use_app_context();
    let confirm_logout = use_state(|| false);

    let reachable: Vec<&str> = available_routes(&context.session)
        .iter()
        .map(|route| route.path)
        .collect();

    let links = MENU
        .iter()
        .filter(|(path, _)| reachable.contains(path))
        .map(|&(path, label)| {
            let classes = if context.path.starts_with(path) {
                classes!("nav-link", "active")
            } else {
                classes!("nav-link")
            };
            html! {
                <li class="nav-item">
                    <a class={classes} href="#" onclick={context.link(path)}>{label}</a>
                </li>
            }
        });

    let on_logout_click = {
        let confirm_logout = confirm_logout.clone();
        Callback::from(move |_: MouseEvent| confirm_logout.set(true))
    };

    let on_cancel_logout = {
        let confirm_logout = confirm_logout.clone();
        Callback::from(move |_: ()| confirm_logout.set(false))
    };

    let on_confirm_logout = {
        let client = context.client.clone();
        let confirm_logout = confirm_logout.clone();
        Callback::from(move |_: MouseEvent| {
            log::info!("User logged out");
            confirm_logout.set(false);
            client.force_logout(None);
        })
    };

    let user_name = context
        .session
        .user()
        .map(|user| user.full_name.clone())
        .unwrap_or_default();

    html! {
        <>
            <nav class="navbar navbar-expand-lg bg-body-tertiary">
                <div class="container-fluid">
                    <a class="navbar-brand" href="#" onclick={context.link("/")}>{"Traffic Survey"}</a>
                    <div class="collapse navbar-collapse">
                        <ul class="navbar-nav me-auto mb-2 mb-lg-0">
                            { for links }
                        </ul>
                        <span class="navbar-text me-3">{user_name}</span>
                        <button onclick={context.link(CHANGE_PASSWORD_PATH)} class="btn btn-sm me-2 btn-outline-primary">
                            {"Change password"}
                        </button>
                        <button onclick={on_logout_click} class="btn btn-sm btn-outline-secondary">
                            {"Logout"}
                        </button>
                    </div>
                </div>
            </nav>
            if *confirm_logout {
                <Modal
                    title="Logout"
                    on_close={on_cancel_logout.clone()}
                    footer={html! {
                        <>
                            <button class="btn btn-secondary" onclick={on_cancel_logout.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                            <button class="btn btn-danger" onclick={on_confirm_logout}>{"Logout"}</button>
                        </>
                    }}>
                    <p>{"Are you sure you want to log out?"}</p>
                </Modal>
            }
        </>
    }
}
