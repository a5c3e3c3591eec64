use std::rc::Rc;

use client::routes::guard;
use client::{ApiClient, AuthStore, ClientConfig, Navigator, Session};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::composite::navigation_bar::NavigationBar;
use crate::pages::{
    change_password::ChangePasswordPage, counting::CountingPage, error::ErrorPage, home::HomePage,
    login::LoginPage, reset_password::ResetPasswordPage, surveys::SurveysPage, users::UsersPage,
};
use crate::platform::{self, BrowserNavigator, FetchTransport, WebStorage};
use crate::router::Route;

/// Shared by every page: the API client plus the session it last observed.
#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub client: ApiClient,
    pub session: Session,
    pub path: String,
}

impl AppContext {
    pub fn navigate(&self, path: &str) {
        self.client.navigator().navigate(path);
    }

    /// Click handler for in-app links.
    pub fn link(&self, path: &'static str) -> Callback<MouseEvent> {
        let client = self.client.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            client.navigator().navigate(path);
        })
    }
}

#[hook]
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext is provided by App")
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: ClientConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let path = use_state(platform::current_path);

    let client = {
        let set_path = path.setter();
        use_memo(props.config.clone(), move |config| {
            let config = config.clone();
            let transport = FetchTransport::new(config.timeout);
            let navigator = BrowserNavigator::new(Callback::from(move |path: String| set_path.set(path)));
            let store = AuthStore::load(Rc::new(WebStorage::Local));
            log::info!("Client ready, api_base_url={}", config.api_base_url);
            ApiClient::new(config, store, Rc::new(transport), Rc::new(navigator))
        })
    };

    let session = use_state(|| client.store().snapshot());
    {
        let client = client.clone();
        let set_session = session.setter();
        use_effect_with((), move |_| {
            let subscription = client
                .store()
                .subscribe(move |session| set_session.set(session.clone()));
            move || drop(subscription)
        });
    }

    {
        let set_path = path.setter();
        use_event_with_window("popstate", move |_: Event| {
            set_path.set(platform::current_path());
        });
    }

    let redirect = guard(&path, &session);
    {
        let client = client.clone();
        use_effect_with(redirect, move |redirect| {
            if let Some(target) = redirect {
                log::info!("Route guard redirect, target={target}");
                client.navigator().navigate(target);
            }
        });
    }

    let context = AppContext {
        client: (*client).clone(),
        session: (*session).clone(),
        path: (*path).clone(),
    };

    let content = if redirect.is_some() {
        html! {}
    } else {
        match Route::from_path(&path) {
            Route::Login => html! { <LoginPage /> },
            Route::ResetPassword => html! { <ResetPasswordPage /> },
            Route::Error { code } => html! { <ErrorPage code={code} /> },
            Route::Home => html! { <HomePage /> },
            Route::ChangePassword => html! { <ChangePasswordPage /> },
            Route::Surveys => html! { <SurveysPage /> },
            Route::Users => html! { <UsersPage /> },
            Route::Counting => html! { <CountingPage /> },
            Route::NotFound => html! {},
        }
    };

    html! {
        <ContextProvider<AppContext> context={context}>
            if session.is_authorized() {
                <NavigationBar />
            }
            <main class="container-fluid py-4">
                {content}
            </main>
        </ContextProvider<AppContext>>
    }
}
