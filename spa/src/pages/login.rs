use client::api::auth_api::{self, LoginOutcome};
use client::api::FormOutcome;
use client::routes::RESET_PASSWORD_PATH;
use secrecy::SecretString;
use shared::{AuthResults, SignInRequest};
use yew::{platform::spawn_local, prelude::*};

use crate::app::use_app_context;
use crate::components::composite::login_form::{LoginForm, LoginFormData};
use crate::components::composite::new_password_form::{NewPasswordData, NewPasswordForm};

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let context = use_app_context();
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let pending = use_state(|| None::<AuthResults>);

    let on_login = {
        let client = context.client.clone();
        let error = error.clone();
        let loading = loading.clone();
        let pending = pending.clone();
        Callback::from(move |data: LoginFormData| {
            let client = client.clone();
            let error = error.clone();
            let loading = loading.clone();
            let pending = pending.clone();
            loading.set(true);
            spawn_local(async move {
                let request = SignInRequest {
                    email: data.email.trim().to_string(),
                    password: SecretString::from(data.password),
                };
                let outcome = auth_api::login(&client, &request).await;
                loading.set(false);
                match outcome {
                    LoginOutcome::SignedIn => log::info!("Signed in"),
                    LoginOutcome::PasswordChangeRequired(results) => {
                        error.set(None);
                        pending.set(Some(results));
                    }
                    LoginOutcome::Rejected(field_error) => error.set(Some(field_error.text())),
                }
            });
        })
    };

    let on_new_password = {
        let client = context.client.clone();
        let error = error.clone();
        let loading = loading.clone();
        let pending = pending.clone();
        Callback::from(move |data: NewPasswordData| {
            let Some(results) = (*pending).clone() else {
                return;
            };
            let client = client.clone();
            let error = error.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                let outcome =
                    auth_api::change_temporary_password(&client, &results, SecretString::from(data.new_password))
                        .await;
                loading.set(false);
                match outcome {
                    Ok(FormOutcome::Accepted) => log::info!("Temporary password replaced"),
                    Ok(FormOutcome::Rejected(field_error)) => error.set(Some(field_error.text())),
                    Err(err) => error.set(Some(err.message())),
                }
            });
        })
    };

    if pending.is_some() {
        return html! {
            <NewPasswordForm
                title="Create a new password"
                on_submit={on_new_password}
                error={(*error).clone()}
                loading={*loading} />
        };
    }

    html! {
        <LoginForm
            on_login={on_login}
            on_forgot_password={context.link(RESET_PASSWORD_PATH)}
            error={(*error).clone()}
            loading={*loading} />
    }
}
