use client::api::auth_api;
use client::api::FormOutcome;
use secrecy::SecretString;
use shared::ChangePasswordRequest;
use yew::{platform::spawn_local, prelude::*};

use crate::app::use_app_context;
use crate::components::composite::new_password_form::{NewPasswordData, NewPasswordForm};

#[function_component(ChangePasswordPage)]
pub fn change_password_page() -> Html {
    let context = use_app_context();
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let client = context.client.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |data: NewPasswordData| {
            let client = client.clone();
            let error = error.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                let request = ChangePasswordRequest {
                    current_password: SecretString::from(data.current_password),
                    new_password: SecretString::from(data.new_password),
                };
                let outcome = auth_api::change_password(&client, &request).await;
                loading.set(false);
                match outcome {
                    Ok(FormOutcome::Accepted) => log::info!("Password changed"),
                    Ok(FormOutcome::Rejected(field_error)) => error.set(Some(field_error.text())),
                    Err(err) => {
                        log::warn!("Fail to change password, error={err}");
                        error.set(Some(err.message()));
                    }
                }
            });
        })
    };

    html! {
        <NewPasswordForm
            title="Change password"
            ask_current=true
            on_submit={on_submit}
            error={(*error).clone()}
            loading={*loading} />
    }
}
