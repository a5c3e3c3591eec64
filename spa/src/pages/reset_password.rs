use std::rc::Rc;

use client::api::auth_api;
use client::api::FormOutcome;
use client::countdown::{Countdown, RESEND_CODE_SECONDS};
use client::routes::LOGIN_PATH;
use secrecy::SecretString;
use shared::ConfirmForgotPasswordRequest;
use yew::{platform::spawn_local, prelude::*};
use yew_hooks::prelude::*;

use crate::app::use_app_context;
use crate::components::composite::new_password_form::{NewPasswordData, NewPasswordForm};
use crate::components::composite::send_code_form::SendCodeForm;

#[derive(Debug, Clone, PartialEq)]
enum Step {
    RequestCode,
    CheckCode,
    NewPassword { code: String },
}

enum CooldownAction {
    Tick,
    Restart,
}

#[derive(Debug, Clone, PartialEq)]
struct ResendCooldown(Countdown);

impl Reducible for ResendCooldown {
    type Action = CooldownAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut countdown = self.0;
        match action {
            CooldownAction::Tick => countdown.tick(),
            CooldownAction::Restart => countdown.restart(),
        }
        Rc::new(ResendCooldown(countdown))
    }
}

#[function_component(ResetPasswordPage)]
pub fn reset_password_page() -> Html {
    let context = use_app_context();
    let step = use_state(|| Step::RequestCode);
    let email = use_state(String::default);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let cooldown = use_reducer(|| ResendCooldown(Countdown::new(RESEND_CODE_SECONDS, false)));

    {
        let client = context.client.clone();
        use_effect_with((), move |_| {
            client.store().logout();
        });
    }

    {
        let cooldown = cooldown.clone();
        let millis = if cooldown.0.is_active() { 1000 } else { 0 };
        use_interval(move || cooldown.dispatch(CooldownAction::Tick), millis);
    }

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |value: String| email.set(value))
    };

    let on_send_email = {
        let client = context.client.clone();
        let email = email.clone();
        let step = step.clone();
        let error = error.clone();
        let loading = loading.clone();
        let cooldown = cooldown.clone();
        Callback::from(move |_: ()| {
            let address = email.trim().to_string();
            if address.is_empty() {
                error.set(Some("Enter your email".to_string()));
                return;
            }
            let client = client.clone();
            let step = step.clone();
            let error = error.clone();
            let loading = loading.clone();
            let cooldown = cooldown.clone();
            loading.set(true);
            spawn_local(async move {
                let sent = auth_api::send_forgot_password_email(&client, &address).await;
                loading.set(false);
                match sent {
                    Ok(true) => {
                        error.set(None);
                        cooldown.dispatch(CooldownAction::Restart);
                        step.set(Step::CheckCode);
                    }
                    Ok(false) => error.set(Some("Fail to send the code, try again".to_string())),
                    Err(err) => error.set(Some(err.message())),
                }
            });
        })
    };

    let on_check_code = {
        let client = context.client.clone();
        let email = email.clone();
        let step = step.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |code: String| {
            let client = client.clone();
            let address = email.trim().to_string();
            let step = step.clone();
            let error = error.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                let outcome = auth_api::check_forgot_password_code(&client, &address, code.trim()).await;
                loading.set(false);
                match outcome {
                    Ok(FormOutcome::Accepted) => {
                        error.set(None);
                        step.set(Step::NewPassword {
                            code: code.trim().to_string(),
                        });
                    }
                    Ok(FormOutcome::Rejected(field_error)) => error.set(Some(field_error.text())),
                    Err(err) => error.set(Some(err.message())),
                }
            });
        })
    };

    let on_new_password = {
        let client = context.client.clone();
        let email = email.clone();
        let step = step.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |data: NewPasswordData| {
            let Step::NewPassword { code } = (*step).clone() else {
                return;
            };
            let request = ConfirmForgotPasswordRequest {
                email: email.trim().to_string(),
                confirmation_code: code,
                new_password: SecretString::from(data.new_password),
            };
            let client = client.clone();
            let error = error.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                let confirmed = auth_api::confirm_forgot_password(&client, &request).await;
                loading.set(false);
                match confirmed {
                    Ok(true) => {
                        log::info!("Password reset");
                        client.navigator().alert("Your password was changed, sign in with the new one");
                        client.navigator().navigate(LOGIN_PATH);
                    }
                    Ok(false) => error.set(Some("Fail to change the password, try again".to_string())),
                    Err(err) => error.set(Some(err.message())),
                }
            });
        })
    };

    let resend_in = cooldown.0.is_active().then(|| cooldown.0.label());

    match &*step {
        Step::NewPassword { .. } => html! {
            <NewPasswordForm
                title="Create a new password"
                on_submit={on_new_password}
                error={(*error).clone()}
                loading={*loading} />
        },
        current => html! {
            <>
                <SendCodeForm
                    email={(*email).clone()}
                    on_email_change={on_email_change}
                    on_send_email={on_send_email}
                    on_check_code={on_check_code}
                    code_sent={*current == Step::CheckCode}
                    resend_in={resend_in}
                    error={(*error).clone()}
                    loading={*loading} />
                <p class="text-center mt-3">
                    <a href={LOGIN_PATH} onclick={context.link(LOGIN_PATH)}>{"Back to login"}</a>
                </p>
            </>
        },
    }
}
