use client::password::{unmet_rules, PasswordRule};
use strum::IntoEnumIterator;
use yew::prelude::*;

use crate::components::atoms::input_text::{InputText, InputType};

#[derive(Debug, PartialEq, Default, Clone)]
pub struct NewPasswordData {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl NewPasswordData {
    fn validate(&self, ask_current: bool) -> Result<(), String> {
        if ask_current && self.current_password.is_empty() {
            return Err("Enter your current password".to_string());
        }
        if let Some(rule) = unmet_rules(&self.new_password).first() {
            return Err(format!("The new password must {}", rule.description().to_lowercase()));
        }
        if self.new_password != self.confirm_password {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    }
}

#[derive(PartialEq, Properties)]
pub struct Props {
    pub title: AttrValue,
    pub on_submit: Callback<NewPasswordData>,
    /// Show the current password field.
    #[prop_or_default]
    pub ask_current: bool,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(NewPasswordForm)]
pub fn new_password_form(props: &Props) -> Html {
    let state = use_state(NewPasswordData::default);
    let validation = use_state(|| None::<String>);

    let on_field = |apply: fn(&mut NewPasswordData, String)| {
        let state = state.clone();
        Callback::from(move |input_text: String| {
            let mut data = (*state).clone();
            apply(&mut data, input_text);
            state.set(data);
        })
    };

    let on_submit = {
        let state = state.clone();
        let validation = validation.clone();
        let on_submit = props.on_submit.clone();
        let ask_current = props.ask_current;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            match state.validate(ask_current) {
                Ok(()) => {
                    validation.set(None);
                    on_submit.emit((*state).clone());
                }
                Err(message) => validation.set(Some(message)),
            }
        })
    };

    let error = (*validation).clone().or_else(|| props.error.clone());

    let rules_html = PasswordRule::iter().map(|rule| {
        let met = rule.is_met(&state.new_password);
        html! {
            <li class={if met { "text-success" } else { "text-muted" }}>{rule.description()}</li>
        }
    });

    html! {
        <div class="container mt-5">
            <div class="row justify-content-center">
                <div class="col-md-4">
                    <h2 class="text-center mb-4">{props.title.clone()}</h2>
                    <form onsubmit={on_submit}>
                        if props.ask_current {
                            <div class="mb-3">
                                <label for="current-password" class="form-label">{"Current password"}</label>
                                <InputText
                                    id="current-password"
                                    input_type={InputType::Password}
                                    class={"form-control"}
                                    value={state.current_password.clone()}
                                    on_change={on_field(|data, value| data.current_password = value)} />
                            </div>
                        }
                        <div class="mb-3">
                            <label for="new-password" class="form-label">{"New password"}</label>
                            <InputText
                                id="new-password"
                                input_type={InputType::Password}
                                class={"form-control"}
                                value={state.new_password.clone()}
                                on_change={on_field(|data, value| data.new_password = value)} />
                            <ul class="small mt-2 mb-0">{ for rules_html }</ul>
                        </div>
                        <div class="mb-3">
                            <label for="confirm-password" class="form-label">{"Confirm password"}</label>
                            <InputText
                                id="confirm-password"
                                input_type={InputType::Password}
                                class={"form-control"}
                                value={state.confirm_password.clone()}
                                invalid={error.is_some()}
                                on_change={on_field(|data, value| data.confirm_password = value)} />
                            if let Some(error) = &error {
                                <div class="invalid-feedback">{error}</div>
                            }
                        </div>
                        <div class="d-grid">
                            <input class="btn btn-primary" type="submit" value="Save" disabled={props.loading} />
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
