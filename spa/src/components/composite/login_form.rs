use yew::prelude::*;

use crate::components::atoms::input_text::{InputText, InputType};

#[derive(Debug, PartialEq, Default, Clone)]
pub struct LoginFormData {
    pub email: String,
    pub password: String,
}

#[derive(PartialEq, Properties)]
pub struct Props {
    pub on_login: Callback<LoginFormData>,
    pub on_forgot_password: Callback<MouseEvent>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(LoginForm)]
pub fn login_form(props: &Props) -> Html {
    let state = use_state(LoginFormData::default);

    let on_change_email = {
        let state = state.clone();
        Callback::from(move |input_text: String| {
            let mut data: LoginFormData = (*state).clone();
            data.email = input_text;
            state.set(data);
        })
    };

    let on_change_password = {
        let state = state.clone();
        Callback::from(move |input_text: String| {
            let mut data = (*state).clone();
            data.password = input_text;
            state.set(data);
        })
    };

    let on_submit = {
        let state = state.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let data = (*state).clone();
            if !data.email.is_empty() && !data.password.is_empty() {
                on_login.emit(data);
            }
        })
    };

    html! {
        <div class="container mt-5">
            <div class="row justify-content-center">
                <div class="col-md-4">
                    <h2 class="text-center mb-4">{ "Login" }</h2>
                    <form onsubmit={on_submit}>
                        <div class="mb-3">
                            <label for="email" class="form-label">{ "Email" }</label>
                            <InputText
                                id="email"
                                name="email"
                                placeholder="Enter your email"
                                class={"form-control"}
                                input_type={InputType::Email}
                                value={state.email.clone()}
                                required=true
                                on_change={on_change_email} />
                        </div>
                        <div class="mb-3">
                            <label for="password" class="form-label">{ "Password" }</label>
                            <InputText
                                id="password"
                                name="password"
                                placeholder="Enter your password"
                                input_type={InputType::Password}
                                class={"form-control"}
                                value={state.password.clone()}
                                required=true
                                invalid={props.error.is_some()}
                                on_change={on_change_password} />
                            if let Some(error) = &props.error {
                                <div class="invalid-feedback">{error}</div>
                            }
                        </div>
                        <div class="d-grid gap-2">
                            <input class="btn btn-primary" type="submit" value="Login" disabled={props.loading} />
                            <a class="btn btn-link" href="#" onclick={props.on_forgot_password.clone()}>{"Forgot password?"}</a>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
