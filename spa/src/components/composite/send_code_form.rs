use yew::prelude::*;

use crate::components::atoms::input_text::{InputText, InputType};

#[derive(PartialEq, Properties)]
pub struct Props {
    pub email: String,
    pub on_email_change: Callback<String>,
    pub on_send_email: Callback<()>,
    pub on_check_code: Callback<String>,
    /// Whether the code was sent and the code field is shown.
    pub code_sent: bool,
    /// `m:ss` until a new code can be requested, `None` when it can.
    #[prop_or_default]
    pub resend_in: Option<String>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(SendCodeForm)]
pub fn send_code_form(props: &Props) -> Html {
    let code = use_state(String::default);

    let on_code_change = {
        let code = code.clone();
        Callback::from(move |value: String| code.set(value))
    };

    let on_submit = {
        let code = code.clone();
        let code_sent = props.code_sent;
        let on_send_email = props.on_send_email.clone();
        let on_check_code = props.on_check_code.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if code_sent {
                on_check_code.emit((*code).clone());
            } else {
                on_send_email.emit(());
            }
        })
    };

    let on_resend = {
        let on_send_email = props.on_send_email.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            on_send_email.emit(());
        })
    };

    html! {
        <div class="container mt-5">
            <div class="row justify-content-center">
                <div class="col-md-4">
                    <h2 class="text-center mb-4">{"Reset password"}</h2>
                    <form onsubmit={on_submit}>
                        <div class="mb-3">
                            <label for="reset-email" class="form-label">{"Email"}</label>
                            <InputText
                                id="reset-email"
                                input_type={InputType::Email}
                                class={"form-control"}
                                value={props.email.clone()}
                                required=true
                                invalid={props.error.is_some() && !props.code_sent}
                                on_change={props.on_email_change.clone()} />
                        </div>
                        if props.code_sent {
                            <div class="mb-3">
                                <label for="reset-code" class="form-label">{"Code"}</label>
                                <InputText
                                    id="reset-code"
                                    class={"form-control"}
                                    value={(*code).clone()}
                                    required=true
                                    invalid={props.error.is_some()}
                                    on_change={on_code_change} />
                                if let Some(error) = &props.error {
                                    <div class="invalid-feedback">{error}</div>
                                }
                            </div>
                            <div class="mb-3 text-muted small">
                                if let Some(remaining) = &props.resend_in {
                                    {format!("You can request a new code in {remaining}")}
                                } else {
                                    <a href="#" onclick={on_resend}>{"Get a new code"}</a>
                                }
                            </div>
                        } else if let Some(error) = &props.error {
                            <div class="text-danger mb-3">{error}</div>
                        }
                        <div class="d-grid">
                            <input
                                class="btn btn-primary"
                                type="submit"
                                value={if props.code_sent { "Check code" } else { "Send code" }}
                                disabled={props.loading} />
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
