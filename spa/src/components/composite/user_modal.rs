use std::str::FromStr;

use client::api::users_api;
use client::api::FormOutcome;
use shared::{CountingPost, CreateUserRequest, UpdateUserRequest, User};
use yew::{platform::spawn_local, prelude::*};

use crate::app::use_app_context;
use crate::components::atoms::input_text::{InputText, InputType};
use crate::components::atoms::select::{Select, SelectOption};
use crate::components::composite::modal::Modal;

#[derive(Debug, Clone, PartialEq, Default)]
struct UserForm {
    email: String,
    full_name: String,
    phone: String,
    counting_post: Option<CountingPost>,
}

impl UserForm {
    fn from_user(user: &User) -> Self {
        UserForm {
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            counting_post: user.counting_post,
        }
    }

    fn phone(&self) -> Option<String> {
        Some(self.phone.trim().to_string()).filter(|p| !p.is_empty())
    }
}

#[derive(PartialEq, Properties)]
pub struct Props {
    /// User to edit, `None` to create one.
    #[prop_or_default]
    pub user: Option<User>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(UserModal)]
pub fn user_modal(props: &Props) -> Html {
    let context = use_app_context();
    let form = use_state(|| props.user.as_ref().map(UserForm::from_user).unwrap_or_default());
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let editing = props.user.is_some();

    let on_field = |apply: fn(&mut UserForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut data = (*form).clone();
            apply(&mut data, value);
            form.set(data);
        })
    };

    let on_counting_post = {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut data = (*form).clone();
            data.counting_post = CountingPost::from_str(&value).ok();
            form.set(data);
        })
    };

    let on_save = {
        let client = context.client.clone();
        let form = form.clone();
        let error = error.clone();
        let saving = saving.clone();
        let user_id = props.user.as_ref().map(|user| user.id.clone());
        let on_saved = props.on_saved.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *saving {
                return;
            }
            let data = (*form).clone();
            if data.full_name.trim().is_empty() || data.email.trim().is_empty() {
                error.set(Some("Full name and email are required".to_string()));
                return;
            }
            let client = client.clone();
            let error = error.clone();
            let saving = saving.clone();
            let on_saved = on_saved.clone();
            let user_id = user_id.clone();
            saving.set(true);
            spawn_local(async move {
                let result = match user_id {
                    Some(id) => {
                        let request = UpdateUserRequest {
                            id,
                            full_name: Some(data.full_name.trim().to_string()),
                            phone: data.phone(),
                            counting_post: data.counting_post,
                            picture: None,
                        };
                        users_api::update_user(&client, &request)
                            .await
                            .map(|_| ())
                            .map_err(|e| e.message())
                    }
                    None => {
                        let request = CreateUserRequest {
                            full_name: data.full_name.trim().to_string(),
                            email: data.email.trim().to_string(),
                            phone: data.phone(),
                        };
                        match users_api::create_user(&client, &request).await {
                            FormOutcome::Accepted => Ok(()),
                            FormOutcome::Rejected(field_error) => Err(field_error.text()),
                        }
                    }
                };
                saving.set(false);
                match result {
                    Ok(()) => on_saved.emit(()),
                    Err(message) => {
                        log::warn!("Fail to save user, error={message}");
                        error.set(Some(message));
                    }
                }
            });
        })
    };

    let post_options: Vec<SelectOption> = vec![
        (CountingPost::Start.to_string(), "Start".to_string()),
        (CountingPost::End.to_string(), "End".to_string()),
    ];

    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal
            title={if editing { "Edit user" } else { "Create user" }}
            on_close={props.on_close.clone()}>
            <form onsubmit={on_save}>
                <div class="mb-3">
                    <label for="user-email" class="form-label">{"Email"}</label>
                    if editing {
                        <input id="user-email" class="form-control" type="email" value={form.email.clone()} disabled=true />
                    } else {
                        <InputText
                            id="user-email"
                            input_type={InputType::Email}
                            class={"form-control"}
                            value={form.email.clone()}
                            required=true
                            invalid={error.is_some()}
                            on_change={on_field(|data, value| data.email = value)} />
                    }
                </div>
                <div class="mb-3">
                    <label for="user-full-name" class="form-label">{"Full name"}</label>
                    <InputText
                        id="user-full-name"
                        class={"form-control"}
                        value={form.full_name.clone()}
                        required=true
                        on_change={on_field(|data, value| data.full_name = value)} />
                </div>
                <div class="mb-3">
                    <label for="user-phone" class="form-label">{"Phone"}</label>
                    <InputText
                        id="user-phone"
                        input_type={InputType::Tel}
                        class={"form-control"}
                        value={form.phone.clone()}
                        on_change={on_field(|data, value| data.phone = value)} />
                </div>
                if editing {
                    <div class="mb-3">
                        <label for="user-counting-post" class="form-label">{"Counting post"}</label>
                        <Select
                            id="user-counting-post"
                            class="form-select"
                            options={post_options}
                            selected={form.counting_post.map(|post| post.to_string())}
                            placeholder={Some("Select counting post".to_string())}
                            on_change={on_counting_post} />
                    </div>
                }
                if let Some(message) = &*error {
                    <div class="text-danger mb-3">{message}</div>
                }
                <div class="d-flex justify-content-between">
                    <button type="button" class="btn btn-outline-secondary" onclick={on_cancel} disabled={*saving}>{"Cancel"}</button>
                    <button type="submit" class="btn btn-primary" disabled={*saving}>{"Save"}</button>
                </div>
            </form>
        </Modal>
    }
}
