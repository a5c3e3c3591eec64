use std::str::FromStr;

use chrono::{DateTime, Utc};
use client::api::{surveys_api, users_api};
use shared::{
    AgentRef, CreateSurveyRequest, Survey, SurveyStatus, UpdateSurveyRequest, User,
};
use yew::{platform::spawn_local, prelude::*};

use crate::app::use_app_context;
use crate::components::atoms::input_datetime_utc::InputDateTimeUtc;
use crate::components::atoms::input_text::InputText;
use crate::components::atoms::select::{Select, SelectOption};
use crate::components::composite::modal::Modal;

#[derive(Debug, Clone, PartialEq, Default)]
struct SurveyForm {
    name: String,
    start_point: String,
    end_point: String,
    scheduled_start_time: Option<DateTime<Utc>>,
    scheduled_end_time: Option<DateTime<Utc>>,
    start_point_agent: Option<String>,
    end_point_agent: Option<String>,
    status: Option<SurveyStatus>,
}

fn agent_id(agent: Option<&AgentRef>) -> Option<String> {
    match agent {
        Some(AgentRef::User { id, .. }) => id.clone(),
        _ => None,
    }
}

impl SurveyForm {
    fn from_survey(survey: &Survey) -> Self {
        SurveyForm {
            name: survey.name.clone(),
            start_point: survey.start_point.clone(),
            end_point: survey.end_point.clone(),
            scheduled_start_time: survey.scheduled_start_time,
            scheduled_end_time: survey.scheduled_end_time,
            start_point_agent: agent_id(survey.start_point_agent.as_ref()),
            end_point_agent: agent_id(survey.end_point_agent.as_ref()),
            status: Some(survey.status),
        }
    }

    fn to_create_request(&self) -> Result<CreateSurveyRequest, &'static str> {
        let (Some(start), Some(end)) = (self.scheduled_start_time, self.scheduled_end_time) else {
            return Err("Start and end time are required");
        };
        if end <= start {
            return Err("The end time must be after the start time");
        }
        let (Some(start_agent), Some(end_agent)) = (&self.start_point_agent, &self.end_point_agent) else {
            return Err("Both agents are required");
        };
        if [&self.name, &self.start_point, &self.end_point]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err("Name, start point and end point are required");
        }
        Ok(CreateSurveyRequest {
            name: self.name.trim().to_string(),
            start_point: self.start_point.trim().to_string(),
            end_point: self.end_point.trim().to_string(),
            scheduled_start_time: start,
            scheduled_end_time: end,
            start_point_agent: start_agent.clone(),
            end_point_agent: end_agent.clone(),
        })
    }

    fn to_update_request(&self, id: String) -> Result<UpdateSurveyRequest, &'static str> {
        if let (Some(start), Some(end)) = (self.scheduled_start_time, self.scheduled_end_time) {
            if end <= start {
                return Err("The end time must be after the start time");
            }
        }
        let text = |value: &str| Some(value.trim().to_string()).filter(|v| !v.is_empty());
        Ok(UpdateSurveyRequest {
            id,
            name: text(&self.name),
            start_point: text(&self.start_point),
            end_point: text(&self.end_point),
            scheduled_start_time: self.scheduled_start_time,
            scheduled_end_time: self.scheduled_end_time,
            start_point_agent: self.start_point_agent.clone(),
            end_point_agent: self.end_point_agent.clone(),
            status: self.status,
        })
    }
}

#[derive(PartialEq, Properties)]
pub struct Props {
    /// Survey to edit, `None` to create one.
    #[prop_or_default]
    pub survey: Option<Survey>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(SurveyModal)]
pub fn survey_modal(props: &Props) -> Html {
    let context = use_app_context();
    let form = use_state(|| props.survey.as_ref().map(SurveyForm::from_survey).unwrap_or_default());
    let agents = use_state(Vec::<User>::new);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let editing = props.survey.is_some();

    {
        let client = context.client.clone();
        let agents = agents.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match users_api::list_agents(&client).await {
                    Ok(found) => agents.set(found),
                    Err(error) => log::error!("Fail to fetch agents, error={error}"),
                }
            });
        });
    }

    let on_text = |apply: fn(&mut SurveyForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut data = (*form).clone();
            apply(&mut data, value);
            form.set(data);
        })
    };

    let on_time = |apply: fn(&mut SurveyForm, Option<DateTime<Utc>>)| {
        let form = form.clone();
        Callback::from(move |value: Option<DateTime<Utc>>| {
            let mut data = (*form).clone();
            apply(&mut data, value);
            form.set(data);
        })
    };

    let on_agent = |apply: fn(&mut SurveyForm, Option<String>)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut data = (*form).clone();
            apply(&mut data, Some(value).filter(|v| !v.is_empty()));
            form.set(data);
        })
    };

    let on_status = {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut data = (*form).clone();
            data.status = SurveyStatus::from_str(&value).ok();
            form.set(data);
        })
    };

    let on_save = {
        let client = context.client.clone();
        let form = form.clone();
        let error = error.clone();
        let saving = saving.clone();
        let survey_id = props.survey.as_ref().map(|survey| survey.id.clone());
        let on_saved = props.on_saved.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *saving {
                return;
            }
            let client = client.clone();
            let error = error.clone();
            let saving = saving.clone();
            let on_saved = on_saved.clone();
            let outcome = match &survey_id {
                Some(id) => form.to_update_request(id.clone()).map(SaveRequest::Update),
                None => form.to_create_request().map(SaveRequest::Create),
            };
            let request = match outcome {
                Ok(request) => request,
                Err(message) => {
                    error.set(Some(message.to_string()));
                    return;
                }
            };
            saving.set(true);
            spawn_local(async move {
                let result = match request {
                    SaveRequest::Create(request) => surveys_api::create_survey(&client, &request).await,
                    SaveRequest::Update(request) => surveys_api::update_survey(&client, &request).await,
                };
                saving.set(false);
                match result {
                    Ok(survey) => {
                        log::info!("Survey saved, id={}", survey.id);
                        on_saved.emit(());
                    }
                    Err(err) => {
                        log::warn!("Fail to save survey, error={err}");
                        error.set(Some(err.message()));
                    }
                }
            });
        })
    };

    let agent_options: Vec<SelectOption> = agents
        .iter()
        .map(|agent| (agent.id.clone(), format!("{} ({})", agent.full_name, agent.email)))
        .collect();
    let status_options: Vec<SelectOption> = [SurveyStatus::Active, SurveyStatus::Inactive, SurveyStatus::Archived]
        .iter()
        .map(|status| (status.to_string(), status.to_string()))
        .collect();

    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal
            title={if editing { "Edit survey" } else { "Create survey" }}
            on_close={props.on_close.clone()}>
            <form onsubmit={on_save}>
                <div class="mb-3">
                    <label for="survey-name" class="form-label">{"Survey name"}</label>
                    <InputText id="survey-name" class={"form-control"} value={form.name.clone()} required=true
                        on_change={on_text(|data, value| data.name = value)} />
                </div>
                <div class="row mb-3">
                    <div class="col">
                        <label for="survey-start-point" class="form-label">{"Start point"}</label>
                        <InputText id="survey-start-point" class={"form-control"} value={form.start_point.clone()} required=true
                            on_change={on_text(|data, value| data.start_point = value)} />
                    </div>
                    <div class="col">
                        <label for="survey-end-point" class="form-label">{"End point"}</label>
                        <InputText id="survey-end-point" class={"form-control"} value={form.end_point.clone()} required=true
                            on_change={on_text(|data, value| data.end_point = value)} />
                    </div>
                </div>
                <div class="row mb-3">
                    <div class="col">
                        <label for="survey-start-time" class="form-label">{"Scheduled start"}</label>
                        <InputDateTimeUtc id="survey-start-time" class={classes!("form-control")}
                            value={form.scheduled_start_time}
                            on_change={on_time(|data, value| data.scheduled_start_time = value)} />
                    </div>
                    <div class="col">
                        <label for="survey-end-time" class="form-label">{"Scheduled end"}</label>
                        <InputDateTimeUtc id="survey-end-time" class={classes!("form-control")}
                            value={form.scheduled_end_time}
                            on_change={on_time(|data, value| data.scheduled_end_time = value)} />
                    </div>
                </div>
                <div class="row mb-3">
                    <div class="col">
                        <label for="survey-start-agent" class="form-label">{"Start point agent"}</label>
                        <Select id="survey-start-agent" class="form-select" options={agent_options.clone()}
                            selected={form.start_point_agent.clone()}
                            placeholder={Some("Select agent".to_string())}
                            on_change={on_agent(|data, value| data.start_point_agent = value)} />
                    </div>
                    <div class="col">
                        <label for="survey-end-agent" class="form-label">{"End point agent"}</label>
                        <Select id="survey-end-agent" class="form-select" options={agent_options}
                            selected={form.end_point_agent.clone()}
                            placeholder={Some("Select agent".to_string())}
                            on_change={on_agent(|data, value| data.end_point_agent = value)} />
                    </div>
                </div>
                if editing {
                    <div class="mb-3">
                        <label for="survey-status" class="form-label">{"Status"}</label>
                        <Select id="survey-status" class="form-select" options={status_options}
                            selected={form.status.map(|status| status.to_string())}
                            on_change={on_status} />
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

enum SaveRequest {
    Create(CreateSurveyRequest),
    Update(UpdateSurveyRequest),
}
