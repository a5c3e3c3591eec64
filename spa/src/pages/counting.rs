use chrono::Utc;
use client::counting::{self, format_countdown, load_survey, CountingSession, SubmitOutcome};
use client::format::to_grid_date;
use client::routes::SURVEYS_PATH;
use shared::VehicleKind;
use strum::IntoEnumIterator;
use yew::{platform::spawn_local, prelude::*};
use yew_hooks::prelude::*;

use crate::app::use_app_context;
use crate::platform::WebStorage;

fn vehicle_label(kind: VehicleKind) -> (&'static str, &'static str) {
    match kind {
        VehicleKind::Motorcycle => ("Motorcycle", "🏍️"),
        VehicleKind::Car => ("Car", "🚗"),
        VehicleKind::Truck => ("Truck", "🚛"),
        VehicleKind::Bus => ("Bus", "🚌"),
        VehicleKind::Pedestrian => ("Pedestrian", "🚶"),
    }
}

#[function_component(CountingPage)]
pub fn counting_page() -> Html {
    let context = use_app_context();
    let session = use_state(|| load_survey(&WebStorage::Session).map(CountingSession::new));
    let now = use_state(Utc::now);
    let submitting = use_state(|| false);

    {
        let client = context.client.clone();
        use_effect_with(session.is_none(), move |missing| {
            if *missing {
                log::warn!("No survey to count, back to surveys");
                client.navigator().navigate(SURVEYS_PATH);
            }
        });
    }

    {
        let now = now.clone();
        use_interval(move || now.set(Utc::now()), 1000);
    }

    let Some(current) = (*session).clone() else {
        return html! {};
    };

    let adjust = |kind: VehicleKind, up: bool| {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(mut next) = (*session).clone() {
                if up {
                    next.increment(kind);
                } else {
                    next.decrement(kind);
                }
                session.set(Some(next));
            }
        })
    };

    let on_submit = {
        let client = context.client.clone();
        let session = session.clone();
        let submitting = submitting.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(current) = (*session).clone() else {
                return;
            };
            if *submitting || !current.can_submit(Utc::now()) {
                return;
            }
            let client = client.clone();
            let submitting = submitting.clone();
            submitting.set(true);
            spawn_local(async move {
                let outcome = counting::submit(&client, &current, &WebStorage::Session).await;
                submitting.set(false);
                if let Some(message) = outcome.message() {
                    client.navigator().alert(message);
                }
                if outcome == SubmitOutcome::Submitted {
                    client.navigator().navigate(SURVEYS_PATH);
                }
            });
        })
    };

    let counts = current.counts();
    let tallies = VehicleKind::iter().map(|kind| {
        let (label, icon) = vehicle_label(kind);
        html! {
            <div class="col-6 col-md-4 mb-3">
                <div class="card text-center">
                    <div class="card-body">
                        <div class="fs-1">{icon}</div>
                        <div class="fw-semibold">{label}</div>
                        <div class="display-6 my-2">{counts.get(kind)}</div>
                        <div class="btn-group">
                            <button class="btn btn-outline-secondary" onclick={adjust(kind, false)} disabled={counts.get(kind) == 0}>{"-"}</button>
                            <button class="btn btn-primary" onclick={adjust(kind, true)}>{"+"}</button>
                        </div>
                    </div>
                </div>
            </div>
        }
    });

    let can_submit = current.can_submit(*now);
    let submit_label = match current.seconds_until_submit(*now) {
        _ if can_submit => "Submit survey".to_string(),
        Some(seconds) => format!("Submit in {}", format_countdown(seconds)),
        None => "Submit unavailable, no end time".to_string(),
    };
    let survey = current.survey();

    html! {
        <div class="container">
            <a href={SURVEYS_PATH} class="btn btn-link px-0 mb-2" onclick={context.link(SURVEYS_PATH)}>
                <i class="bi bi-arrow-left"></i>{" Back"}
            </a>
            <h2>{survey.name.clone()}</h2>
            <p class="text-muted">
                {format!("{} → {}", survey.start_point, survey.end_point)}
                <br />
                {format!("{} - {}", to_grid_date(survey.scheduled_start_time), to_grid_date(survey.scheduled_end_time))}
            </p>
            <div class="row">
                { for tallies }
            </div>
            <div class="d-flex justify-content-between align-items-center">
                <span class="fw-semibold">{format!("Total: {}", counts.total())}</span>
                <button class="btn btn-success" onclick={on_submit} disabled={!can_submit || *submitting}>
                    if *submitting {
                        <span class="spinner-border spinner-border-sm me-2" role="status"></span>
                        {"Submitting"}
                    } else {
                        {submit_label}
                    }
                </button>
            </div>
        </div>
    }
}
