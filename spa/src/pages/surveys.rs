use std::str::FromStr;

use chrono::Utc;
use client::api::surveys_api;
use client::counting::stash_survey;
use client::format::to_grid_date;
use client::grid::GridQuery;
use client::routes::COUNTING_PATH;
use client::Error;
use shared::{Survey, SurveyFilter, SurveyListQuery, SurveyStats, SurveyStatus, UserType};
use yew::{platform::spawn_local, prelude::*};

use crate::app::use_app_context;
use crate::components::atoms::select::SelectOption;
use crate::components::composite::data_grid::{DataGrid, GridColumn, GridRow, RowAction};
use crate::components::composite::filters_modal::{FilterBubble, FiltersModal};
use crate::components::composite::modal::Modal;
use crate::components::composite::survey_modal::SurveyModal;
use crate::platform::WebStorage;

const COLUMNS: [GridColumn; 8] = [
    GridColumn::new("name", "Survey name"),
    GridColumn::new("startPoint", "Start point"),
    GridColumn::new("endPoint", "End point"),
    GridColumn::new("status", "Status"),
    GridColumn::new("startPointAgent", "Start point agent"),
    GridColumn::new("endPointAgent", "End point agent"),
    GridColumn::new("scheduledStartTime", "Scheduled start"),
    GridColumn::new("scheduledEndTime", "Scheduled end"),
];

#[derive(Debug, Clone, PartialEq)]
enum Dialog {
    Closed,
    Filters,
    Create,
    Edit(Survey),
    ConfirmDelete(Survey),
}

fn sort_surveys(surveys: &mut [Survey], sort_by: &str, descending: bool) {
    surveys.sort_by(|a, b| {
        let ordering = match sort_by {
            "startPoint" => a.start_point.cmp(&b.start_point),
            "endPoint" => a.end_point.cmp(&b.end_point),
            "status" => a.status.as_ref().cmp(b.status.as_ref()),
            "startPointAgent" => a.start_point_agent_name().cmp(b.start_point_agent_name()),
            "endPointAgent" => a.end_point_agent_name().cmp(b.end_point_agent_name()),
            "scheduledStartTime" => a.scheduled_start_time.cmp(&b.scheduled_start_time),
            "scheduledEndTime" => a.scheduled_end_time.cmp(&b.scheduled_end_time),
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        };
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn stats_cards(stats: &SurveyStats) -> Html {
    let cards = [
        ("Total surveys", stats.total_surveys),
        ("Active", stats.active_surveys),
        ("Inactive", stats.inactive_surveys),
        ("Archived", stats.archived_surveys),
        ("Cars counted", stats.total_cars),
        ("Motorcycles counted", stats.total_motorcycles),
        ("Vehicles counted", stats.total_vehicles),
    ];
    html! {
        <div class="row row-cols-2 row-cols-md-4 row-cols-xl-7 g-2 mb-3">
            { for cards.into_iter().map(|(label, value)| html! {
                <div class="col">
                    <div class="card text-center">
                        <div class="card-body py-2">
                            <div class="fs-4 fw-bold">{value}</div>
                            <div class="small text-muted">{label}</div>
                        </div>
                    </div>
                </div>
            }) }
        </div>
    }
}

#[function_component(SurveysPage)]
pub fn surveys_page() -> Html {
    let context = use_app_context();
    let is_admin = context.session.user_type() == UserType::Admin;
    let is_agent = context.session.user_type() == UserType::Agent;

    let query = use_state(|| GridQuery::new("name"));
    let filter = use_state(SurveyFilter::default);
    let surveys = use_state(Vec::<Survey>::new);
    let total_pages = use_state(|| 1u32);
    let loading = use_state(|| false);
    let stats = use_state(|| None::<SurveyStats>);
    let dialog = use_state(|| Dialog::Closed);
    let reload = use_state(|| 0u32);

    let list_query = SurveyListQuery {
        page: query.page,
        limit: query.limit,
        search: query.search_term(),
        filter: (*filter).clone(),
    };

    {
        let client = context.client.clone();
        let surveys = surveys.clone();
        let total_pages = total_pages.clone();
        let loading = loading.clone();
        use_effect_with((list_query, *reload), move |(list_query, _)| {
            let list_query = list_query.clone();
            loading.set(true);
            spawn_local(async move {
                match surveys_api::list_surveys(&client, &list_query).await {
                    Ok(page) => {
                        total_pages.set(page.total_pages);
                        surveys.set(page.docs);
                    }
                    Err(error) => log::error!("Fail to fetch surveys, error={error}"),
                }
                loading.set(false);
            });
        });
    }

    {
        let client = context.client.clone();
        let stats = stats.clone();
        use_effect_with((is_admin, *reload), move |(is_admin, _)| {
            if *is_admin {
                spawn_local(async move {
                    match surveys_api::survey_stats(&client).await {
                        Ok(found) => stats.set(Some(found)),
                        Err(error) => log::error!("Fail to fetch survey stats, error={error}"),
                    }
                });
            }
        });
    }

    let refresh = {
        let reload = reload.clone();
        let dialog = dialog.clone();
        Callback::from(move |_: ()| {
            dialog.set(Dialog::Closed);
            reload.set(reload.wrapping_add(1));
        })
    };

    let close_dialog = {
        let dialog = dialog.clone();
        Callback::from(move |_: ()| dialog.set(Dialog::Closed))
    };

    let on_query = {
        let query = query.clone();
        Callback::from(move |next: GridQuery| query.set(next))
    };

    let set_filter = {
        let filter = filter.clone();
        let query = query.clone();
        let dialog = dialog.clone();
        Callback::from(move |status: Option<String>| {
            filter.set(SurveyFilter {
                status: status.and_then(|s| SurveyStatus::from_str(&s).ok()),
            });
            let mut next = (*query).clone();
            next.go_to(1);
            query.set(next);
            dialog.set(Dialog::Closed);
        })
    };

    let start_survey = {
        let client = context.client.clone();
        Callback::from(move |survey_id: String| {
            let client = client.clone();
            spawn_local(async move {
                match surveys_api::start_survey(&client, &survey_id).await {
                    Ok(survey) => {
                        if let Err(error) = stash_survey(&WebStorage::Session, &survey) {
                            log::error!("Fail to keep the started survey, error={error}");
                            client.navigator().alert(&error.message());
                            return;
                        }
                        log::info!("Survey started, id={}", survey.id);
                        client.navigator().navigate(COUNTING_PATH);
                    }
                    Err(Error::SessionTerminated | Error::ErrorPage { .. }) => {}
                    Err(error) => {
                        log::warn!("Fail to start survey, id={survey_id}, error={error}");
                        client.navigator().alert(&error.message());
                    }
                }
            });
        })
    };

    let end_survey = {
        let client = context.client.clone();
        let refresh = refresh.clone();
        Callback::from(move |survey_id: String| {
            let client = client.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match surveys_api::end_survey(&client, &survey_id).await {
                    Ok(_) => refresh.emit(()),
                    Err(error) => {
                        log::warn!("Fail to end survey, id={survey_id}, error={error}");
                        client.navigator().alert(&error.message());
                    }
                }
            });
        })
    };

    let on_confirm_delete = {
        let client = context.client.clone();
        let dialog = dialog.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            let Dialog::ConfirmDelete(survey) = (*dialog).clone() else {
                return;
            };
            let client = client.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match surveys_api::delete_survey(&client, &survey.id).await {
                    Ok(_) => refresh.emit(()),
                    Err(error) => {
                        log::warn!("Fail to delete survey, id={}, error={error}", survey.id);
                        client.navigator().alert(&error.message());
                    }
                }
            });
        })
    };

    let now = Utc::now();
    let mut page_surveys = (*surveys).clone();
    sort_surveys(&mut page_surveys, &query.sort.sort_by, query.sort.descending);

    let rows: Vec<GridRow> = page_surveys
        .into_iter()
        .map(|survey| {
            let mut actions = Vec::new();
            if is_admin {
                let edit = survey.clone();
                let dialog_edit = dialog.clone();
                actions.push(RowAction {
                    label: "Edit".into(),
                    icon: "bi-pencil",
                    on_select: Callback::from(move |_| dialog_edit.set(Dialog::Edit(edit.clone()))),
                });
                if survey.display_status(now) == SurveyStatus::Active {
                    let id = survey.id.clone();
                    let end_survey = end_survey.clone();
                    actions.push(RowAction {
                        label: "End survey".into(),
                        icon: "bi-stop-circle",
                        on_select: Callback::from(move |_| end_survey.emit(id.clone())),
                    });
                }
                let delete = survey.clone();
                let dialog_delete = dialog.clone();
                actions.push(RowAction {
                    label: "Delete".into(),
                    icon: "bi-trash",
                    on_select: Callback::from(move |_| dialog_delete.set(Dialog::ConfirmDelete(delete.clone()))),
                });
            }
            if is_agent && survey.can_start(now) {
                let id = survey.id.clone();
                let start_survey = start_survey.clone();
                actions.push(RowAction {
                    label: "Start counting".into(),
                    icon: "bi-play-circle",
                    on_select: Callback::from(move |_| start_survey.emit(id.clone())),
                });
            }
            let status_cell = match (is_agent, survey.start_blocker(now)) {
                (true, Some(blocker)) => html! {
                    <>
                        {survey.display_status(now).to_string()}
                        <div class="small text-muted">{blocker.description()}</div>
                    </>
                },
                _ => html! { {survey.display_status(now).to_string()} },
            };
            GridRow {
                id: survey.id.clone(),
                cells: vec![
                    html! { {survey.name.clone()} },
                    html! { {survey.start_point.clone()} },
                    html! { {survey.end_point.clone()} },
                    status_cell,
                    html! { {survey.start_point_agent_name().to_string()} },
                    html! { {survey.end_point_agent_name().to_string()} },
                    html! { {to_grid_date(survey.scheduled_start_time)} },
                    html! { {to_grid_date(survey.scheduled_end_time)} },
                ],
                actions,
            }
        })
        .collect();

    let mut grid_query = (*query).clone();
    grid_query.set_total_pages(*total_pages);

    let open_filters = {
        let dialog = dialog.clone();
        Callback::from(move |_: ()| dialog.set(Dialog::Filters))
    };

    let filter_bubbles = match filter.status {
        Some(status) => html! {
            <FilterBubble label={format!("Status: {status}")} on_clear={set_filter.reform(|_: ()| None)} />
        },
        None => html! {},
    };

    let toolbar = if is_admin {
        let dialog = dialog.clone();
        html! {
            <button class="btn btn-sm btn-primary text-nowrap" onclick={Callback::from(move |_: MouseEvent| dialog.set(Dialog::Create))}>
                <i class="bi bi-plus"></i>{" Create survey"}
            </button>
        }
    } else {
        html! {}
    };

    let status_options: Vec<SelectOption> = [SurveyStatus::Active, SurveyStatus::Inactive, SurveyStatus::Archived]
        .iter()
        .map(|status| (status.to_string(), status.to_string()))
        .collect();

    let dialog_html = match &*dialog {
        Dialog::Closed => html! {},
        Dialog::Filters => html! {
            <FiltersModal
                label="Status"
                options={status_options}
                selected={filter.status.map(|status| status.to_string())}
                on_apply={set_filter.clone()}
                on_close={close_dialog.clone()} />
        },
        Dialog::Create => html! {
            <SurveyModal on_saved={refresh.clone()} on_close={close_dialog.clone()} />
        },
        Dialog::Edit(survey) => html! {
            <SurveyModal survey={Some(survey.clone())} on_saved={refresh.clone()} on_close={close_dialog.clone()} />
        },
        Dialog::ConfirmDelete(survey) => html! {
            <Modal
                title="Delete survey"
                on_close={close_dialog.clone()}
                footer={html! {
                    <>
                        <button class="btn btn-secondary" onclick={close_dialog.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                        <button class="btn btn-danger" onclick={on_confirm_delete}>{"Delete"}</button>
                    </>
                }}>
                <p>{format!("Delete the survey \"{}\"?", survey.name)}</p>
            </Modal>
        },
    };

    html! {
        <div class="container-fluid">
            <h2 class="mb-3">{"Surveys"}</h2>
            if let Some(stats) = &*stats {
                {stats_cards(stats)}
            }
            <DataGrid
                columns={COLUMNS.to_vec()}
                rows={rows}
                query={grid_query}
                on_query={on_query}
                applied_filters={filter.applied_count()}
                on_open_filters={Some(open_filters)}
                filter_bubbles={filter_bubbles}
                toolbar={toolbar}
                loading={*loading} />
            {dialog_html}
        </div>
    }
}
