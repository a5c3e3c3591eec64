use client::api::users_api;
use client::grid::{GridQuery, Selection};
use shared::{User, UserFilter, UserListQuery};
use yew::{platform::spawn_local, prelude::*};

use crate::app::use_app_context;
use crate::components::atoms::select::SelectOption;
use crate::components::composite::data_grid::{DataGrid, GridColumn, GridRow, RowAction};
use crate::components::composite::filters_modal::{FilterBubble, FiltersModal};
use crate::components::composite::modal::Modal;
use crate::components::composite::user_modal::UserModal;
use crate::platform::save_download;

const COLUMNS: [GridColumn; 5] = [
    GridColumn::new("full_name", "Full name"),
    GridColumn::new("email", "Email"),
    GridColumn::fixed("phone", "Phone"),
    GridColumn::new("role", "Role"),
    GridColumn::new("countingPost", "Counting post"),
];

const ROLE_OPTIONS: [(&str, &str); 2] = [("admin", "Admin"), ("agent", "Agent")];

#[derive(Debug, Clone, PartialEq)]
enum Dialog {
    Closed,
    Filters,
    Create,
    Edit(User),
    ConfirmDelete(Vec<String>),
}

fn sort_users(users: &mut [User], sort_by: &str, descending: bool) {
    users.sort_by(|a, b| {
        let ordering = match sort_by {
            "email" => a.email.cmp(&b.email),
            "role" => a.role_name().cmp(b.role_name()),
            "countingPost" => a.counting_post.map(|p| p.to_string()).cmp(&b.counting_post.map(|p| p.to_string())),
            _ => a.full_name.to_lowercase().cmp(&b.full_name.to_lowercase()),
        };
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let context = use_app_context();
    let query = use_state(|| GridQuery::new("full_name"));
    let filter = use_state(UserFilter::default);
    let users = use_state(Vec::<User>::new);
    let total_pages = use_state(|| 1u32);
    let loading = use_state(|| false);
    let selection = use_state(Selection::default);
    let dialog = use_state(|| Dialog::Closed);
    let reload = use_state(|| 0u32);

    let list_query = UserListQuery {
        page: Some(query.page),
        limit: Some(query.limit),
        search: query.search_term(),
        filter: (*filter).clone(),
    };

    {
        let client = context.client.clone();
        let users = users.clone();
        let total_pages = total_pages.clone();
        let loading = loading.clone();
        use_effect_with((list_query, *reload), move |(list_query, _)| {
            let list_query = list_query.clone();
            loading.set(true);
            spawn_local(async move {
                match users_api::list_users(&client, &list_query).await {
                    Ok(page) => {
                        total_pages.set(page.total_pages);
                        users.set(page.docs);
                    }
                    Err(error) => log::error!("Fail to fetch users, error={error}"),
                }
                loading.set(false);
            });
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

    let on_selection = {
        let selection = selection.clone();
        Callback::from(move |next: Selection| selection.set(next))
    };

    let set_filter = {
        let filter = filter.clone();
        let query = query.clone();
        let dialog = dialog.clone();
        Callback::from(move |role: Option<String>| {
            filter.set(UserFilter { role });
            let mut next = (*query).clone();
            next.go_to(1);
            query.set(next);
            dialog.set(Dialog::Closed);
        })
    };

    let on_export = {
        let client = context.client.clone();
        let query = query.clone();
        let filter = filter.clone();
        Callback::from(move |_: MouseEvent| {
            let client = client.clone();
            let search = query.search_term();
            let filter = (*filter).clone();
            spawn_local(async move {
                match users_api::export_users_csv(&client, search.as_deref(), &filter).await {
                    Ok(download) => {
                        log::info!("Users exported, file={}", download.file_name);
                        if let Err(error) = save_download(&download) {
                            log::error!("Fail to save export, error={error:?}");
                        }
                    }
                    Err(error) => {
                        log::warn!("Fail to export users, error={error}");
                        client.navigator().alert(&error.message());
                    }
                }
            });
        })
    };

    let on_confirm_delete = {
        let client = context.client.clone();
        let dialog = dialog.clone();
        let selection = selection.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            let Dialog::ConfirmDelete(ids) = (*dialog).clone() else {
                return;
            };
            let client = client.clone();
            let selection = selection.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                for id in &ids {
                    if let Err(error) = users_api::delete_user(&client, id).await {
                        log::warn!("Fail to delete user, id={id}, error={error}");
                        client.navigator().alert(&error.message());
                        break;
                    }
                }
                selection.set(Selection::default());
                refresh.emit(());
            });
        })
    };

    let mut page_users = (*users).clone();
    sort_users(&mut page_users, &query.sort.sort_by, query.sort.descending);

    let rows: Vec<GridRow> = page_users
        .into_iter()
        .map(|user| {
            let edit = user.clone();
            let dialog_edit = dialog.clone();
            let delete_id = user.id.clone();
            let dialog_delete = dialog.clone();
            GridRow {
                id: user.id.clone(),
                cells: vec![
                    html! { {user.full_name.clone()} },
                    html! { {user.email.clone()} },
                    html! { {user.phone.clone().unwrap_or_else(|| "-".to_string())} },
                    html! { {user.role_name().to_string()} },
                    html! { {user.counting_post.map(|post| post.to_string()).unwrap_or_else(|| "-".to_string())} },
                ],
                actions: vec![
                    RowAction {
                        label: "Edit".into(),
                        icon: "bi-pencil",
                        on_select: Callback::from(move |_| dialog_edit.set(Dialog::Edit(edit.clone()))),
                    },
                    RowAction {
                        label: "Delete".into(),
                        icon: "bi-trash",
                        on_select: Callback::from(move |_| {
                            dialog_delete.set(Dialog::ConfirmDelete(vec![delete_id.clone()]))
                        }),
                    },
                ],
            }
        })
        .collect();

    let mut grid_query = (*query).clone();
    grid_query.set_total_pages(*total_pages);

    let open_filters = {
        let dialog = dialog.clone();
        Callback::from(move |_: ()| dialog.set(Dialog::Filters))
    };

    let filter_bubbles = match &filter.role {
        Some(role) => html! {
            <FilterBubble label={format!("Role: {role}")} on_clear={set_filter.reform(|_: ()| None)} />
        },
        None => html! {},
    };

    let on_delete_selected = {
        let dialog = dialog.clone();
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| {
            let ids = selection.ids().map(str::to_owned).collect();
            dialog.set(Dialog::ConfirmDelete(ids));
        })
    };

    let on_create = {
        let dialog = dialog.clone();
        Callback::from(move |_: MouseEvent| dialog.set(Dialog::Create))
    };

    let toolbar = html! {
        <>
            if !selection.is_empty() {
                <button class="btn btn-sm btn-outline-danger text-nowrap" onclick={on_delete_selected}>
                    {format!("Delete selected ({})", selection.len())}
                </button>
            }
            <button class="btn btn-sm btn-outline-secondary text-nowrap" onclick={on_export}>
                <i class="bi bi-download"></i>{" Export CSV"}
            </button>
            <button class="btn btn-sm btn-primary text-nowrap" onclick={on_create}>
                <i class="bi bi-plus"></i>{" Create user"}
            </button>
        </>
    };

    let role_options: Vec<SelectOption> = ROLE_OPTIONS
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect();

    let dialog_html = match &*dialog {
        Dialog::Closed => html! {},
        Dialog::Filters => html! {
            <FiltersModal
                label="Role"
                options={role_options}
                selected={filter.role.clone()}
                on_apply={set_filter.clone()}
                on_close={close_dialog.clone()} />
        },
        Dialog::Create => html! {
            <UserModal on_saved={refresh.clone()} on_close={close_dialog.clone()} />
        },
        Dialog::Edit(user) => html! {
            <UserModal user={Some(user.clone())} on_saved={refresh.clone()} on_close={close_dialog.clone()} />
        },
        Dialog::ConfirmDelete(ids) => html! {
            <Modal
                title="Delete users"
                on_close={close_dialog.clone()}
                footer={html! {
                    <>
                        <button class="btn btn-secondary" onclick={close_dialog.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                        <button class="btn btn-danger" onclick={on_confirm_delete}>{"Delete"}</button>
                    </>
                }}>
                <p>{format!("Delete {} user(s)? This cannot be undone.", ids.len())}</p>
            </Modal>
        },
    };

    html! {
        <div class="container-fluid">
            <h2 class="mb-3">{"Users"}</h2>
            <DataGrid
                columns={COLUMNS.to_vec()}
                rows={rows}
                query={grid_query}
                on_query={on_query}
                selection={Some((*selection).clone())}
                on_selection={on_selection}
                applied_filters={filter.applied_count()}
                on_open_filters={Some(open_filters)}
                filter_bubbles={filter_bubbles}
                toolbar={toolbar}
                loading={*loading} />
            {dialog_html}
        </div>
    }
}
