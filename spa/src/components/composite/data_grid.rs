use client::grid::{
    filters_label, ActionsLayout, EmptyState, GridQuery, Selection, RESULTS_PER_PAGE_OPTIONS,
};
use yew::prelude::*;

use crate::components::atoms::checkbox::Checkbox;
use crate::components::atoms::select::{Select, SelectOption};
use crate::components::composite::pagination_controls::PaginationControls;
use crate::components::composite::search_bar::SearchBar;

#[derive(Debug, Clone, PartialEq)]
pub struct GridColumn {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

impl GridColumn {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        GridColumn {
            key,
            label,
            sortable: true,
        }
    }

    pub const fn fixed(key: &'static str, label: &'static str) -> Self {
        GridColumn {
            key,
            label,
            sortable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowAction {
    pub label: AttrValue,
    pub icon: &'static str,
    pub on_select: Callback<()>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub id: String,
    pub cells: Vec<Html>,
    pub actions: Vec<RowAction>,
}

#[derive(PartialEq, Properties)]
pub struct Props {
    pub columns: Vec<GridColumn>,
    pub rows: Vec<GridRow>,
    pub query: GridQuery,
    pub on_query: Callback<GridQuery>,
    #[prop_or_default]
    pub selection: Option<Selection>,
    #[prop_or_default]
    pub on_selection: Callback<Selection>,
    #[prop_or_default]
    pub applied_filters: usize,
    #[prop_or_default]
    pub on_open_filters: Option<Callback<()>>,
    /// Active filter chips rendered under the toolbar.
    #[prop_or_default]
    pub filter_bubbles: Html,
    /// Extra toolbar buttons.
    #[prop_or_default]
    pub toolbar: Html,
    #[prop_or_default]
    pub loading: bool,
}

fn action_button(action: &RowAction, class: &'static str) -> Html {
    let on_select = action.on_select.clone();
    let onclick = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        on_select.emit(());
    });
    html! {
        <button type="button" class={class} title={action.label.clone()} onclick={onclick}>
            <i class={classes!("bi", action.icon)}></i>
            if class == "dropdown-item" {
                {" "}{action.label.clone()}
            }
        </button>
    }
}

#[function_component(RowActions)]
fn row_actions(props: &RowActionsProps) -> Html {
    let open = use_state(|| false);
    match ActionsLayout::for_count(props.actions.len()) {
        ActionsLayout::None => html! {},
        ActionsLayout::Single => action_button(&props.actions[0], "btn btn-sm btn-outline-secondary"),
        ActionsLayout::Menu => {
            let toggle = {
                let open = open.clone();
                Callback::from(move |_: MouseEvent| open.set(!*open))
            };
            let items = props.actions.iter().map(|action| {
                html! { <li>{action_button(action, "dropdown-item")}</li> }
            });
            html! {
                <div class="dropdown">
                    <button type="button" class="btn btn-sm btn-outline-secondary" onclick={toggle}>
                        <i class="bi bi-three-dots-vertical"></i>
                    </button>
                    <ul class={classes!("dropdown-menu", "dropdown-menu-end", open.then_some("show"))}>
                        { for items }
                    </ul>
                </div>
            }
        }
    }
}

#[derive(PartialEq, Properties)]
struct RowActionsProps {
    actions: Vec<RowAction>,
}

/// Server-side paged table with search, sorting, row selection and
/// per-row actions.
#[function_component(DataGrid)]
pub fn data_grid(props: &Props) -> Html {
    let page_ids: Vec<String> = props.rows.iter().map(|row| row.id.clone()).collect();
    let has_actions = props.rows.iter().any(|row| !row.actions.is_empty());

    let on_search = {
        let query = props.query.clone();
        let on_query = props.on_query.clone();
        Callback::from(move |term: String| {
            let mut query = query.clone();
            query.set_search(term);
            on_query.emit(query);
        })
    };

    let on_go_to = {
        let query = props.query.clone();
        let on_query = props.on_query.clone();
        Callback::from(move |page: u32| {
            let mut query = query.clone();
            if query.go_to(page) {
                on_query.emit(query);
            }
        })
    };

    let on_limit = {
        let query = props.query.clone();
        let on_query = props.on_query.clone();
        Callback::from(move |value: String| {
            if let Ok(limit) = value.parse::<u32>() {
                let mut query = query.clone();
                query.set_limit(limit);
                on_query.emit(query);
            }
        })
    };

    let header_cells = props.columns.iter().map(|column| {
        if !column.sortable {
            return html! { <th scope="col">{column.label}</th> };
        }
        let key = column.key;
        let onclick = {
            let query = props.query.clone();
            let on_query = props.on_query.clone();
            Callback::from(move |_: MouseEvent| {
                let mut query = query.clone();
                query.sort.toggle(key);
                on_query.emit(query);
            })
        };
        let indicator = match &props.query.sort {
            sort if sort.sort_by == key && sort.descending => "bi bi-caret-down-fill",
            sort if sort.sort_by == key => "bi bi-caret-up-fill",
            _ => "",
        };
        html! {
            <th scope="col" role="button" onclick={onclick}>
                {column.label}{" "}<i class={indicator}></i>
            </th>
        }
    });

    let select_all_html = props.selection.as_ref().map(|selection| {
        let checked = selection.covers(&page_ids);
        let on_toggle = {
            let selection = selection.clone();
            let page_ids = page_ids.clone();
            let on_selection = props.on_selection.clone();
            Callback::from(move |checked: bool| {
                let mut selection = selection.clone();
                selection.set_page(&page_ids, checked);
                on_selection.emit(selection);
            })
        };
        html! {
            <th scope="col"><Checkbox checked={checked} label={"Select all".to_string()} on_toggle={on_toggle} /></th>
        }
    });

    let rows_html = props.rows.iter().map(|row| {
        let select_html = props.selection.as_ref().map(|selection| {
            let on_toggle = {
                let selection = selection.clone();
                let id = row.id.clone();
                let on_selection = props.on_selection.clone();
                Callback::from(move |_: bool| {
                    let mut selection = selection.clone();
                    selection.toggle(&id);
                    on_selection.emit(selection);
                })
            };
            html! {
                <td><Checkbox checked={selection.is_selected(&row.id)} on_toggle={on_toggle} /></td>
            }
        });
        html! {
            <tr key={row.id.clone()}>
                { for select_html }
                { for row.cells.iter().map(|cell| html! { <td>{cell.clone()}</td> }) }
                if has_actions {
                    <td class="text-end"><RowActions actions={row.actions.clone()} /></td>
                }
            </tr>
        }
    });

    let column_count = props.columns.len() + usize::from(props.selection.is_some()) + usize::from(has_actions);
    let empty_state = EmptyState::new(&props.query.search, props.applied_filters);

    let limit_options: Vec<SelectOption> = RESULTS_PER_PAGE_OPTIONS
        .iter()
        .map(|limit| (limit.to_string(), limit.to_string()))
        .collect();

    let filters_button = props.on_open_filters.as_ref().map(|on_open| {
        let on_open = on_open.clone();
        html! {
            <button type="button" class="btn btn-sm btn-outline-primary" onclick={Callback::from(move |_: MouseEvent| on_open.emit(()))}>
                <i class="bi bi-funnel"></i>{" "}{filters_label(props.applied_filters)}
            </button>
        }
    });

    html! {
        <div class="card">
            <div class="card-body">
                <div class="d-flex align-items-center gap-2 mb-2">
                    <SearchBar value={props.query.search.clone()} on_search={on_search} />
                    { for filters_button }
                    {props.toolbar.clone()}
                </div>
                {props.filter_bubbles.clone()}
                <div class="table-responsive">
                    <table class="table table-hover align-middle">
                        <thead>
                            <tr>
                                { for select_all_html }
                                { for header_cells }
                                if has_actions {
                                    <th scope="col"></th>
                                }
                            </tr>
                        </thead>
                        <tbody>
                            if props.loading {
                                <tr>
                                    <td colspan={column_count.to_string()} class="text-center">
                                        <div class="spinner-border spinner-border-sm" role="status"></div>
                                    </td>
                                </tr>
                            } else if props.rows.is_empty() {
                                <tr>
                                    <td colspan={column_count.to_string()} class="text-center text-muted">
                                        {empty_state.message()}
                                    </td>
                                </tr>
                            } else {
                                { for rows_html }
                            }
                        </tbody>
                    </table>
                </div>
                <div class="d-flex justify-content-between align-items-center">
                    <div class="d-flex align-items-center gap-2">
                        <span class="text-muted small">{"Results per page"}</span>
                        <Select
                            id="results-per-page"
                            options={limit_options}
                            selected={Some(props.query.limit.to_string())}
                            on_change={on_limit} />
                    </div>
                    <PaginationControls
                        current_page={props.query.page}
                        total_pages={props.query.total_pages}
                        on_go_to={on_go_to} />
                </div>
            </div>
        </div>
    }
}
