pub mod data_grid;
pub mod filters_modal;
pub mod login_form;
pub mod modal;
pub mod navigation_bar;
pub mod new_password_form;
pub mod pagination_controls;
pub mod search_bar;
pub mod send_code_form;
pub mod survey_modal;
pub mod user_modal;
