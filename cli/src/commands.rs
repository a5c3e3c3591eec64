use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use client::api::auth_api::{self, LoginOutcome};
use client::api::{surveys_api, users_api, FormOutcome};
use client::counting::{self, clear_survey, format_countdown, load_survey, stash_survey, CountingSession};
use client::format::to_grid_date;
use client::grid::DEFAULT_RESULTS_PER_PAGE;
use client::password::unmet_rules;
use client::routes::LOGIN_PATH;
use client::{ApiClient, KeyValueStorage};
use secrecy::SecretString;
use shared::{
    ChangePasswordRequest, ConfirmForgotPasswordRequest, CountingPost, CreateUserRequest, SignInRequest,
    Survey, SurveyFilter, SurveyListQuery, SurveyStatus, UpdateUserRequest, User, UserFilter, UserListQuery,
    UserType, VehicleCounts,
};
use tracing::info;

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long, env = "SURVEY_EMAIL")]
    email: String,

    #[arg(long, env = "SURVEY_PASSWORD", hide_env_values = true)]
    password: String,

    /// Replacement when the account still has a temporary password.
    #[arg(long, env = "SURVEY_NEW_PASSWORD", hide_env_values = true)]
    new_password: Option<String>,
}

#[derive(Args, Debug)]
pub struct ChangePasswordArgs {
    #[arg(long, hide_env_values = true, env = "SURVEY_PASSWORD")]
    current_password: String,

    #[arg(long, hide_env_values = true, env = "SURVEY_NEW_PASSWORD")]
    new_password: String,
}

#[derive(Subcommand, Debug)]
pub enum ResetPasswordCommand {
    /// Email a reset code.
    SendCode {
        #[arg(long)]
        email: String,
    },
    /// Check an emailed code without using it.
    CheckCode {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
    },
    /// Set a new password with an emailed code.
    Confirm {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
        #[arg(long, env = "SURVEY_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
}

#[derive(Args, Debug)]
pub struct PageArgs {
    #[arg(long)]
    search: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = DEFAULT_RESULTS_PER_PAGE)]
    limit: u32,
}

#[derive(Args, Debug)]
pub struct UsersListArgs {
    #[clap(flatten)]
    paging: PageArgs,

    /// Role name, e.g. `agent`.
    #[arg(long)]
    role: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List(UsersListArgs),
    Show {
        id: String,
    },
    /// Save the user list as CSV.
    Export {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// Defaults to the name the server suggests.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Create an agent account.
    Create {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        counting_post: Option<CountingPost>,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct SurveysListArgs {
    #[clap(flatten)]
    pub paging: PageArgs,

    #[arg(long)]
    pub status: Option<SurveyStatus>,
}

#[derive(Subcommand, Debug)]
pub enum SurveysCommand {
    List(SurveysListArgs),
    Show {
        id: String,
    },
    /// Start counting a survey (agent). It becomes the current survey.
    Start {
        id: String,
    },
    End {
        id: String,
    },
    Delete {
        id: String,
    },
    /// Totals across all surveys (admin).
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum CountCommand {
    /// Show the current survey and when counts can be submitted.
    Show,
    /// Submit the tally for the current survey.
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Survey to submit for, defaults to the current one.
    #[arg(long)]
    survey: Option<String>,
    #[arg(long, default_value_t = 0)]
    motorcycle: u32,
    #[arg(long, default_value_t = 0)]
    car: u32,
    #[arg(long, default_value_t = 0)]
    truck: u32,
    #[arg(long, default_value_t = 0)]
    bus: u32,
    #[arg(long, default_value_t = 0)]
    pedestrian: u32,
}

impl SubmitArgs {
    fn counts(&self) -> VehicleCounts {
        VehicleCounts {
            motorcycle: self.motorcycle,
            car: self.car,
            truck: self.truck,
            bus: self.bus,
            pedestrian: self.pedestrian,
        }
    }
}

fn check_new_password(password: &str) -> Result<()> {
    let unmet: Vec<&str> = unmet_rules(password).iter().map(|rule| rule.description()).collect();
    if !unmet.is_empty() {
        bail!("The new password must: {}", unmet.join("; "));
    }
    Ok(())
}

fn form_result(outcome: FormOutcome) -> Result<()> {
    match outcome {
        FormOutcome::Accepted => Ok(()),
        FormOutcome::Rejected(field_error) => Err(anyhow!("{}: {}", field_error.field, field_error.text())),
    }
}

fn require_sign_in(client: &ApiClient) -> Result<()> {
    if !client.store().is_authorized() {
        bail!("Not signed in, run `login` first");
    }
    Ok(())
}

fn print_signed_in(client: &ApiClient) {
    if let Some(user) = client.store().user() {
        println!("Signed in as {} <{}> ({})", user.full_name, user.email, user.user_type());
    }
}

pub async fn login(client: &ApiClient, args: LoginArgs) -> Result<()> {
    // 403 means an inactive account here, not a page to escalate to
    client.navigator().navigate(LOGIN_PATH);
    let request = SignInRequest {
        email: args.email.trim().to_owned(),
        password: SecretString::from(args.password),
    };
    match auth_api::login(client, &request).await {
        LoginOutcome::SignedIn => {}
        LoginOutcome::Rejected(field_error) => bail!(field_error.text()),
        LoginOutcome::PasswordChangeRequired(pending) => {
            let Some(new_password) = args.new_password else {
                bail!("This account has a temporary password, sign in again with --new-password");
            };
            check_new_password(&new_password)?;
            let outcome =
                auth_api::change_temporary_password(client, &pending, SecretString::from(new_password)).await?;
            form_result(outcome)?;
        }
    }
    print_signed_in(client);
    Ok(())
}

pub fn logout(client: &ApiClient, storage: &dyn KeyValueStorage) -> Result<()> {
    client.store().logout();
    clear_survey(storage);
    println!("Signed out");
    Ok(())
}

pub fn whoami(client: &ApiClient) -> Result<()> {
    let user = client.store().user().ok_or_else(|| anyhow!("Not signed in"))?;
    println!("id:            {}", user.id);
    println!("name:          {}", user.full_name);
    println!("email:         {}", user.email);
    println!("phone:         {}", user.phone.as_deref().unwrap_or("-"));
    println!("role:          {}", user.role.as_deref().unwrap_or("-"));
    println!(
        "counting post: {}",
        user.counting_post.map(|post| post.to_string()).unwrap_or_else(|| "-".to_owned())
    );
    Ok(())
}

pub async fn change_password(client: &ApiClient, args: ChangePasswordArgs) -> Result<()> {
    require_sign_in(client)?;
    check_new_password(&args.new_password)?;
    let request = ChangePasswordRequest {
        current_password: SecretString::from(args.current_password),
        new_password: SecretString::from(args.new_password),
    };
    form_result(auth_api::change_password(client, &request).await?)?;
    println!("Password changed");
    Ok(())
}

pub async fn reset_password(client: &ApiClient, command: ResetPasswordCommand) -> Result<()> {
    client.store().logout();
    match command {
        ResetPasswordCommand::SendCode { email } => {
            if !auth_api::send_forgot_password_email(client, email.trim()).await? {
                bail!("Fail to send the reset code");
            }
            println!("If the account exists a code was sent to {email}");
        }
        ResetPasswordCommand::CheckCode { email, code } => {
            form_result(auth_api::check_forgot_password_code(client, email.trim(), code.trim()).await?)?;
            println!("The code is valid");
        }
        ResetPasswordCommand::Confirm {
            email,
            code,
            new_password,
        } => {
            check_new_password(&new_password)?;
            let request = ConfirmForgotPasswordRequest {
                email: email.trim().to_owned(),
                confirmation_code: code.trim().to_owned(),
                new_password: SecretString::from(new_password),
            };
            if !auth_api::confirm_forgot_password(client, &request).await? {
                bail!("Fail to change the password");
            }
            println!("Password changed, sign in with the new one");
        }
    }
    Ok(())
}

fn print_user(user: &User) {
    println!(
        "{:<26} {:<24} {:<32} {:<14} {:<8} {}",
        user.id,
        user.full_name,
        user.email,
        user.phone.as_deref().unwrap_or("-"),
        user.role_name(),
        user.counting_post.map(|post| post.to_string()).unwrap_or_else(|| "-".to_owned()),
    );
}

pub async fn users(client: &ApiClient, command: UsersCommand) -> Result<()> {
    require_sign_in(client)?;
    match command {
        UsersCommand::List(args) => {
            let query = UserListQuery {
                page: Some(args.paging.page),
                limit: Some(args.paging.limit),
                search: args.paging.search.clone(),
                filter: UserFilter { role: args.role },
            };
            let page = users_api::list_users(client, &query).await?;
            for user in &page.docs {
                print_user(user);
            }
            println!("page {} of {}, {} users", page.page, page.total_pages, page.total_docs);
        }
        UsersCommand::Show { id } => print_user(&users_api::user_details(client, &id).await?),
        UsersCommand::Export { search, role, output } => {
            let download = users_api::export_users_csv(client, search.as_deref(), &UserFilter { role }).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(&download.file_name));
            fs::write(&path, &download.bytes)?;
            println!("Saved {}", path.display());
        }
        UsersCommand::Create {
            full_name,
            email,
            phone,
        } => {
            let request = CreateUserRequest {
                full_name,
                email,
                phone,
            };
            form_result(users_api::create_user(client, &request).await)?;
            println!("Created {}", request.email);
        }
        UsersCommand::Update {
            id,
            full_name,
            phone,
            counting_post,
        } => {
            let request = UpdateUserRequest {
                id,
                full_name,
                phone,
                counting_post,
                picture: None,
            };
            print_user(&users_api::update_user(client, &request).await?);
        }
        UsersCommand::Delete { id } => {
            users_api::delete_user(client, &id).await?;
            println!("Deleted {id}");
        }
    }
    Ok(())
}

fn print_survey(survey: &Survey, user_type: UserType) {
    let now = Utc::now();
    let blocker = match user_type {
        UserType::Agent => survey.start_blocker(now).map(|b| b.description()).unwrap_or("can start"),
        _ => "",
    };
    println!(
        "{:<26} {:<24} {:<10} {:<20} {:<20} {:<18} {:<18} {}",
        survey.id,
        survey.name,
        survey.display_status(now).to_string(),
        survey.start_point_agent_name(),
        survey.end_point_agent_name(),
        to_grid_date(survey.scheduled_start_time),
        to_grid_date(survey.scheduled_end_time),
        blocker,
    );
}

pub async fn surveys(client: &ApiClient, storage: &dyn KeyValueStorage, command: SurveysCommand) -> Result<()> {
    require_sign_in(client)?;
    let user_type = client.store().user_type();
    match command {
        SurveysCommand::List(args) => {
            let query = SurveyListQuery {
                page: args.paging.page,
                limit: args.paging.limit,
                search: args.paging.search.clone(),
                filter: SurveyFilter { status: args.status },
            };
            let page = surveys_api::list_surveys(client, &query).await?;
            for survey in &page.docs {
                print_survey(survey, user_type);
            }
            println!("page {} of {}, {} surveys", page.page, page.total_pages, page.total_docs);
        }
        SurveysCommand::Show { id } => {
            let survey = surveys_api::get_survey(client, &id).await?;
            print_survey(&survey, user_type);
            println!("{} -> {}", survey.start_point, survey.end_point);
            println!("counts: {}", serde_json::to_string(&survey.counts)?);
        }
        SurveysCommand::Start { id } => {
            let survey = surveys_api::get_survey(client, &id).await?;
            if let Some(blocker) = survey.start_blocker(Utc::now()) {
                bail!(blocker.description());
            }
            let started = surveys_api::start_survey(client, &id).await?;
            stash_survey(storage, &started)?;
            info!(survey_id = %started.id, "Survey started");
            println!("Counting {}, submit with `count submit`", started.name);
        }
        SurveysCommand::End { id } => {
            let survey = surveys_api::end_survey(client, &id).await?;
            println!("Ended {}", survey.name);
        }
        SurveysCommand::Delete { id } => {
            surveys_api::delete_survey(client, &id).await?;
            println!("Deleted {id}");
        }
        SurveysCommand::Stats => {
            let stats = surveys_api::survey_stats(client).await?;
            println!(
                "surveys:     {} total, {} active, {} inactive, {} archived",
                stats.total_surveys, stats.active_surveys, stats.inactive_surveys, stats.archived_surveys
            );
            println!("cars:        {}", stats.total_cars);
            println!("motorcycles: {}", stats.total_motorcycles);
            println!("vehicles:    {}", stats.total_vehicles);
        }
    }
    Ok(())
}

pub async fn count(client: &ApiClient, storage: &dyn KeyValueStorage, command: CountCommand) -> Result<()> {
    require_sign_in(client)?;
    match command {
        CountCommand::Show => {
            let survey = load_survey(storage).ok_or_else(|| anyhow!("No survey is being counted"))?;
            let session = CountingSession::new(survey);
            let survey = session.survey();
            println!("{} ({} -> {})", survey.name, survey.start_point, survey.end_point);
            match session.seconds_until_submit(Utc::now()) {
                Some(0) => println!("Submit is open"),
                Some(seconds) => println!("Submit opens in {}", format_countdown(seconds)),
                None => println!("The survey has no end time, submit stays closed"),
            }
        }
        CountCommand::Submit(args) => {
            let survey = match &args.survey {
                Some(id) => surveys_api::get_survey(client, id).await?,
                None => load_survey(storage)
                    .ok_or_else(|| anyhow!("No survey is being counted, run `surveys start` first"))?,
            };
            let session = CountingSession::new(survey).with_counts(args.counts());
            if !session.can_submit(Utc::now()) {
                match session.seconds_until_submit(Utc::now()) {
                    Some(seconds) => bail!("Submit opens in {}", format_countdown(seconds)),
                    None => bail!("The survey has no end time, counts cannot be submitted"),
                }
            }
            let outcome = counting::submit(client, &session, storage).await;
            let message = outcome.message().unwrap_or(counting::SESSION_EXPIRED_MESSAGE);
            if outcome != counting::SubmitOutcome::Submitted {
                bail!(message);
            }
            println!("{message}");
        }
    }
    Ok(())
}
