mod common;

use chrono::{DateTime, Duration, Utc};
use client::counting::{self, CountingSession, SubmitOutcome};
use client::storage::CURRENT_SURVEY_KEY;
use client::KeyValueStorage;
use common::test_backend::TestBackend;
use common::{envelope, failed_envelope, survey_json};
use serde_json::json;
use shared::{CountingPost, Survey, UserProfilePatch, VehicleKind};

fn survey() -> anyhow::Result<Survey> {
    Ok(serde_json::from_value(survey_json(
        "s-1",
        "2024-05-01T08:00:00Z",
        "2024-05-01T10:00:00Z",
        "active",
    ))?)
}

fn at(value: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(value.parse()?)
}

#[test]
fn test_tally_never_goes_negative() -> anyhow::Result<()> {
    let mut session = CountingSession::new(survey()?);
    session.increment(VehicleKind::Car);
    session.increment(VehicleKind::Car);
    session.decrement(VehicleKind::Car);
    session.decrement(VehicleKind::Bus);
    session.increment(VehicleKind::Pedestrian);

    let counts = session.counts();
    assert_eq!(counts.car, 1);
    assert_eq!(counts.bus, 0);
    assert_eq!(counts.total(), 2);
    Ok(())
}

#[test]
fn test_submit_opens_two_minutes_before_end() -> anyhow::Result<()> {
    let session = CountingSession::new(survey()?);

    let early = at("2024-05-01T09:55:30Z")?;
    assert!(!session.can_submit(early));
    assert_eq!(session.seconds_until_submit(early), Some(150));
    assert_eq!(
        counting::format_countdown(session.seconds_until_submit(early).unwrap_or_default()),
        "2:30"
    );

    let open = at("2024-05-01T09:58:00Z")?;
    assert!(session.can_submit(open));
    assert!(session.can_submit(open + Duration::hours(1)));
    assert_eq!(session.seconds_until_submit(open), Some(0));
    Ok(())
}

#[test]
fn test_submit_stays_closed_without_end_time() -> anyhow::Result<()> {
    let mut survey = survey()?;
    survey.scheduled_end_time = None;
    let session = CountingSession::new(survey);

    assert!(!session.can_submit(at("2030-01-01T00:00:00Z")?));
    assert_eq!(session.seconds_until_submit(Utc::now()), None);
    Ok(())
}

#[test]
fn test_stash_round_trip_and_corruption() -> anyhow::Result<()> {
    let backend = TestBackend::anonymous();
    let survey = survey()?;

    counting::stash_survey(&backend.storage, &survey)?;
    assert_eq!(counting::load_survey(&backend.storage), Some(survey));

    backend.storage.set(CURRENT_SURVEY_KEY, "{broken")?;
    assert_eq!(counting::load_survey(&backend.storage), None);
    assert_eq!(backend.storage.get(CURRENT_SURVEY_KEY), None);
    Ok(())
}

#[tokio::test]
async fn test_submit_uses_profile_counting_post() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("agent");
    backend.client.store().update_user_data(UserProfilePatch {
        counting_post: Some(CountingPost::End),
        ..UserProfilePatch::default()
    });
    let mut session = CountingSession::new(survey()?);
    session.increment(VehicleKind::Truck);
    counting::stash_survey(&backend.storage, session.survey())?;
    backend.transport.push(envelope(200, json!(null)));

    let outcome = counting::submit(&backend.client, &session, &backend.storage).await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(backend.transport.paths(), vec!["surveys/counting"]);
    let body: serde_json::Value =
        serde_json::from_str(backend.transport.requests()[0].body.as_deref().unwrap_or("{}"))?;
    assert_eq!(body["surveyId"], json!("s-1"));
    assert_eq!(body["countingPost"], json!("end"));
    assert_eq!(body["counts"]["truck"], json!(1));
    assert_eq!(backend.storage.get(CURRENT_SURVEY_KEY), None);
    Ok(())
}

#[tokio::test]
async fn test_submit_failures_are_classified() -> anyhow::Result<()> {
    let session = CountingSession::new(survey()?);

    let denied = TestBackend::signed_in("agent");
    denied
        .transport
        .push(failed_envelope(200, "Access denied for this token"));
    assert_eq!(
        counting::submit(&denied.client, &session, &denied.storage).await,
        SubmitOutcome::SessionExpired
    );
    assert!(!denied.client.store().is_authorized());
    assert_eq!(denied.navigator.visited(), vec!["/login"]);
    assert_eq!(denied.navigator.alerts().len(), 1);

    let forbidden = TestBackend::signed_in("agent");
    forbidden
        .transport
        .push(failed_envelope(200, "No permission for this survey"));
    assert_eq!(
        counting::submit(&forbidden.client, &session, &forbidden.storage).await,
        SubmitOutcome::PermissionDenied
    );
    assert!(forbidden.client.store().is_authorized());

    let broken = TestBackend::signed_in("agent");
    broken
        .transport
        .push(json_body_error(422, "Counts rejected"));
    assert_eq!(
        counting::submit(&broken.client, &session, &broken.storage).await,
        SubmitOutcome::Failed
    );
    Ok(())
}

fn json_body_error(status: u16, message: &str) -> client::HttpResponse {
    common::json_response(status, json!({ "message": message }))
}
