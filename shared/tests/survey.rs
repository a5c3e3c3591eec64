use chrono::{DateTime, Utc};
use serde_json::json;
use shared::{StartBlocker, Survey, SurveyStatus};

fn survey(status: &str) -> anyhow::Result<Survey> {
    Ok(serde_json::from_value(json!({
        "_id": "s-1",
        "name": "Main street",
        "scheduledStartTime": "2024-05-01T08:00:00Z",
        "scheduledEndTime": "2024-05-01T10:00:00Z",
        "status": status,
        "startPointAgent": { "_id": "a-1", "full_name": "Ana" },
    }))?)
}

fn at(value: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(value.parse()?)
}

#[test]
fn test_effective_status_follows_window() -> anyhow::Result<()> {
    let inactive = survey("inactive")?;
    assert_eq!(
        inactive.derive_effective_status(at("2024-05-01T09:00:00Z")?),
        SurveyStatus::Active
    );
    assert_eq!(
        inactive.derive_effective_status(at("2024-05-01T11:00:00Z")?),
        SurveyStatus::Inactive
    );

    let archived = survey("archived")?;
    assert_eq!(
        archived.derive_effective_status(at("2024-05-01T09:00:00Z")?),
        SurveyStatus::Archived
    );

    let mut reported = survey("inactive")?;
    reported.effective_status = Some(SurveyStatus::Terminated);
    assert_eq!(
        reported.display_status(at("2024-05-01T09:00:00Z")?),
        SurveyStatus::Terminated
    );
    Ok(())
}

#[test]
fn test_start_blockers() -> anyhow::Result<()> {
    let inactive = survey("inactive")?;
    assert!(inactive.can_start(at("2024-05-01T08:30:00Z")?));
    assert_eq!(
        inactive.start_blocker(at("2024-05-01T07:00:00Z")?),
        Some(StartBlocker::WaitingForStartTime)
    );
    assert_eq!(
        inactive.start_blocker(at("2024-05-02T07:00:00Z")?),
        Some(StartBlocker::SurveyTimeExpired)
    );
    assert_eq!(
        survey("archived")?.start_blocker(at("2024-05-01T08:30:00Z")?),
        Some(StartBlocker::SurveyArchived)
    );

    let mut unscheduled = survey("active")?;
    unscheduled.scheduled_start_time = None;
    assert_eq!(
        unscheduled.start_blocker(at("2024-05-01T08:30:00Z")?),
        Some(StartBlocker::SurveyTimeNotSet)
    );
    Ok(())
}

#[test]
fn test_agent_names() -> anyhow::Result<()> {
    let survey = survey("active")?;
    assert_eq!(survey.start_point_agent_name(), "Ana");
    assert_eq!(survey.end_point_agent_name(), "-");
    Ok(())
}
