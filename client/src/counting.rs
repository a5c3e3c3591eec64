use chrono::{DateTime, Duration, Utc};
use shared::{CountingPost, SubmitCountingRequest, Survey, VehicleCounts, VehicleKind};
use tracing::{info, warn};

use crate::api::surveys_api;
use crate::error::{Error, Result};
use crate::pipeline::ApiClient;
use crate::storage::{KeyValueStorage, CURRENT_SURVEY_KEY};

/// Submission opens this long before the scheduled end.
pub const SUBMIT_LEAD_SECONDS: i64 = 120;

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Tally kept by an agent while counting one survey.
#[derive(Debug, Clone, PartialEq)]
pub struct CountingSession {
    survey: Survey,
    counts: VehicleCounts,
}

impl CountingSession {
    pub fn new(survey: Survey) -> Self {
        CountingSession {
            survey,
            counts: VehicleCounts::default(),
        }
    }

    /// Resumes with tallies taken elsewhere, e.g. from the command line.
    pub fn with_counts(mut self, counts: VehicleCounts) -> Self {
        self.counts = counts;
        self
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn counts(&self) -> VehicleCounts {
        self.counts
    }

    pub fn increment(&mut self, kind: VehicleKind) {
        self.counts.adjust(kind, 1);
    }

    pub fn decrement(&mut self, kind: VehicleKind) {
        self.counts.adjust(kind, -1);
    }

    /// `None` when the survey has no scheduled end, which keeps submit
    /// closed for good.
    pub fn submit_available_at(&self) -> Option<DateTime<Utc>> {
        self.survey
            .scheduled_end_time
            .map(|end| end - Duration::seconds(SUBMIT_LEAD_SECONDS))
    }

    pub fn seconds_until_submit(&self, now: DateTime<Utc>) -> Option<i64> {
        self.submit_available_at()
            .map(|at| (at - now).num_seconds().max(0))
    }

    pub fn can_submit(&self, now: DateTime<Utc>) -> bool {
        self.submit_available_at().is_some_and(|at| now >= at)
    }

    pub fn request(&self, counting_post: CountingPost) -> SubmitCountingRequest {
        SubmitCountingRequest {
            survey_id: self.survey.id.clone(),
            counts: self.counts,
            counting_post,
        }
    }
}

/// `m:ss`, negative input renders as `0:00`.
pub fn format_countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Hands `survey` over to the counting page.
pub fn stash_survey(storage: &dyn KeyValueStorage, survey: &Survey) -> Result<()> {
    storage.set(CURRENT_SURVEY_KEY, &serde_json::to_string(survey)?)
}

pub fn load_survey(storage: &dyn KeyValueStorage) -> Option<Survey> {
    let raw = storage.get(CURRENT_SURVEY_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(survey) => Some(survey),
        Err(error) => {
            warn!(%error, "Discarding unreadable current survey");
            storage.remove(CURRENT_SURVEY_KEY);
            None
        }
    }
}

pub fn clear_survey(storage: &dyn KeyValueStorage) {
    storage.remove(CURRENT_SURVEY_KEY);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    /// The session was ended and the user sent to the login page.
    SessionExpired,
    PermissionDenied,
    Failed,
}

impl SubmitOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SubmitOutcome::Submitted => Some("Survey submitted successfully"),
            SubmitOutcome::SessionExpired => None,
            SubmitOutcome::PermissionDenied => {
                Some("You do not have permission to submit counting data for this survey.")
            }
            SubmitOutcome::Failed => Some("Failed to submit survey"),
        }
    }
}

/// Submits the tally for the signed-in agent's counting post. On success
/// the stashed survey is dropped.
pub async fn submit(
    client: &ApiClient,
    session: &CountingSession,
    storage: &dyn KeyValueStorage,
) -> SubmitOutcome {
    let counting_post = client
        .store()
        .user()
        .and_then(|user| user.counting_post)
        .unwrap_or_default();
    let request = session.request(counting_post);
    match surveys_api::submit_counting(client, &request).await {
        Ok(_) => {
            info!(survey_id = %request.survey_id, total = request.counts.total(), "Counts submitted");
            clear_survey(storage);
            SubmitOutcome::Submitted
        }
        Err(Error::SessionTerminated) => SubmitOutcome::SessionExpired,
        Err(error) => {
            warn!(%error, survey_id = %request.survey_id, "Counting submission failed");
            classify_failure(client, &error.message())
        }
    }
}

fn classify_failure(client: &ApiClient, message: &str) -> SubmitOutcome {
    if message.contains("Invalid login token") || message.contains("Access denied") {
        client.force_logout(Some(SESSION_EXPIRED_MESSAGE));
        SubmitOutcome::SessionExpired
    } else if message.to_lowercase().contains("permission") {
        SubmitOutcome::PermissionDenied
    } else {
        SubmitOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_format() {
        assert_eq!(format_countdown(0), "0:00");
        assert_eq!(format_countdown(65), "1:05");
        assert_eq!(format_countdown(600), "10:00");
        assert_eq!(format_countdown(-4), "0:00");
    }
}
