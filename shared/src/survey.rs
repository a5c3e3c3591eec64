use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::user::CountingPost;
use crate::{push_query, ApiEnvelope, PaginatedResponse};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    Active,
    #[default]
    Inactive,
    Archived,
    Terminated,
}

/// Agent assignment, the backend sends either a name or a populated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentRef {
    Name(String),
    User {
        #[serde(default, alias = "_id")]
        id: Option<String>,
        full_name: String,
    },
}

impl AgentRef {
    pub fn display_name(agent: Option<&AgentRef>) -> &str {
        match agent {
            Some(AgentRef::Name(name)) if !name.is_empty() => name,
            Some(AgentRef::User { full_name, .. }) if !full_name.is_empty() => full_name,
            _ => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VehicleKind {
    Motorcycle,
    Car,
    Truck,
    Bus,
    Pedestrian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VehicleCounts {
    #[serde(default)]
    pub motorcycle: u32,
    #[serde(default)]
    pub car: u32,
    #[serde(default)]
    pub truck: u32,
    #[serde(default)]
    pub bus: u32,
    #[serde(default)]
    pub pedestrian: u32,
}

impl VehicleCounts {
    pub fn get(&self, kind: VehicleKind) -> u32 {
        match kind {
            VehicleKind::Motorcycle => self.motorcycle,
            VehicleKind::Car => self.car,
            VehicleKind::Truck => self.truck,
            VehicleKind::Bus => self.bus,
            VehicleKind::Pedestrian => self.pedestrian,
        }
    }

    fn slot(&mut self, kind: VehicleKind) -> &mut u32 {
        match kind {
            VehicleKind::Motorcycle => &mut self.motorcycle,
            VehicleKind::Car => &mut self.car,
            VehicleKind::Truck => &mut self.truck,
            VehicleKind::Bus => &mut self.bus,
            VehicleKind::Pedestrian => &mut self.pedestrian,
        }
    }

    /// Adds `delta` to one tally, clamping at zero.
    pub fn adjust(&mut self, kind: VehicleKind, delta: i32) {
        let slot = self.slot(kind);
        *slot = slot.saturating_add_signed(delta);
    }

    pub fn total(&self) -> u32 {
        self.motorcycle + self.car + self.truck + self.bus + self.pedestrian
    }
}

/// Why an agent cannot start a survey right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum StartBlocker {
    SurveyTimeNotSet,
    WaitingForStartTime,
    SurveyTimeExpired,
    SurveyArchived,
    SurveyTerminated,
    CannotStart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start_point: String,
    #[serde(default)]
    pub end_point: String,
    #[serde(default)]
    pub scheduled_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: SurveyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_status: Option<SurveyStatus>,
    #[serde(default)]
    pub counts: VehicleCounts,
    #[serde(default)]
    pub start_point_agent: Option<AgentRef>,
    #[serde(default)]
    pub end_point_agent: Option<AgentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<AgentRef>,
}

impl Survey {
    fn window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.scheduled_start_time.zip(self.scheduled_end_time)
    }

    /// Status computed from the stored one and the scheduled window.
    pub fn derive_effective_status(&self, now: DateTime<Utc>) -> SurveyStatus {
        match self.status {
            SurveyStatus::Archived | SurveyStatus::Terminated => self.status,
            _ => match self.window() {
                Some((start, end)) if now >= start && now <= end => SurveyStatus::Active,
                _ => self.status,
            },
        }
    }

    /// Server-provided effective status, or the locally derived one.
    pub fn display_status(&self, now: DateTime<Utc>) -> SurveyStatus {
        self.effective_status
            .unwrap_or_else(|| self.derive_effective_status(now))
    }

    pub fn start_blocker(&self, now: DateTime<Utc>) -> Option<StartBlocker> {
        let status = self.display_status(now);
        let Some((start, end)) = self.window() else {
            return Some(StartBlocker::SurveyTimeNotSet);
        };
        let in_window = now >= start && now <= end;
        let startable = match status {
            SurveyStatus::Active => true,
            SurveyStatus::Inactive => in_window,
            SurveyStatus::Archived | SurveyStatus::Terminated => false,
        };
        if startable {
            return None;
        }
        let blocker = if now < start {
            StartBlocker::WaitingForStartTime
        } else if now > end {
            StartBlocker::SurveyTimeExpired
        } else if status == SurveyStatus::Archived {
            StartBlocker::SurveyArchived
        } else if status == SurveyStatus::Terminated {
            StartBlocker::SurveyTerminated
        } else {
            StartBlocker::CannotStart
        };
        Some(blocker)
    }

    pub fn can_start(&self, now: DateTime<Utc>) -> bool {
        self.start_blocker(now).is_none()
    }

    pub fn start_point_agent_name(&self) -> &str {
        AgentRef::display_name(self.start_point_agent.as_ref())
    }

    pub fn end_point_agent_name(&self) -> &str {
        AgentRef::display_name(self.end_point_agent.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SurveyFilter {
    pub status: Option<SurveyStatus>,
}

impl SurveyFilter {
    pub fn applied_count(&self) -> usize {
        usize::from(self.status.is_some())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurveyListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub filter: SurveyFilter,
}

impl SurveyListQuery {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        push_query(&mut pairs, "search", self.search.clone());
        push_query(&mut pairs, "status", self.filter.status.map(|s| s.to_string()));
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurveyRequest {
    pub name: String,
    pub start_point: String,
    pub end_point: String,
    pub scheduled_start_time: DateTime<Utc>,
    pub scheduled_end_time: DateTime<Utc>,
    pub start_point_agent: String,
    pub end_point_agent: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSurveyRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_point_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_point_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SurveyStatus>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyStats {
    pub total_surveys: u64,
    pub active_surveys: u64,
    pub inactive_surveys: u64,
    pub archived_surveys: u64,
    pub total_motorcycles: u64,
    pub total_cars: u64,
    pub total_vehicles: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCountingRequest {
    pub survey_id: String,
    pub counts: VehicleCounts,
    pub counting_post: CountingPost,
}

pub type SurveyResponse = ApiEnvelope<Survey>;
pub type PaginatedSurveysResponse = PaginatedResponse<Survey>;
pub type SurveyStatsResponse = ApiEnvelope<SurveyStats>;

impl StartBlocker {
    pub fn description(&self) -> &'static str {
        match self {
            StartBlocker::SurveyTimeNotSet => "The survey schedule is not set",
            StartBlocker::WaitingForStartTime => "Waiting for the scheduled start time",
            StartBlocker::SurveyTimeExpired => "The scheduled survey time has expired",
            StartBlocker::SurveyArchived => "The survey is archived",
            StartBlocker::SurveyTerminated => "The survey is terminated",
            StartBlocker::CannotStart => "The survey cannot be started",
        }
    }
}
