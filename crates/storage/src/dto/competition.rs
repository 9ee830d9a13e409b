use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::dto::leaderboard::LeaderboardEntry;
use crate::models::{Competition, CompetitionStatus, ParticipantStatus};

/// Request payload for creating a new competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompetitionRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub start_date: NaiveDate,

    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub status: CompetitionStatus,
}

/// Request payload for updating an existing competition.
///
/// `end_date: null` clears the end date; omitting the field leaves it unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompetitionRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<Option<NaiveDate>>,

    pub status: Option<CompetitionStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListCompetitionsQuery {
    /// Admins only: list every competition instead of the caller's own.
    #[serde(default)]
    pub all: bool,
}

/// Participant row joined with the user's display fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantDetail {
    pub participant_id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub status: ParticipantStatus,
    pub joined_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionDetailResponse {
    pub competition: Competition,
    pub participants: Vec<ParticipantDetail>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub is_participant: bool,
}

// A field that is present (even as `null`) deserializes to `Some(..)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn check_window(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), &'static str> {
    if let Some(end) = end
        && end <= start
    {
        return Err("End date must be after start date");
    }
    Ok(())
}

fn check_name(name: &str) -> Result<&str, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name must not be blank");
    }
    Ok(name)
}

impl CreateCompetitionRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        check_window(self.start_date, self.end_date)
    }

    /// The name without surrounding whitespace, rejected when nothing is left.
    pub fn trimmed_name(&self) -> Result<&str, &'static str> {
        check_name(&self.name)
    }
}

impl UpdateCompetitionRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
    }

    /// Applies the present fields to `competition`, rejecting an inverted window.
    pub fn apply_to(&self, competition: &mut Competition) -> Result<(), &'static str> {
        let start_date = self.start_date.unwrap_or(competition.start_date);
        let end_date = self.end_date.unwrap_or(competition.end_date);
        check_window(start_date, end_date)?;
        let name = self.name.as_deref().map(check_name).transpose()?;

        if let Some(name) = name {
            competition.name = name.to_string();
        }
        if let Some(description) = &self.description {
            competition.description = description.clone();
        }
        if let Some(status) = self.status {
            competition.status = status;
        }
        competition.start_date = start_date;
        competition.end_date = end_date;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn competition() -> Competition {
        Competition {
            competition_id: Uuid::new_v4(),
            name: "Spring Cut".to_string(),
            description: Some("Eight weeks".to_string()),
            start_date: date(2025, 3, 1),
            end_date: Some(date(2025, 4, 30)),
            status: CompetitionStatus::Active,
            created_by: Uuid::new_v4(),
            created_at: date(2025, 2, 1).and_hms_opt(0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_validate_dates_rejects_end_not_after_start() {
        let request = CreateCompetitionRequest {
            name: "Same day".to_string(),
            description: None,
            start_date: date(2025, 1, 1),
            end_date: Some(date(2025, 1, 1)),
            status: CompetitionStatus::Active,
        };
        assert!(request.validate_dates().is_err());
    }

    #[test]
    fn test_validate_dates_accepts_open_ended() {
        let request = CreateCompetitionRequest {
            name: "Open".to_string(),
            description: None,
            start_date: date(2025, 1, 1),
            end_date: None,
            status: CompetitionStatus::Draft,
        };
        assert!(request.validate_dates().is_ok());
    }

    #[test]
    fn test_update_null_end_date_clears_it() {
        let request = serde_json_from(r#"{"end_date": null}"#);
        assert_eq!(request.end_date, Some(None));

        let mut comp = competition();
        request.apply_to(&mut comp).unwrap();
        assert_eq!(comp.end_date, None);
    }

    #[test]
    fn test_update_missing_end_date_keeps_it() {
        let request = serde_json_from(r#"{"name": "Renamed"}"#);
        assert_eq!(request.end_date, None);

        let mut comp = competition();
        request.apply_to(&mut comp).unwrap();
        assert_eq!(comp.name, "Renamed");
        assert_eq!(comp.end_date, Some(date(2025, 4, 30)));
    }

    #[test]
    fn test_update_rejects_inverted_window() {
        let request = UpdateCompetitionRequest {
            start_date: Some(date(2025, 5, 1)),
            ..Default::default()
        };
        let mut comp = competition();
        assert!(request.apply_to(&mut comp).is_err());
        assert_eq!(comp.start_date, date(2025, 3, 1));
    }

    #[test]
    fn test_blank_names_rejected() {
        let request = serde_json_from(r#"{"name": "   "}"#);
        let mut comp = competition();
        assert!(request.apply_to(&mut comp).is_err());
        assert_eq!(comp.name, "Spring Cut");

        let request = serde_json_from(r#"{"name": "  Summer Cut "}"#);
        request.apply_to(&mut comp).unwrap();
        assert_eq!(comp.name, "Summer Cut");

        let create = CreateCompetitionRequest {
            name: " \t ".to_string(),
            description: None,
            start_date: date(2025, 1, 1),
            end_date: None,
            status: CompetitionStatus::Active,
        };
        assert!(create.trimmed_name().is_err());
    }

    #[test]
    fn test_empty_update_detected() {
        assert!(UpdateCompetitionRequest::default().is_empty());
    }

    fn serde_json_from(raw: &str) -> UpdateCompetitionRequest {
        serde_json::from_str(raw).unwrap()
    }
}
