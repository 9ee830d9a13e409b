mod allowlist_entry;
mod band;
mod competition;
mod competition_participant;
mod date_range;
mod normalized_email;
mod user;
mod weight_entry;

pub use allowlist_entry::AllowlistEntry;
pub use band::Band;
pub use competition::{Competition, CompetitionStatus, NewCompetition};
pub use competition_participant::{CompetitionParticipant, ParticipantStatus};
pub use date_range::DateRange;
pub use normalized_email::NormalizedEmail;
pub use user::{NewUser, User};
pub use weight_entry::{NewWeightEntry, WeightEntry};
