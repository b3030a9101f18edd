pub type UserId = i64;
pub type EventId = i64;
pub type CityId = i64;
pub type PlaceId = i64;
pub type ReportId = i64;
pub type InvitationId = i64;
pub type TicketId = i64;

/// categories are addressed by their key and not a numeric id
pub type CategoryKey = String;
