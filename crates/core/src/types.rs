/// Record identifiers are assigned by the managed backend; this code never
/// inspects their structure.
pub type RecordId = String;

/// User identifiers come from the identity service, same opacity rule.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
