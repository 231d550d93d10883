/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Position of a fight on an event's card. Positive once committed; a
/// negative value marks a fight staged by an unfinished reorder.
pub type OrderNumber = i32;
