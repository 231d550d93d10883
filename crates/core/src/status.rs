//! Status enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding lookup table (`event_statuses`, `fight_statuses`,
//! `fight_outcomes`). Rows carry the SMALLINT id; everything above the
//! store works with the closed enum.

use std::fmt;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant in id order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Variant name as stored in the lookup table's `name` column.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl TryFrom<StatusId> for $name {
            type Error = String;

            fn try_from(id: StatusId) -> Result<Self, Self::Error> {
                match id {
                    $( $val => Ok($name::$variant), )+
                    other => Err(format!(
                        "Unknown {} id {other}",
                        stringify!($name)
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

define_status_enum! {
    /// Event lifecycle status.
    EventStatus {
        Draft = 1,
        Active = 2,
        Completed = 3,
    }
}

define_status_enum! {
    /// Fight lifecycle status. Advanced by live control, guarded by the card.
    FightStatus {
        Scheduled = 1,
        Announced = 2,
        InProgress = 3,
        Paused = 4,
        Finished = 5,
        Cancelled = 6,
    }
}

define_status_enum! {
    /// Outcome recorded on a fight result.
    FightOutcome {
        WinnerA = 1,
        WinnerB = 2,
        Draw = 3,
    }
}
