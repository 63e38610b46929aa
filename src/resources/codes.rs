//! Integer-coded enumerations used by the Kaiten API.

use std::fmt;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};

/// An integer that names no variant of the target enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code {code}")]
pub struct UnknownCode {
    /// The enum being decoded.
    pub kind: &'static str,
    /// The offending code.
    pub code: i64,
}

macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        ///
        /// Responses carrying a code outside the modelled set decode to
        /// `Unknown`; [`TryFrom<i64>`] and [`FromStr`](std::str::FromStr)
        /// reject such codes and labels.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A code the API returned that this version does not model.
            Unknown(i64),
        }

        impl $name {
            /// Every modelled variant, in code order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The integer the API uses for this value.
            pub fn code(self) -> i64 {
                match self {
                    $( $name::$variant => $code, )+
                    $name::Unknown(code) => code,
                }
            }

            /// Maps any code, falling back to `Unknown`.
            pub fn from_code(code: i64) -> Self {
                Self::try_from(code).unwrap_or($name::Unknown(code))
            }

            /// Whether this is one of the modelled variants.
            pub fn is_known(self) -> bool {
                !matches!(self, $name::Unknown(_))
            }

            /// The lower-case name used on the command line.
            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                    $name::Unknown(_) => "unknown",
                }
            }
        }

        impl TryFrom<i64> for $name {
            type Error = UnknownCode;

            fn try_from(code: i64) -> Result<Self, UnknownCode> {
                match code {
                    $( $code => Ok($name::$variant), )+
                    _ => Err(UnknownCode { kind: stringify!($name), code }),
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, UnknownLabel> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    _ => Err(UnknownLabel { kind: stringify!($name), label: s.to_string() }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $name::Unknown(code) => write!(f, "unknown ({code})"),
                    known => f.write_str(known.label()),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i64(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                i64::deserialize(deserializer).map(Self::from_code)
            }
        }
    };
}

/// A string that names no variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{label}`")]
pub struct UnknownLabel {
    /// The enum being parsed.
    pub kind: &'static str,
    /// The offending input.
    pub label: String,
}

int_enum! {
    /// Whether a card is on its board or archived.
    pub enum CardCondition {
        /// On the board.
        OnBoard = 1 => "on-board",
        /// Archived.
        Archived = 2 => "archived",
    }
}

int_enum! {
    /// Lifecycle of a lane.
    pub enum LaneCondition {
        /// Active.
        Live = 1 => "live",
        /// Archived.
        Archived = 2 => "archived",
        /// Deleted.
        Deleted = 3 => "deleted",
    }
}

int_enum! {
    /// Workflow state of a card, derived from its column.
    pub enum CardState {
        /// Not started.
        Queued = 1 => "queued",
        /// In progress.
        InProgress = 2 => "in-progress",
        /// Done.
        Done = 3 => "done",
    }
}

int_enum! {
    /// The role a member plays on a card.
    pub enum CardMemberRoleType {
        /// Plain member.
        Member = 1 => "member",
        /// Responsible for the card.
        Responsible = 2 => "responsible",
    }
}

int_enum! {
    /// Markup of a card description.
    pub enum TextFormatType {
        /// Markdown.
        Markdown = 1 => "markdown",
        /// HTML.
        Html = 2 => "html",
        /// Jira wiki markup.
        JiraWiki = 3 => "jira-wiki",
    }
}

int_enum! {
    /// Where a new card lands within its cell.
    pub enum CardPosition {
        /// Top of the cell.
        First = 1 => "first",
        /// Bottom of the cell.
        Last = 2 => "last",
    }
}

int_enum! {
    /// Kind of board column.
    pub enum ColumnType {
        /// Backlog column.
        Queue = 1 => "queue",
        /// Work in progress.
        InProgress = 2 => "in-progress",
        /// Finished work.
        Done = 3 => "done",
    }
}

int_enum! {
    /// What a WIP limit counts.
    pub enum WipLimitType {
        /// Number of cards.
        CardCount = 1 => "card-count",
        /// Sum of card sizes.
        CardSize = 2 => "card-size",
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(CardCondition::OnBoard.code(), 1)]
    #[test_case(CardCondition::Archived.code(), 2)]
    #[test_case(LaneCondition::Deleted.code(), 3)]
    #[test_case(CardState::InProgress.code(), 2)]
    #[test_case(TextFormatType::JiraWiki.code(), 3)]
    #[test_case(WipLimitType::CardSize.code(), 2)]
    fn test_codes(actual: i64, expected: i64) {
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_serialises_as_code() {
        assert_eq!(serde_json::to_value(CardState::Done).unwrap(), serde_json::json!(3));
        assert_eq!(serde_json::to_value(ColumnType::Queue).unwrap(), serde_json::json!(1));
    }

    #[test]
    fn test_every_code_round_trips() {
        for state in CardState::ALL {
            assert_eq!(CardState::try_from(state.code()).unwrap(), *state);
            assert_eq!(state.label().parse::<CardState>().unwrap(), *state);
        }
        for role in CardMemberRoleType::ALL {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(serde_json::from_str::<CardMemberRoleType>(&json).unwrap(), *role);
        }
    }

    #[test]
    fn test_unknown_code_is_rejected_by_try_from() {
        assert_eq!(
            ColumnType::try_from(9).unwrap_err(),
            UnknownCode { kind: "ColumnType", code: 9 }
        );
    }

    #[test]
    fn test_unknown_code_decodes_to_unknown() {
        let position: CardPosition = serde_json::from_str("7").unwrap();
        assert_eq!(position, CardPosition::Unknown(7));
        assert!(!position.is_known());
        assert_eq!(position.code(), 7);
        assert_eq!(position.to_string(), "unknown (7)");
        assert_eq!(serde_json::to_value(position).unwrap(), serde_json::json!(7));
    }

    #[test]
    fn test_from_code_prefers_known_variant() {
        assert_eq!(LaneCondition::from_code(3), LaneCondition::Deleted);
        assert!(LaneCondition::from_code(3).is_known());
        assert!(!LaneCondition::ALL.contains(&LaneCondition::Unknown(3)));
    }

    #[test]
    fn test_non_integer_is_rejected() {
        assert!(serde_json::from_str::<CardState>("\"done\"").is_err());
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = "sideways".parse::<CardPosition>().unwrap_err();
        assert_eq!(err.to_string(), "unknown CardPosition `sideways`");
    }
}
