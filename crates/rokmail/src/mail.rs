use alloc::{
    borrow::Cow,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::value::{Map, Value, write_object};

macro_rules! email_types {
    ($($(#[$doc:meta])* $variant:ident),+ $(,)?) => {
        /// The kind of mail, classified from its `type` field.
        ///
        /// Unrecognized type strings are kept verbatim in
        /// [`Unknown`](EmailType::Unknown).
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum EmailType {
            $($(#[$doc])* $variant,)+
            /// A type string outside the known set.
            Unknown(String),
        }

        impl EmailType {
            /// The type string as it appears on the wire.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                    Self::Unknown(s) => s,
                }
            }
        }

        impl From<&str> for EmailType {
            fn from(s: &str) -> Self {
                match s {
                    $(stringify!($variant) => Self::$variant,)+
                    other => Self::Unknown(other.to_string()),
                }
            }
        }
    };
}

email_types! {
    /// Alliance notice.
    Alliance,
    /// Application to join an alliance.
    AllianceApply,
    /// Alliance building notice.
    AllianceBuilding,
    /// Arena rank reward.
    ArenaRankRewardReport,
    /// Battle report.
    Battle,
    /// Resource caravan sent.
    CarriageSentReport,
    /// Duel battle report.
    DuelBattle2,
    /// Event notice.
    Event,
    /// Event alliance ranking.
    EventAsRank,
    /// Event loot report for an alliance member.
    EventMemberLootReport,
    /// Event player ranking.
    EventPlyRank,
    /// Message from the game operators.
    Gm,
    /// Report for a defeated event boss.
    KillBigDreamReport,
    /// Localized message.
    Mlang,
    /// Player-to-player mail.
    Player,
    /// Resource gathering report.
    Rss,
    /// Scout report.
    ScoutReport,
    /// System notice.
    System,
    /// Team draw result.
    TeamGachaResult,
    /// Temple notice.
    Temple,
}

impl fmt::Display for EmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded payload: its sections in buffer order.
///
/// The metadata helpers look at the first section that carries a field; they
/// do not check that the rest of the mail agrees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mail {
    /// Non-empty sections in the order they were found.
    pub sections: Vec<Map>,
}

impl Mail {
    /// Wraps decoded sections.
    #[must_use]
    pub fn new(sections: Vec<Map>) -> Self {
        Self { sections }
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` when nothing was decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates over the sections.
    pub fn iter(&self) -> core::slice::Iter<'_, Map> {
        self.sections.iter()
    }

    /// First field named `key` across sections.
    fn find<'s, T>(&'s self, key: &str, f: impl Fn(&'s Value) -> Option<T>) -> Option<T> {
        self.sections
            .iter()
            .filter_map(|section| section.get(key))
            .find_map(f)
    }

    /// The mail type, from the first string `type` field.
    #[must_use]
    pub fn mail_type(&self) -> Option<&str> {
        self.find("type", Value::as_str)
    }

    /// [`mail_type`](Self::mail_type) classified into an [`EmailType`].
    #[must_use]
    pub fn email_type(&self) -> Option<EmailType> {
        self.mail_type().map(EmailType::from)
    }

    /// The send time, from the first integral `time` field.
    #[must_use]
    pub fn time(&self) -> Option<i64> {
        self.find("time", Value::as_i64)
    }

    /// The mail id, from the first `id` field that is a string or a number.
    #[must_use]
    pub fn id(&self) -> Option<Cow<'_, str>> {
        self.find("id", |v| match v {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            _ => None,
        })
    }
}

impl IntoIterator for Mail {
    type Item = Map;
    type IntoIter = alloc::vec::IntoIter<Map>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mail {
    type Item = &'a Map;
    type IntoIter = core::slice::Iter<'a, Map>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// Renders `{"sections":[...]}` as compact JSON.
impl fmt::Display for Mail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{\"sections\":[")?;
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write_object(section, f)?;
        }
        f.write_str("]}")
    }
}
