//! Room-level elections and status.

use serde::{Deserialize, Serialize};
use veazzy_core::Address;

use crate::codec::{AttributeSpec, Body, BodyRule, ControlMessage, FieldValue, Fields};

/// Body token asking a peer for the currently elected participant.
pub const QUERY_TOKEN: &str = "get";

/// Body token asking a peer for the room status.
pub const STATUS_CHECK_TOKEN: &str = "check";

// An id always wins over the query flag.
fn sentinel_body(id: &Option<String>, query: bool) -> String {
    match id {
        Some(id) => id.clone(),
        None if query => QUERY_TOKEN.to_string(),
        None => String::new(),
    }
}

/// Announces, or asks for, the room's manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomManager {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Address>,
    /// Encoded as the body whenever set, even with `is_query_request`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    /// Set when the body was the [`QUERY_TOKEN`]; `manager_id` is then unset.
    ///
    /// Only written as the token while `manager_id` is `None`; a value with
    /// both set encodes, and decodes back, as an announcement.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_query_request: bool,
}

impl RoomManager {
    /// Announces `manager_id` as the room manager.
    pub fn announce(manager_id: impl Into<String>) -> Self {
        Self {
            manager_id: Some(manager_id.into()),
            ..Default::default()
        }
    }

    /// Asks who the room manager is.
    pub fn query() -> Self {
        Self {
            is_query_request: true,
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: Address) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_actor(mut self, actor: Address) -> Self {
        self.actor = Some(actor);
        self
    }
}

impl ControlMessage for RoomManager {
    const NAMESPACE: &'static str = "http://jitsi.org/jitmeet/roommanager";
    const ELEMENT: &'static str = "roomManager";
    const ATTRIBUTES: &'static [AttributeSpec] = &[];
    const BODY: BodyRule = BodyRule::Sentinel { token: QUERY_TOKEN };

    fn from_wire(mut fields: Fields, body: Body) -> Self {
        let is_query_request = body.is_query();
        Self {
            target: fields.target(),
            actor: fields.actor(),
            manager_id: body.into_text(),
            is_query_request,
        }
    }

    fn target(&self) -> Option<&Address> {
        self.target.as_ref()
    }

    fn actor(&self) -> Option<&Address> {
        self.actor.as_ref()
    }

    fn attribute(&self, _name: &str) -> Option<FieldValue> {
        None
    }

    fn body(&self) -> String {
        sentinel_body(&self.manager_id, self.is_query_request)
    }
}

/// Announces, or asks for, the room's focal participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomFocalParticipant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Address>,
    /// Encoded as the body whenever set, even with `is_query_request`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    /// Set when the body was the [`QUERY_TOKEN`]; `participant_id` is then unset.
    ///
    /// Only written as the token while `participant_id` is `None`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_query_request: bool,
}

impl RoomFocalParticipant {
    pub fn announce(participant_id: impl Into<String>) -> Self {
        Self {
            participant_id: Some(participant_id.into()),
            ..Default::default()
        }
    }

    pub fn query() -> Self {
        Self {
            is_query_request: true,
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: Address) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_actor(mut self, actor: Address) -> Self {
        self.actor = Some(actor);
        self
    }
}

impl ControlMessage for RoomFocalParticipant {
    const NAMESPACE: &'static str = "http://jitsi.org/jitmeet/roomfocalparticipant";
    const ELEMENT: &'static str = "roomFocalParticipant";
    const ATTRIBUTES: &'static [AttributeSpec] = &[];
    const BODY: BodyRule = BodyRule::Sentinel { token: QUERY_TOKEN };

    fn from_wire(mut fields: Fields, body: Body) -> Self {
        let is_query_request = body.is_query();
        Self {
            target: fields.target(),
            actor: fields.actor(),
            participant_id: body.into_text(),
            is_query_request,
        }
    }

    fn target(&self) -> Option<&Address> {
        self.target.as_ref()
    }

    fn actor(&self) -> Option<&Address> {
        self.actor.as_ref()
    }

    fn attribute(&self, _name: &str) -> Option<FieldValue> {
        None
    }

    fn body(&self) -> String {
        sentinel_body(&self.participant_id, self.is_query_request)
    }
}

/// Announces whether the room is open or closed.
///
/// A body of [`STATUS_CHECK_TOKEN`] is accepted without a diagnostic but
/// decodes as the default status; `check_request` is never set by the
/// decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Address>,
    /// [`Self::CLOSED`] or [`Self::OPENED`].
    pub status: i32,
    /// Local-only marker for status checks; not carried on the wire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_request: Option<bool>,
}

impl Default for RoomStatus {
    fn default() -> Self {
        Self {
            target: None,
            actor: None,
            status: Self::OPENED,
            check_request: None,
        }
    }
}

impl RoomStatus {
    pub const CLOSED: i32 = 0;
    pub const OPENED: i32 = 1;

    pub fn new(status: i32) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn opened() -> Self {
        Self::new(Self::OPENED)
    }

    pub fn closed() -> Self {
        Self::new(Self::CLOSED)
    }

    pub fn with_target(mut self, target: Address) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_actor(mut self, actor: Address) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn is_open(&self) -> bool {
        self.status == Self::OPENED
    }
}

impl ControlMessage for RoomStatus {
    const NAMESPACE: &'static str = "http://jitsi.org/jitmeet/roomstatus";
    const ELEMENT: &'static str = "roomStatus";
    const ATTRIBUTES: &'static [AttributeSpec] = &[];
    const BODY: BodyRule = BodyRule::StatusWithToken {
        default: Self::OPENED,
        token: STATUS_CHECK_TOKEN,
    };

    fn from_wire(mut fields: Fields, body: Body) -> Self {
        Self {
            target: fields.target(),
            actor: fields.actor(),
            status: body.status().unwrap_or(Self::OPENED),
            check_request: None,
        }
    }

    fn target(&self) -> Option<&Address> {
        self.target.as_ref()
    }

    fn actor(&self) -> Option<&Address> {
        self.actor.as_ref()
    }

    fn attribute(&self, _name: &str) -> Option<FieldValue> {
        None
    }

    fn body(&self) -> String {
        self.status.to_string()
    }
}
