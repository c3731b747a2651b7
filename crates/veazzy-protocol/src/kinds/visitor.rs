//! Hiding and showing visitors.

use serde::{Deserialize, Serialize};
use veazzy_core::Address;

use crate::codec::{AttributeSpec, Body, BodyRule, ControlMessage, FieldValue, Fields};

const PARTICIPANT_ATTR: &str = "participantToHide";

/// Hides or shows a visitor to the rest of the room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visitor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    /// [`Self::VISIBLE`] or [`Self::HIDDEN`].
    pub hidden_status: i32,
}

impl Visitor {
    pub const VISIBLE: i32 = 0;
    pub const HIDDEN: i32 = 1;

    pub fn new(hidden_status: i32) -> Self {
        Self {
            hidden_status,
            ..Default::default()
        }
    }

    pub fn hide(participant: impl Into<String>) -> Self {
        Self::new(Self::HIDDEN).with_participant(participant)
    }

    pub fn show(participant: impl Into<String>) -> Self {
        Self::new(Self::VISIBLE).with_participant(participant)
    }

    pub fn with_target(mut self, target: Address) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_actor(mut self, actor: Address) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn with_participant(mut self, participant: impl Into<String>) -> Self {
        self.participant = Some(participant.into());
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden_status == Self::HIDDEN
    }
}

impl ControlMessage for Visitor {
    const NAMESPACE: &'static str = "http://jitsi.org/jitmeet/visitor";
    const ELEMENT: &'static str = "visitor";
    const ATTRIBUTES: &'static [AttributeSpec] = &[AttributeSpec::text(PARTICIPANT_ATTR)];
    const BODY: BodyRule = BodyRule::Status {
        default: Self::VISIBLE,
    };

    fn from_wire(mut fields: Fields, body: Body) -> Self {
        Self {
            target: fields.target(),
            actor: fields.actor(),
            participant: fields.text(PARTICIPANT_ATTR),
            hidden_status: body.status().unwrap_or(Self::VISIBLE),
        }
    }

    fn target(&self) -> Option<&Address> {
        self.target.as_ref()
    }

    fn actor(&self) -> Option<&Address> {
        self.actor.as_ref()
    }

    fn attribute(&self, name: &str) -> Option<FieldValue> {
        match name {
            PARTICIPANT_ATTR => self.participant.clone().map(FieldValue::Text),
            _ => None,
        }
    }

    fn body(&self) -> String {
        self.hidden_status.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stanza::RawElement;

    #[test]
    fn malformed_status_shows_visitor() {
        let element = RawElement::new(Visitor::NAMESPACE, Visitor::ELEMENT)
            .with_attribute(PARTICIPANT_ATTR, "guest-1")
            .with_body("hidden");
        let visitor = Visitor::decode(&element).unwrap().unwrap().message;

        assert_eq!(visitor.hidden_status, Visitor::VISIBLE);
        assert_eq!(visitor.participant.as_deref(), Some("guest-1"));
    }

    #[test]
    fn hide_encodes_participant() {
        let element = Visitor::hide("guest-2").encode();
        assert_eq!(element.attributes.names(), vec![PARTICIPANT_ATTR]);
        assert_eq!(element.body, "1");
    }
}
