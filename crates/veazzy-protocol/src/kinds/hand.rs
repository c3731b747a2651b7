//! Raise / lower hand.

use serde::{Deserialize, Serialize};
use veazzy_core::Address;

use crate::codec::{AttributeSpec, Body, BodyRule, ControlMessage, FieldValue, Fields};

const PARTICIPANT_ATTR: &str = "participantToRaiseHand";

/// Raises or lowers a participant's hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaiseHand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Address>,
    /// Participant identifier whose hand changes, when not the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    /// [`Self::HAND_DOWN`] or [`Self::HAND_RAISED`].
    pub status: i32,
}

impl RaiseHand {
    pub const HAND_DOWN: i32 = 0;
    pub const HAND_RAISED: i32 = 1;

    pub fn new(status: i32) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn raised() -> Self {
        Self::new(Self::HAND_RAISED)
    }

    pub fn lowered() -> Self {
        Self::new(Self::HAND_DOWN)
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

    pub fn is_raised(&self) -> bool {
        self.status == Self::HAND_RAISED
    }
}

impl ControlMessage for RaiseHand {
    const NAMESPACE: &'static str = "http://jitsi.org/jitmeet/raisehand";
    const ELEMENT: &'static str = "raiseHand";
    const ATTRIBUTES: &'static [AttributeSpec] = &[AttributeSpec::text(PARTICIPANT_ATTR)];
    const BODY: BodyRule = BodyRule::Status {
        default: Self::HAND_DOWN,
    };

    fn from_wire(mut fields: Fields, body: Body) -> Self {
        Self {
            target: fields.target(),
            actor: fields.actor(),
            participant: fields.text(PARTICIPANT_ATTR),
            status: body.status().unwrap_or(Self::HAND_DOWN),
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
        self.status.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stanza::RawElement;

    #[test]
    fn garbage_status_lowers_hand() {
        let element = RawElement::new(RaiseHand::NAMESPACE, RaiseHand::ELEMENT).with_body("up");
        let decoded = RaiseHand::decode(&element).unwrap().unwrap();
        assert_eq!(decoded.message.status, RaiseHand::HAND_DOWN);
        assert!(!decoded.is_clean());
    }

    #[test]
    fn participant_attribute_round_trips() {
        let hand = RaiseHand::raised().with_participant("endpoint-7");
        let element = hand.encode();
        assert_eq!(element.attributes.get(PARTICIPANT_ATTR), Some("endpoint-7"));

        let decoded = RaiseHand::decode(&element.to_raw()).unwrap().unwrap();
        assert_eq!(decoded.message, hand);
        assert!(decoded.message.is_raised());
    }
}
