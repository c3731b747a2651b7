//! Blinding a participant's camera.

use serde::{Deserialize, Serialize};
use veazzy_core::Address;

use crate::codec::{AttributeSpec, Body, BodyRule, ControlMessage, FieldValue, Fields};

const BLOCK_VIDEO_CONTROL_ATTR: &str = "blockvideocontrol";

/// Blinds or unblinds a participant's video, optionally locking the
/// participant's own camera control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blind {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Address>,
    /// `true` to prevent the participant from re-enabling the camera.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_video_control: Option<bool>,
    /// `true` to blind, `false` to unblind; unset is an invalid request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_blind: Option<bool>,
}

impl Blind {
    pub fn new(do_blind: bool) -> Self {
        Self {
            do_blind: Some(do_blind),
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

    pub fn with_block_video_control(mut self, block: bool) -> Self {
        self.block_video_control = Some(block);
        self
    }
}

impl ControlMessage for Blind {
    const NAMESPACE: &'static str = "http://jitsi.org/jitmeet/video";
    const ELEMENT: &'static str = "blind";
    const ATTRIBUTES: &'static [AttributeSpec] = &[AttributeSpec::flag(BLOCK_VIDEO_CONTROL_ATTR)];
    const BODY: BodyRule = BodyRule::Flag;

    fn from_wire(mut fields: Fields, body: Body) -> Self {
        Self {
            target: fields.target(),
            actor: fields.actor(),
            block_video_control: fields.flag(BLOCK_VIDEO_CONTROL_ATTR),
            do_blind: body.flag(),
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
            BLOCK_VIDEO_CONTROL_ATTR => self.block_video_control.map(FieldValue::Flag),
            _ => None,
        }
    }

    fn body(&self) -> String {
        self.do_blind.map(|b| b.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stanza::RawElement;

    fn blind_element() -> RawElement {
        RawElement::new(Blind::NAMESPACE, Blind::ELEMENT)
    }

    #[test]
    fn block_flag_is_lenient() {
        let upper = blind_element().with_attribute(BLOCK_VIDEO_CONTROL_ATTR, "TRUE").with_body("true");
        let decoded = Blind::decode(&upper).unwrap().unwrap();
        assert_eq!(decoded.message.block_video_control, Some(true));

        let maybe = blind_element().with_attribute(BLOCK_VIDEO_CONTROL_ATTR, "maybe").with_body("true");
        let decoded = Blind::decode(&maybe).unwrap().unwrap();
        assert_eq!(decoded.message.block_video_control, Some(false));

        let absent = blind_element().with_body("true");
        let decoded = Blind::decode(&absent).unwrap().unwrap();
        assert_eq!(decoded.message.block_video_control, None);
        assert_eq!(decoded.message.do_blind, Some(true));
    }

    #[test]
    fn unset_flag_is_omitted() {
        let element = Blind::new(false).encode();
        assert!(!element.attributes.contains(BLOCK_VIDEO_CONTROL_ATTR));
        assert_eq!(element.body, "false");
    }

    #[test]
    fn unset_action_encodes_empty_body() {
        let element = Blind::default().with_block_video_control(true).encode();
        assert_eq!(element.attributes.get(BLOCK_VIDEO_CONTROL_ATTR), Some("true"));
        assert_eq!(element.body, "");

        let decoded = Blind::decode(&element.to_raw()).unwrap().unwrap();
        assert_eq!(decoded.message.do_blind, None);
    }
}
