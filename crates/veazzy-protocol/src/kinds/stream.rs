//! Advertising stream start/stop.

use serde::{Deserialize, Serialize};
use veazzy_core::Address;

use crate::codec::{AttributeSpec, Body, BodyRule, ControlMessage, FieldValue, Fields};

/// Toggles the room's outbound advertising stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvertisingStream {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Address>,
    /// [`Self::STOP`] or [`Self::START`]; other values are carried as-is.
    pub status: i32,
}

impl AdvertisingStream {
    pub const STOP: i32 = 0;
    pub const START: i32 = 1;

    pub fn new(status: i32) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn start() -> Self {
        Self::new(Self::START)
    }

    pub fn stop() -> Self {
        Self::new(Self::STOP)
    }

    pub fn with_target(mut self, target: Address) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_actor(mut self, actor: Address) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn is_started(&self) -> bool {
        self.status == Self::START
    }
}

impl ControlMessage for AdvertisingStream {
    const NAMESPACE: &'static str = "http://jitsi.org/jitmeet/advertisingstream";
    const ELEMENT: &'static str = "advertisingStream";
    const ATTRIBUTES: &'static [AttributeSpec] = &[];
    const BODY: BodyRule = BodyRule::Status {
        default: Self::STOP,
    };

    fn from_wire(mut fields: Fields, body: Body) -> Self {
        Self {
            target: fields.target(),
            actor: fields.actor(),
            status: body.status().unwrap_or(Self::STOP),
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
