//! Donation announcements.

use serde::{Deserialize, Serialize};
use veazzy_core::Address;

use crate::codec::{AttributeSpec, Body, BodyRule, ControlMessage, FieldValue, Fields};

const AVATAR_ATTR: &str = "avatar";
const CURRENCY_ATTR: &str = "currency";

/// Broadcasts a donation made by a participant.
///
/// The amount is kept as text: peers send whatever their UI formatted,
/// and the codec does not second-guess it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonationAmount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Address>,
    /// Avatar reference (usually a URL) of the donor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Currency code, e.g. `EUR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

impl DonationAmount {
    pub fn new(amount: impl Into<String>) -> Self {
        Self {
            amount: Some(amount.into()),
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

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

impl ControlMessage for DonationAmount {
    const NAMESPACE: &'static str = "http://jitsi.org/jitmeet/donationamount";
    const ELEMENT: &'static str = "donationAmount";
    const ATTRIBUTES: &'static [AttributeSpec] = &[
        AttributeSpec::text(AVATAR_ATTR),
        AttributeSpec::text(CURRENCY_ATTR),
    ];
    const BODY: BodyRule = BodyRule::Text;

    fn from_wire(mut fields: Fields, body: Body) -> Self {
        Self {
            target: fields.target(),
            actor: fields.actor(),
            avatar: fields.text(AVATAR_ATTR),
            currency: fields.text(CURRENCY_ATTR),
            amount: body.into_text(),
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
            AVATAR_ATTR => self.avatar.clone().map(FieldValue::Text),
            CURRENCY_ATTR => self.currency.clone().map(FieldValue::Text),
            _ => None,
        }
    }

    fn body(&self) -> String {
        self.amount.clone().unwrap_or_default()
    }
}
