//! Message kinds.
//!
//! One immutable value type per meeting-control event, plus the closed
//! [`Message`] enum used where the kind is only known at runtime.

mod donation;
mod hand;
mod quiz;
mod room;
mod stream;
mod video;
mod visitor;

pub use donation::DonationAmount;
pub use hand::RaiseHand;
pub use quiz::{QuizAnswer, QuizChoice, QuizQuestion};
pub use room::{RoomFocalParticipant, RoomManager, RoomStatus};
pub use stream::AdvertisingStream;
pub use video::Blind;
pub use visitor::Visitor;

use serde::{Deserialize, Serialize};
use veazzy_core::Address;

use crate::codec::ControlMessage;
use crate::stanza::EncodedElement;

/// Common prefix of every kind's namespace.
pub const NAMESPACE_PREFIX: &str = "http://jitsi.org/jitmeet/";

macro_rules! message_kinds {
    ($($variant:ident),+ $(,)?) => {
        /// Any meeting-control message.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(tag = "kind", rename_all = "snake_case")]
        pub enum Message {
            $($variant($variant),)+
        }

        $(
            impl From<$variant> for Message {
                fn from(message: $variant) -> Self {
                    Message::$variant(message)
                }
            }
        )+

        impl Message {
            /// Namespace URI of the message's element.
            pub fn namespace(&self) -> &'static str {
                match self {
                    $(Message::$variant(_) => <$variant as ControlMessage>::NAMESPACE,)+
                }
            }

            /// Local name of the message's element.
            pub fn element(&self) -> &'static str {
                match self {
                    $(Message::$variant(_) => <$variant as ControlMessage>::ELEMENT,)+
                }
            }

            /// The occupant the event concerns.
            pub fn target(&self) -> Option<&Address> {
                match self {
                    $(Message::$variant(m) => m.target(),)+
                }
            }

            /// The occupant that initiated the event.
            pub fn actor(&self) -> Option<&Address> {
                match self {
                    $(Message::$variant(m) => m.actor(),)+
                }
            }

            /// Encodes the message into its element form.
            pub fn encode(&self) -> EncodedElement {
                match self {
                    $(Message::$variant(m) => m.encode(),)+
                }
            }
        }

        /// `(namespace, element)` of every kind, in declaration order.
        pub const ALL_KINDS: &[(&str, &str)] = &[
            $((<$variant as ControlMessage>::NAMESPACE, <$variant as ControlMessage>::ELEMENT),)+
        ];
    };
}

message_kinds!(
    AdvertisingStream,
    Blind,
    DonationAmount,
    QuizAnswer,
    QuizQuestion,
    RaiseHand,
    RoomFocalParticipant,
    RoomManager,
    RoomStatus,
    Visitor,
);
