//! Meeting-control stanzas for Jitsi Meet rooms.
//!
//! This crate defines small, self-describing control messages exchanged
//! between occupants of a multi-user conference over XMPP: raising hands,
//! blinding cameras, posting quizzes, electing a room manager, and so on.
//!
//! # Wire format
//!
//! Each message is one element in its own namespace. Occupant addresses go
//! into the `jid` (target) and `actor` attributes, kind-specific values into
//! further attributes, and the main value into the element body:
//!
//! ```text
//! <raiseHand xmlns="http://jitsi.org/jitmeet/raisehand"
//!            jid="room1@conf.example/alice"
//!            actor="room1@conf.example/mod">1</raiseHand>
//! ```
//!
//! Decoding is lenient: malformed status bodies fall back to a documented
//! default, unknown attributes are ignored, and only an unparsable address
//! fails a decode.
//!
//! # Example
//!
//! ```rust
//! use veazzy_protocol::{CodecRegistry, Message, RaiseHand, write_element};
//! use veazzy_core::Address;
//!
//! let registry = CodecRegistry::with_defaults();
//!
//! let hand = RaiseHand::raised().with_target(Address::parse("room1@conf.example/alice").unwrap());
//! let xml = write_element(&Message::from(hand.clone()).encode()).unwrap();
//!
//! let decoded = registry.decode_xml(&xml).unwrap().unwrap();
//! assert_eq!(decoded.message, Message::RaiseHand(hand));
//! ```

pub mod codec;
mod error;
pub mod kinds;
pub mod registry;
pub mod stanza;

pub use codec::{
    AttributeSpec, Body, BodyRule, ControlMessage, Decoded, Diagnostic, FieldType, FieldValue,
    Fields, parse_flag,
};
pub use error::{ProtocolError, ProtocolResult};
pub use kinds::{
    ALL_KINDS, AdvertisingStream, Blind, DonationAmount, Message, NAMESPACE_PREFIX, QuizAnswer,
    QuizChoice, QuizQuestion, RaiseHand, RoomFocalParticipant, RoomManager, RoomStatus, Visitor,
};
pub use registry::{CodecRegistry, DecodeFn};
pub use stanza::{
    AttributeSet, EncodedElement, IqEnvelope, IqType, RawElement, read_element, write_element,
    write_iq,
};
