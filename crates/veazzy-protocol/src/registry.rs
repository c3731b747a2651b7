//! Codec registry.
//!
//! Maps `(namespace, element)` to the decoder of one message kind. The
//! registry is filled once at startup and then shared read-only, so it
//! needs no locking.

use std::collections::HashMap;

use tracing::debug;

use crate::codec::{self, ControlMessage, Decoded};
use crate::error::ProtocolResult;
use crate::kinds::{
    AdvertisingStream, Blind, DonationAmount, Message, QuizAnswer, QuizQuestion, RaiseHand,
    RoomFocalParticipant, RoomManager, RoomStatus, Visitor,
};
use crate::stanza::{self, RawElement};

/// Decoder for one registered element.
///
/// `Ok(None)` means the element is not applicable to this decoder.
pub type DecodeFn = fn(&RawElement) -> ProtocolResult<Option<Decoded<Message>>>;

/// Lookup table from `(namespace, element)` to decoder.
#[derive(Debug, Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<String, HashMap<String, DecodeFn>>,
}

impl CodecRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in kind.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_kind::<AdvertisingStream>();
        registry.register_kind::<Blind>();
        registry.register_kind::<DonationAmount>();
        registry.register_kind::<QuizAnswer>();
        registry.register_kind::<QuizQuestion>();
        registry.register_kind::<RaiseHand>();
        registry.register_kind::<RoomFocalParticipant>();
        registry.register_kind::<RoomManager>();
        registry.register_kind::<RoomStatus>();
        registry.register_kind::<Visitor>();
        registry
    }

    /// Registers a decoder, replacing any earlier one for the same pair.
    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        element: impl Into<String>,
        decoder: DecodeFn,
    ) {
        let namespace = namespace.into();
        let element = element.into();
        let replaced = self
            .codecs
            .entry(namespace.clone())
            .or_default()
            .insert(element.clone(), decoder)
            .is_some();
        if replaced {
            debug!(%namespace, %element, "replaced registered codec");
        }
    }

    /// Registers the decoder of a built-in kind.
    pub fn register_kind<M>(&mut self)
    where
        M: ControlMessage + Into<Message>,
    {
        self.register(M::NAMESPACE, M::ELEMENT, decode_kind::<M>);
    }

    /// Returns the decoder registered for a pair.
    pub fn lookup(&self, namespace: &str, element: &str) -> Option<DecodeFn> {
        self.codecs.get(namespace)?.get(element).copied()
    }

    /// Decodes an element, returning diagnostics alongside the message.
    ///
    /// `Ok(None)` means no registered codec handles the element.
    pub fn decode_detailed(&self, element: &RawElement) -> ProtocolResult<Option<Decoded<Message>>> {
        match self.lookup(&element.namespace, &element.name) {
            Some(decoder) => decoder(element),
            None => {
                debug!(namespace = %element.namespace, element = %element.name, "no codec registered");
                Ok(None)
            }
        }
    }

    /// Decodes an element; `Ok(None)` means not handled.
    pub fn decode(&self, element: &RawElement) -> ProtocolResult<Option<Message>> {
        Ok(self.decode_detailed(element)?.map(|decoded| decoded.message))
    }

    /// Reads the payload of an XML stanza and decodes it.
    pub fn decode_xml(&self, xml: &str) -> ProtocolResult<Option<Decoded<Message>>> {
        let element = stanza::read_element(xml)?;
        self.decode_detailed(&element)
    }

    /// Registered `(namespace, element)` pairs, sorted.
    pub fn kinds(&self) -> Vec<(&str, &str)> {
        let mut kinds: Vec<_> = self
            .codecs
            .iter()
            .flat_map(|(ns, elements)| elements.keys().map(move |el| (ns.as_str(), el.as_str())))
            .collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.codecs.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn decode_kind<M>(element: &RawElement) -> ProtocolResult<Option<Decoded<Message>>>
where
    M: ControlMessage + Into<Message>,
{
    Ok(codec::decode::<M>(element)?.map(|decoded| decoded.map(Into::into)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::ALL_KINDS;

    fn never(_: &RawElement) -> ProtocolResult<Option<Decoded<Message>>> {
        Ok(None)
    }

    #[test]
    fn defaults_cover_all_kinds() {
        let registry = CodecRegistry::with_defaults();
        assert_eq!(registry.len(), ALL_KINDS.len());
        for (namespace, element) in ALL_KINDS {
            assert!(registry.lookup(namespace, element).is_some(), "{element}");
        }
    }

    #[test]
    fn unknown_pair_is_not_handled() {
        let registry = CodecRegistry::with_defaults();
        let element = RawElement::new("urn:example:unknown", "raiseHand");
        assert!(registry.decode(&element).unwrap().is_none());

        let element = RawElement::new(RaiseHand::NAMESPACE, "lowerHand");
        assert!(registry.decode(&element).unwrap().is_none());
    }

    #[test]
    fn register_last_write_wins() {
        let mut registry = CodecRegistry::with_defaults();
        registry.register(RaiseHand::NAMESPACE, RaiseHand::ELEMENT, never);
        assert_eq!(registry.len(), ALL_KINDS.len());

        let element = RawElement::new(RaiseHand::NAMESPACE, RaiseHand::ELEMENT).with_body("1");
        assert!(registry.decode(&element).unwrap().is_none());
    }

    #[test]
    fn mismatched_decoder_is_not_applicable() {
        let mut registry = CodecRegistry::new();
        // a blind decoder registered under another pair refuses the element
        registry.register("urn:example:alias", "blind", decode_kind::<Blind>);
        let element = RawElement::new("urn:example:alias", "blind").with_body("true");
        assert!(registry.decode(&element).unwrap().is_none());
    }

    #[test]
    fn kinds_are_sorted() {
        let registry = CodecRegistry::with_defaults();
        let kinds = registry.kinds();
        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted);
        assert!(kinds.contains(&("http://jitsi.org/jitmeet/video", "blind")));
    }

    #[test]
    fn empty_registry() {
        let registry = CodecRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup(Blind::NAMESPACE, Blind::ELEMENT).is_none());
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodecRegistry>();
    }
}
