//! XML token stream boundary.
//!
//! The surrounding transport hands each codec one element: its namespace,
//! local name, attributes and character data. [`read_element`] builds that
//! view from raw XML with quick-xml's namespace-aware reader, and
//! [`write_element`] / [`write_iq`] produce the outbound form.
//!
//! ```text
//! <iq type="set" id="h1">
//!   <raiseHand xmlns="http://jitsi.org/jitmeet/raisehand"
//!              jid="room1@conf.example/alice">1</raiseHand>
//! </iq>
//! ```

use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use veazzy_core::Address;

use crate::error::{ProtocolError, ProtocolResult};

/// Local name of the IQ stanza that usually wraps a payload.
pub const IQ_ELEMENT: &str = "iq";

/// Ordered attribute list of a single element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: Vec<(String, String)>,
}

impl AttributeSet {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing an earlier value with the same name
    /// in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value of an attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the attribute names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

/// One inbound element as handed over by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawElement {
    /// Resolved namespace URI (empty when unbound).
    pub namespace: String,
    /// Local element name.
    pub name: String,
    /// Attributes, namespace declarations excluded.
    pub attributes: AttributeSet,
    /// Concatenated character data, `None` when there was none.
    pub body: Option<String>,
}

impl RawElement {
    /// Creates an element with no attributes and no body.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            attributes: AttributeSet::new(),
            body: None,
        }
    }

    /// Builder: add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Builder: set the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// One outbound element, ready for the stanza writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedElement {
    pub namespace: &'static str,
    pub name: &'static str,
    /// Attributes in wire order.
    pub attributes: AttributeSet,
    pub body: String,
}

impl EncodedElement {
    /// Converts to the inbound view, as if read back from the wire.
    pub fn to_raw(&self) -> RawElement {
        RawElement {
            namespace: self.namespace.to_string(),
            name: self.name.to_string(),
            attributes: self.attributes.clone(),
            body: Some(self.body.clone()).filter(|b| !b.is_empty()),
        }
    }
}

/// Type of an IQ stanza.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IqType {
    Get,
    #[default]
    Set,
    Result,
    Error,
}

impl IqType {
    pub fn as_str(self) -> &'static str {
        match self {
            IqType::Get => "get",
            IqType::Set => "set",
            IqType::Result => "result",
            IqType::Error => "error",
        }
    }
}

/// Addressing header of an outbound IQ stanza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IqEnvelope {
    pub id: String,
    pub iq_type: IqType,
    pub from: Option<Address>,
    pub to: Option<Address>,
}

impl IqEnvelope {
    /// Creates a `set` envelope with the given stanza id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            iq_type: IqType::Set,
            from: None,
            to: None,
        }
    }

    pub fn with_type(mut self, iq_type: IqType) -> Self {
        self.iq_type = iq_type;
        self
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }
}

/// Reads the payload element of an XML document.
///
/// A root `<iq>` is treated as a wrapper and its first child element is
/// returned instead. Character data at any depth below the payload is
/// concatenated until the payload's end tag.
pub fn read_element(xml: &str) -> ProtocolResult<RawElement> {
    let mut reader = NsReader::from_str(xml);
    let mut payload: Option<RawElement> = None;
    let mut body = String::new();
    let mut depth = 0usize;
    let mut root_seen = false;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(start) => {
                if payload.is_some() {
                    depth += 1;
                    continue;
                }
                if !root_seen && start.local_name().as_ref() == IQ_ELEMENT.as_bytes() {
                    root_seen = true;
                    continue;
                }
                payload = Some(start_element(namespace_of(ns), &start)?);
                depth = 1;
            }
            Event::Empty(start) => {
                if payload.is_none() {
                    if !root_seen && start.local_name().as_ref() == IQ_ELEMENT.as_bytes() {
                        return Err(ProtocolError::MissingElement);
                    }
                    return start_element(namespace_of(ns), &start);
                }
            }
            Event::End(_) => {
                if payload.is_none() {
                    // closing the wrapper without a payload inside it
                    return Err(ProtocolError::MissingElement);
                }
                depth -= 1;
                if depth == 0 {
                    let mut element = payload.take().ok_or(ProtocolError::MissingElement)?;
                    if !body.is_empty() {
                        element.body = Some(body);
                    }
                    return Ok(element);
                }
            }
            Event::Text(text) if payload.is_some() => {
                body.push_str(&text.unescape()?);
            }
            Event::CData(cdata) if payload.is_some() => {
                body.push_str(&String::from_utf8_lossy(&cdata));
            }
            Event::Eof => {
                return Err(match payload {
                    Some(element) => ProtocolError::UnexpectedEof {
                        element: element.name,
                    },
                    None => ProtocolError::MissingElement,
                });
            }
            _ => {}
        }
    }
}

/// Writes a payload element as a standalone XML fragment.
pub fn write_element(element: &EncodedElement) -> ProtocolResult<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_payload(&mut writer, element)?;
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

/// Writes a payload element wrapped in an `<iq>` stanza.
pub fn write_iq(element: &EncodedElement, envelope: &IqEnvelope) -> ProtocolResult<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let mut iq = BytesStart::new(IQ_ELEMENT);
    iq.push_attribute(("id", envelope.id.as_str()));
    iq.push_attribute(("type", envelope.iq_type.as_str()));
    if let Some(ref from) = envelope.from {
        iq.push_attribute(("from", from.to_string().as_str()));
    }
    if let Some(ref to) = envelope.to {
        iq.push_attribute(("to", to.to_string().as_str()));
    }
    writer.write_event(Event::Start(iq))?;
    write_payload(&mut writer, element)?;
    writer.write_event(Event::End(BytesEnd::new(IQ_ELEMENT)))?;

    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

fn write_payload<W: Write>(writer: &mut Writer<W>, element: &EncodedElement) -> ProtocolResult<()> {
    let mut start = BytesStart::new(element.name);
    start.push_attribute(("xmlns", element.namespace));
    for (name, value) in element.attributes.iter() {
        start.push_attribute((name, value));
    }
    writer.write_event(Event::Start(start))?;
    if !element.body.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.body)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name)))?;
    Ok(())
}

fn start_element(namespace: String, start: &BytesStart<'_>) -> ProtocolResult<RawElement> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = AttributeSet::new();
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }

    Ok(RawElement {
        namespace,
        name,
        attributes,
        body: None,
    })
}

fn namespace_of(ns: ResolveResult<'_>) -> String {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => String::from_utf8_lossy(uri).into_owned(),
        _ => String::new(),
    }
}
