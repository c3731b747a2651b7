//! Generic attribute/body codec.
//!
//! Every control message is described by a [`ControlMessage`] impl: its
//! namespace and element name, an ordered table of kind-specific attributes
//! and a [`BodyRule`]. The functions here do the actual work for all kinds:
//!
//! - occupant attributes (`jid`, `actor`) are always read and written first;
//! - attributes are typed by the table: addresses must parse, flags are
//!   parsed leniently, text is kept verbatim, unknown names are ignored;
//! - unset fields are never written;
//! - body problems fall back to the kind's default and are reported as
//!   [`Diagnostic`]s instead of failing the decode.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use veazzy_core::Address;

use crate::error::{ProtocolError, ProtocolResult};
use crate::stanza::{AttributeSet, EncodedElement, RawElement};

/// Attribute naming the occupant the event concerns.
pub const TARGET_ATTR: &str = "jid";

/// Attribute naming the occupant that initiated the event.
pub const ACTOR_ATTR: &str = "actor";

/// Wire type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Occupant address, resolved through [`Address::parse`].
    Address,
    /// `"true"` / `"false"`, parsed leniently.
    Flag,
    /// Free text, stored verbatim.
    Text,
}

/// One entry of a kind's attribute table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

impl AttributeSpec {
    pub const fn address(name: &'static str) -> Self {
        Self {
            name,
            ty: FieldType::Address,
        }
    }

    pub const fn flag(name: &'static str) -> Self {
        Self {
            name,
            ty: FieldType::Flag,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            ty: FieldType::Text,
        }
    }
}

/// Attributes shared by every kind, in wire order.
pub const OCCUPANT_ATTRIBUTES: [AttributeSpec; 2] = [
    AttributeSpec::address(TARGET_ATTR),
    AttributeSpec::address(ACTOR_ATTR),
];

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Address(Address),
    Flag(bool),
    Text(String),
}

impl FieldValue {
    /// Returns the wire form of the value.
    pub fn to_wire(&self) -> String {
        match self {
            FieldValue::Address(address) => address.to_string(),
            FieldValue::Flag(flag) => flag.to_string(),
            FieldValue::Text(text) => text.clone(),
        }
    }
}

impl From<Address> for FieldValue {
    fn from(address: Address) -> Self {
        FieldValue::Address(address)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        FieldValue::Flag(flag)
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

/// Decoded attribute values of one element, keyed by attribute name.
///
/// Kinds take values out of it while building themselves; absent
/// attributes come back as `None`.
#[derive(Debug, Default)]
pub struct Fields {
    values: Vec<(&'static str, FieldValue)>,
}

impl Fields {
    fn set(&mut self, name: &'static str, value: FieldValue) {
        self.values.retain(|(n, _)| *n != name);
        self.values.push((name, value));
    }

    fn take(&mut self, name: &str) -> Option<FieldValue> {
        let index = self.values.iter().position(|(n, _)| *n == name)?;
        Some(self.values.swap_remove(index).1)
    }

    /// Takes the `jid` address.
    pub fn target(&mut self) -> Option<Address> {
        self.address(TARGET_ATTR)
    }

    /// Takes the `actor` address.
    pub fn actor(&mut self) -> Option<Address> {
        self.address(ACTOR_ATTR)
    }

    pub fn address(&mut self, name: &str) -> Option<Address> {
        match self.take(name)? {
            FieldValue::Address(address) => Some(address),
            _ => None,
        }
    }

    pub fn flag(&mut self, name: &str) -> Option<bool> {
        match self.take(name)? {
            FieldValue::Flag(flag) => Some(flag),
            _ => None,
        }
    }

    pub fn text(&mut self, name: &str) -> Option<String> {
        match self.take(name)? {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// How a kind interprets its body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRule {
    /// Integer status; `default` replaces a missing or non-numeric body.
    Status { default: i32 },
    /// Integer status with a reserved token. The token is recognised (no
    /// diagnostic) but yields `default` without setting any request flag.
    StatusWithToken { default: i32, token: &'static str },
    /// Lenient boolean.
    Flag,
    /// Free text.
    Text,
    /// Free text, or `token` marking a query request.
    Sentinel { token: &'static str },
}

/// Interpreted body of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Status(i32),
    Flag(Option<bool>),
    Text(Option<String>),
    /// The body was the kind's query token.
    Query,
}

impl Body {
    pub fn status(&self) -> Option<i32> {
        match self {
            Body::Status(status) => Some(*status),
            _ => None,
        }
    }

    pub fn flag(&self) -> Option<bool> {
        match self {
            Body::Flag(flag) => *flag,
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Body::Text(text) => text,
            _ => None,
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Body::Query)
    }
}

/// A recoverable problem met while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The body was not an integer; `fallback` was used instead.
    MalformedNumericBody { body: String, fallback: i32 },
    /// The body was absent or empty.
    MissingBody,
    /// An attribute the kind does not know was skipped.
    IgnoredAttribute { name: String },
}

/// A decoded message together with the diagnostics met on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<M> {
    pub message: M,
    pub diagnostics: Vec<Diagnostic>,
}

impl<M> Decoded<M> {
    /// Maps the message, keeping the diagnostics.
    pub fn map<N>(self, f: impl FnOnce(M) -> N) -> Decoded<N> {
        Decoded {
            message: f(self.message),
            diagnostics: self.diagnostics,
        }
    }

    /// Returns true if decoding met no recoverable problem.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A meeting-control message kind.
pub trait ControlMessage: Sized {
    /// Namespace URI of the element.
    const NAMESPACE: &'static str;
    /// Local element name.
    const ELEMENT: &'static str;
    /// Kind-specific attributes in wire order, after the occupant ones.
    const ATTRIBUTES: &'static [AttributeSpec];
    /// Body interpretation.
    const BODY: BodyRule;

    /// Builds the message from decoded attributes and body.
    fn from_wire(fields: Fields, body: Body) -> Self;

    /// The occupant the event concerns.
    fn target(&self) -> Option<&Address>;

    /// The occupant that initiated the event.
    fn actor(&self) -> Option<&Address>;

    /// Value of a kind-specific attribute, `None` when unset.
    fn attribute(&self, name: &str) -> Option<FieldValue>;

    /// Wire form of the body.
    fn body(&self) -> String;

    /// Decodes `element` as this kind; see [`decode`].
    fn decode(element: &RawElement) -> ProtocolResult<Option<Decoded<Self>>> {
        decode(element)
    }

    /// Encodes this message; see [`encode`].
    fn encode(&self) -> EncodedElement {
        encode(self)
    }
}

/// Decodes an element as kind `M`.
///
/// Returns `Ok(None)` when the namespace or element name belongs to
/// another kind. Fails only when an address attribute does not parse.
pub fn decode<M: ControlMessage>(element: &RawElement) -> ProtocolResult<Option<Decoded<M>>> {
    if element.namespace != M::NAMESPACE || element.name != M::ELEMENT {
        return Ok(None);
    }

    let mut diagnostics = Vec::new();
    let fields = read_attributes(M::ATTRIBUTES, &element.attributes, &mut diagnostics)?;
    let body = read_body(M::BODY, element.body.as_deref(), &mut diagnostics);

    for diagnostic in &diagnostics {
        match diagnostic {
            Diagnostic::MalformedNumericBody { body, fallback } => {
                warn!(element = M::ELEMENT, body = %body, fallback, "non-numeric status body");
            }
            Diagnostic::MissingBody => {
                warn!(element = M::ELEMENT, "request without value");
            }
            Diagnostic::IgnoredAttribute { name } => {
                trace!(element = M::ELEMENT, attribute = %name, "ignoring unknown attribute");
            }
        }
    }

    Ok(Some(Decoded {
        message: M::from_wire(fields, body),
        diagnostics,
    }))
}

/// Encodes a message into its element form.
///
/// Occupant attributes come first, then the kind's attributes in table
/// order; unset values are omitted.
pub fn encode<M: ControlMessage>(message: &M) -> EncodedElement {
    let mut attributes = AttributeSet::new();
    if let Some(target) = message.target() {
        attributes.insert(TARGET_ATTR, target.to_string());
    }
    if let Some(actor) = message.actor() {
        attributes.insert(ACTOR_ATTR, actor.to_string());
    }
    for spec in M::ATTRIBUTES {
        if let Some(value) = message.attribute(spec.name) {
            attributes.insert(spec.name, value.to_wire());
        }
    }

    let element = EncodedElement {
        namespace: M::NAMESPACE,
        name: M::ELEMENT,
        attributes,
        body: message.body(),
    };
    debug!(element = M::ELEMENT, attributes = element.attributes.len(), body = %element.body, "built control element");
    element
}

/// Lenient boolean: `"true"` in any case is true, anything else false.
///
/// The value is not trimmed; `" true"` is false.
pub fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

fn read_attributes(
    table: &'static [AttributeSpec],
    attributes: &AttributeSet,
    diagnostics: &mut Vec<Diagnostic>,
) -> ProtocolResult<Fields> {
    let mut fields = Fields::default();
    for (name, value) in attributes.iter() {
        let Some(spec) = OCCUPANT_ATTRIBUTES
            .iter()
            .chain(table.iter())
            .find(|spec| spec.name == name)
            .copied()
        else {
            diagnostics.push(Diagnostic::IgnoredAttribute {
                name: name.to_string(),
            });
            continue;
        };

        let value = match spec.ty {
            FieldType::Address => FieldValue::Address(
                Address::parse(value)
                    .map_err(|source| ProtocolError::invalid_address(spec.name, source))?,
            ),
            FieldType::Flag => FieldValue::Flag(parse_flag(value)),
            FieldType::Text => FieldValue::Text(value.to_string()),
        };
        fields.set(spec.name, value);
    }
    Ok(fields)
}

fn read_body(rule: BodyRule, body: Option<&str>, diagnostics: &mut Vec<Diagnostic>) -> Body {
    let Some(text) = body.filter(|text| !text.is_empty()) else {
        diagnostics.push(Diagnostic::MissingBody);
        return match rule {
            BodyRule::Status { default } | BodyRule::StatusWithToken { default, .. } => {
                Body::Status(default)
            }
            BodyRule::Flag => Body::Flag(None),
            BodyRule::Text | BodyRule::Sentinel { .. } => Body::Text(None),
        };
    };

    match rule {
        BodyRule::Status { default } => Body::Status(parse_status(text, default, diagnostics)),
        BodyRule::StatusWithToken { default, token } => {
            if text == token {
                trace!(token, "status check token");
                Body::Status(default)
            } else {
                Body::Status(parse_status(text, default, diagnostics))
            }
        }
        BodyRule::Flag => Body::Flag(Some(parse_flag(text))),
        BodyRule::Text => Body::Text(Some(text.to_string())),
        BodyRule::Sentinel { token } => {
            if text == token {
                Body::Query
            } else {
                Body::Text(Some(text.to_string()))
            }
        }
    }
}

fn parse_status(text: &str, default: i32, diagnostics: &mut Vec<Diagnostic>) -> i32 {
    match text.parse::<i32>() {
        Ok(status) => status,
        Err(_) => {
            diagnostics.push(Diagnostic::MalformedNumericBody {
                body: text.to_string(),
                fallback: default,
            });
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_is_lenient() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("True "));
        assert!(!parse_flag(" true"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("maybe"));
        assert!(!parse_flag("1"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn status_body_falls_back() {
        let mut diagnostics = Vec::new();
        let body = read_body(
            BodyRule::Status { default: 7 },
            Some("not-a-number"),
            &mut diagnostics,
        );
        assert_eq!(body, Body::Status(7));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::MalformedNumericBody {
                body: "not-a-number".to_string(),
                fallback: 7
            }]
        );
    }

    #[test]
    fn status_body_rejects_padding() {
        let mut diagnostics = Vec::new();
        let body = read_body(BodyRule::Status { default: 0 }, Some(" 1 "), &mut diagnostics);
        assert_eq!(body, Body::Status(0));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::MalformedNumericBody {
                body: " 1 ".to_string(),
                fallback: 0
            }]
        );
    }

    #[test]
    fn missing_body_is_reported() {
        for rule in [
            BodyRule::Status { default: 3 },
            BodyRule::Flag,
            BodyRule::Text,
            BodyRule::Sentinel { token: "get" },
        ] {
            let mut diagnostics = Vec::new();
            let body = read_body(rule, Some(""), &mut diagnostics);
            assert_eq!(diagnostics, vec![Diagnostic::MissingBody], "{rule:?}");
            assert!(body.status() == Some(3) || body.status().is_none());
            assert!(body.flag().is_none());
        }
    }

    #[test]
    fn sentinel_token_is_query() {
        let mut diagnostics = Vec::new();
        let rule = BodyRule::Sentinel { token: "get" };
        assert!(read_body(rule, Some("get"), &mut diagnostics).is_query());
        assert_eq!(
            read_body(rule, Some("getter"), &mut diagnostics).into_text(),
            Some("getter".to_string())
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn status_token_is_recognised_silently() {
        let mut diagnostics = Vec::new();
        let rule = BodyRule::StatusWithToken {
            default: 1,
            token: "check",
        };
        assert_eq!(read_body(rule, Some("check"), &mut diagnostics), Body::Status(1));
        assert!(diagnostics.is_empty());
        assert_eq!(read_body(rule, Some("0"), &mut diagnostics), Body::Status(0));
    }

    #[test]
    fn attributes_are_typed_by_table() {
        const TABLE: &[AttributeSpec] = &[AttributeSpec::flag("lock"), AttributeSpec::text("note")];
        let attributes: AttributeSet = [
            ("jid", "room1@conf.example/alice"),
            ("lock", "TRUE"),
            ("note", " spaced "),
            ("future", "x"),
        ]
        .into_iter()
        .collect();

        let mut diagnostics = Vec::new();
        let mut fields = read_attributes(TABLE, &attributes, &mut diagnostics).unwrap();

        assert_eq!(
            fields.target().map(|a| a.to_string()),
            Some("room1@conf.example/alice".to_string())
        );
        assert_eq!(fields.actor(), None);
        assert_eq!(fields.flag("lock"), Some(true));
        assert_eq!(fields.text("note"), Some(" spaced ".to_string()));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::IgnoredAttribute {
                name: "future".to_string()
            }]
        );
    }

    #[test]
    fn bad_address_is_fatal() {
        let attributes: AttributeSet = [("actor", "@/")].into_iter().collect();
        let mut diagnostics = Vec::new();
        let err = read_attributes(&[], &attributes, &mut diagnostics).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidAddress { ref attribute, .. } if attribute == "actor"
        ));
    }

    #[test]
    fn field_value_wire_form() {
        assert_eq!(FieldValue::Flag(false).to_wire(), "false");
        assert_eq!(FieldValue::Text("EUR".into()).to_wire(), "EUR");
    }
}
