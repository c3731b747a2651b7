//! Decode, encode and kinds commands.

use serde::Serialize;
use tracing::{debug, info};
use veazzy_core::Address;
use veazzy_protocol::{
    CodecRegistry, Decoded, Diagnostic, IqEnvelope, Message, read_element, write_element, write_iq,
};

use crate::config::OutputSettings;
use crate::error::{CliError, CliResult};

/// Envelope options for `encode`.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeOptions {
    pub iq_id: Option<String>,
    pub to: Option<Address>,
    pub from: Option<Address>,
}

impl EnvelopeOptions {
    /// Id used when `wrap_iq` is configured but no id was given.
    pub const DEFAULT_IQ_ID: &'static str = "veazzy-1";

    fn envelope(&self, output: &OutputSettings) -> Option<IqEnvelope> {
        let id = match (&self.iq_id, output.wrap_iq) {
            (Some(id), _) => id.clone(),
            (None, true) => Self::DEFAULT_IQ_ID.to_string(),
            (None, false) => return None,
        };
        let mut envelope = IqEnvelope::new(id);
        if let Some(ref to) = self.to {
            envelope = envelope.with_to(to.clone());
        }
        if let Some(ref from) = self.from {
            envelope = envelope.with_from(from.clone());
        }
        Some(envelope)
    }
}

/// JSON printed by `decode`: the message fields plus any diagnostics.
///
/// `encode` accepts this output back; the extra key is ignored.
#[derive(Debug, Serialize)]
struct DecodeOutput {
    #[serde(flatten)]
    message: Message,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<Diagnostic>,
}

/// Decodes an XML stanza into the JSON form of its message.
pub fn decode(registry: &CodecRegistry, xml: &str, output: &OutputSettings) -> CliResult<String> {
    let element = read_element(xml)?;
    let Some(Decoded {
        message,
        diagnostics,
    }) = registry.decode_detailed(&element)?
    else {
        return Err(CliError::NotHandled {
            namespace: element.namespace,
            element: element.name,
        });
    };
    debug!(
        kind = message.element(),
        diagnostics = diagnostics.len(),
        "decoded stanza"
    );

    let decoded = DecodeOutput {
        message,
        diagnostics,
    };
    let json = if output.pretty_json {
        serde_json::to_string_pretty(&decoded)?
    } else {
        serde_json::to_string(&decoded)?
    };
    Ok(json)
}

/// Encodes the JSON form of a message into an XML stanza.
pub fn encode(json: &str, envelope: &EnvelopeOptions, output: &OutputSettings) -> CliResult<String> {
    let message: Message = serde_json::from_str(json)?;
    let element = message.encode();
    let xml = match envelope.envelope(output) {
        Some(iq) => write_iq(&element, &iq)?,
        None => write_element(&element)?,
    };
    Ok(xml)
}

/// Lists the registered (namespace, element) pairs, one per line.
pub fn kinds(registry: &CodecRegistry) -> String {
    let kinds = registry.kinds();
    info!(count = kinds.len(), "listing registered kinds");
    kinds
        .into_iter()
        .map(|(namespace, element)| format!("{namespace}\t{element}"))
        .collect::<Vec<_>>()
        .join("\n")
}
