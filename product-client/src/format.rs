//! Media types and the serialization strategy behind each of them.

use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Json,
    Xml,
    FormUrlEncoded,
    OctetStream,
    Any,
}

impl MediaType {
    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Json => "application/json",
            MediaType::Xml => "application/xml",
            MediaType::FormUrlEncoded => "application/x-www-form-urlencoded",
            MediaType::OctetStream => "application/octet-stream",
            MediaType::Any => "*/*",
        }
    }

    /// Comma separated `Accept` header value for `types`.
    pub fn accept(types: &[MediaType]) -> String {
        types
            .iter()
            .map(|media| media.mime())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn encode<T: Serialize>(self, value: &T) -> Result<String, ClientError> {
        let encoded = match self {
            MediaType::Json => serde_json::to_string(value).map_err(|e| e.to_string()),
            MediaType::Xml => quick_xml::se::to_string(value).map_err(|e| e.to_string()),
            MediaType::FormUrlEncoded => serde_urlencoded::to_string(value).map_err(|e| e.to_string()),
            MediaType::OctetStream | MediaType::Any => {
                Err(format!("cannot encode a value as {}", self.mime()))
            }
        };
        encoded.map_err(ClientError::SerializationError)
    }

    pub fn decode<T: DeserializeOwned>(self, body: &str) -> Result<T, ClientError> {
        let decoded = match self {
            MediaType::Json | MediaType::Any => serde_json::from_str(body).map_err(|e| e.to_string()),
            MediaType::Xml => reference_edge_whitespace(body)
                .map_err(|e| e.to_string())
                .and_then(|xml| quick_xml::de::from_str(&xml).map_err(|e| e.to_string())),
            MediaType::FormUrlEncoded => serde_urlencoded::from_str(body).map_err(|e| e.to_string()),
            MediaType::OctetStream => Err(format!("cannot decode a value from {}", self.mime())),
        };
        decoded.map_err(ClientError::DeserializationError)
    }
}

/// Rewrites leading and trailing whitespace of leaf element text as character
/// references. The quick-xml deserializer trims raw text before unescaping it,
/// so a reference survives where a literal space would be dropped.
fn reference_edge_whitespace(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    let mut pending: Option<BytesText<'_>> = None;
    let mut after_start = false;

    loop {
        let event = reader.read_event()?;
        if let Some(text) = pending.take() {
            if matches!(event, Event::End(_)) {
                let raw = String::from_utf8_lossy(&text);
                let escaped = escape_edges(&raw);
                writer.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
            } else {
                writer.write_event(Event::Text(text))?;
            }
        }
        match event {
            Event::Eof => break,
            Event::Text(text) if after_start => {
                after_start = false;
                pending = Some(text);
            }
            other => {
                after_start = matches!(other, Event::Start(_));
                writer.write_event(other)?;
            }
        }
    }

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn escape_edges(raw: &str) -> String {
    let is_space = |c: char| matches!(c, ' ' | '\t' | '\r' | '\n');
    let start = raw.len() - raw.trim_start_matches(is_space).len();
    let end = start.max(raw.trim_end_matches(is_space).len());

    let mut out = String::with_capacity(raw.len() + 8);
    let push_refs = |out: &mut String, spaces: &str| {
        for c in spaces.chars() {
            out.push_str(&format!("&#{};", u32::from(c)));
        }
    };
    push_refs(&mut out, &raw[..start]);
    out.push_str(&raw[start..end]);
    push_refs(&mut out, &raw[end..]);
    out
}
