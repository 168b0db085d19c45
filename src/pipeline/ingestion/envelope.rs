use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::domain::MessageHeader;
use crate::error::{RelayError, Result};
use crate::pipeline::processing::parser::{find_text, xml_to_json};

/// Body and header content of a SOAP envelope, as raw XML text
#[derive(Debug, Clone, PartialEq)]
pub struct SoapParts {
    pub body: String,
    pub header: Option<String>,
}

/// Split a SOAP envelope into its body and header content.
///
/// Fails with `MissingBody` when the message is not an envelope or its body
/// has no element children.
pub fn split_envelope(message: &str) -> Result<SoapParts> {
    let mut reader = Reader::from_str(message);
    let mut depth = 0usize;
    let mut body: Option<String> = None;
    let mut header: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let local = e.local_name();
                if depth == 0 {
                    if local.as_ref() != b"Envelope" {
                        debug!("Root element is not a SOAP envelope");
                        return Err(RelayError::MissingBody);
                    }
                    depth = 1;
                } else if depth == 1 && local.as_ref() == b"Body" {
                    body = Some(reader.read_text(e.name())?.trim().to_string());
                } else if depth == 1 && local.as_ref() == b"Header" {
                    header = Some(reader.read_text(e.name())?.trim().to_string());
                } else {
                    depth += 1;
                }
            }
            Event::Empty(e) if depth == 0 => {
                if e.local_name().as_ref() != b"Envelope" {
                    return Err(RelayError::MissingBody);
                }
                break;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match body {
        Some(body) if has_element(&body) => Ok(SoapParts {
            body,
            header: header.filter(|h| !h.is_empty()),
        }),
        _ => Err(RelayError::MissingBody),
    }
}

fn has_element(content: &str) -> bool {
    let mut reader = Reader::from_str(content);
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) | Ok(Event::Empty(_)) => return true,
            Ok(Event::Eof) => return false,
            // Let the event parser report malformed markup
            Err(_) => return true,
            Ok(_) => {}
        }
    }
}

/// Read the correlation header. Unparsable headers are logged and ignored.
pub fn parse_header(header: &str) -> Option<MessageHeader> {
    let wrapped = format!("<SoapHeader>\n{}</SoapHeader>", header);
    match xml_to_json(&wrapped) {
        Ok(value) => Some(MessageHeader {
            message_id: find_text(&value, "MessageID").map(str::to_string),
        }),
        Err(e) => {
            warn!("Error while parsing SOAP header: {}", e);
            None
        }
    }
}
