//! Generic XML reader that projects a document onto a JSON value.
//!
//! Element local names become keys (namespace prefixes are dropped),
//! attributes become `@name` entries, text next to attributes or children
//! becomes `$text`, and repeated children collapse into arrays. An element
//! with only text projects to a plain string.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::{RelayError, Result};

pub const TEXT_KEY: &str = "$text";

struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn finish(self) -> (String, Value) {
        let text = self.text.trim();
        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, Value::String(text.to_string()));
        }
        let mut object = self.attributes;
        for (key, value) in self.children {
            object.insert(key, value);
        }
        if !text.is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
        (self.name, Value::Object(object))
    }
}

fn attach(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

fn open_frame(reader: &Reader<&[u8]>, e: &quick_xml::events::BytesStart<'_>) -> Result<Frame> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut attributes = Map::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let local = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.decode_and_unescape_value(reader.decoder())?;
        attributes.insert(format!("@{}", local), Value::String(value.into_owned()));
    }
    Ok(Frame {
        name,
        attributes,
        children: Map::new(),
        text: String::new(),
    })
}

/// Parse `xml` and return `{RootLocalName: content}`.
///
/// Anything after the first root element is ignored.
pub fn xml_to_json(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let frame = open_frame(&reader, &e)?;
                stack.push(frame);
            }
            Event::Empty(e) => {
                let (name, value) = open_frame(&reader, &e)?.finish();
                match stack.last_mut() {
                    Some(parent) => attach(&mut parent.children, name, value),
                    None => return Ok(single(name, value)),
                }
            }
            Event::End(_) => {
                let Some(frame) = stack.pop() else {
                    return Err(RelayError::MissingField("root element".to_string()));
                };
                let (name, value) = frame.finish();
                match stack.last_mut() {
                    Some(parent) => attach(&mut parent.children, name, value),
                    None => return Ok(single(name, value)),
                }
            }
            Event::Text(t) => {
                if let Some(frame) = stack.last_mut() {
                    let text = t.decode().map_err(quick_xml::Error::from)?;
                    frame.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some(frame) = stack.last_mut() {
                    let text = c.decode().map_err(quick_xml::Error::from)?;
                    frame.text.push_str(&text);
                }
            }
            Event::GeneralRef(r) => {
                if let Some(frame) = stack.last_mut() {
                    if let Some(ch) = r.resolve_char_ref()? {
                        frame.text.push(ch);
                    } else {
                        let name = r.decode().map_err(quick_xml::Error::from)?;
                        match quick_xml::escape::resolve_predefined_entity(&name) {
                            Some(resolved) => frame.text.push_str(resolved),
                            None => {
                                return Err(RelayError::invalid_field("entity", name.into_owned()))
                            }
                        }
                    }
                }
            }
            Event::Eof => {
                return Err(RelayError::MissingField("root element".to_string()));
            }
            _ => {}
        }
    }
}

fn single(name: String, value: Value) -> Value {
    let mut root = Map::new();
    root.insert(name, value);
    Value::Object(root)
}

/// View a projected child that may occur once or many times as a slice-like list
pub fn one_or_many(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
        None => Vec::new(),
    }
}

/// Text content of a projected element, if it has any
pub fn text_of(value: &Value) -> Option<&str> {
    let text = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get(TEXT_KEY)?.as_str()?,
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Text of the first occurrence of `key` beneath `value`, searching depth first
pub fn find_text<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    match value {
        Value::Object(map) => {
            if let Some(found) = map.get(key) {
                if let Some(text) = one_or_many(Some(found)).into_iter().find_map(text_of) {
                    return Some(text);
                }
            }
            map.values().find_map(|child| find_text(child, key))
        }
        Value::Array(items) => items.iter().find_map(|item| find_text(item, key)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection_drops_prefixes_and_namespaces() {
        let xml = r#"<?xml version="1.0"?>
            <ns1:Flight xmlns:ns1="urn:x" Kind="pax">
                <ns1:Code>KL</ns1:Code>
                <ns1:Gate>C5</ns1:Gate>
                <ns1:Gate>C7</ns1:Gate>
                <ns1:Empty/>
            </ns1:Flight>"#;
        let value = xml_to_json(xml).unwrap();
        assert_eq!(
            value,
            json!({"Flight": {"@Kind": "pax", "Code": "KL", "Gate": ["C5", "C7"], "Empty": ""}})
        );
    }

    #[test]
    fn test_text_next_to_attributes() {
        let value = xml_to_json(r#"<Airline CodeContext="3">AF &amp; KL</Airline>"#).unwrap();
        assert_eq!(value, json!({"Airline": {"@CodeContext": "3", "$text": "AF & KL"}}));
        assert_eq!(text_of(&value["Airline"]), Some("AF & KL"));
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        assert!(xml_to_json("<a><b></a>").is_err());
        assert!(xml_to_json("").is_err());
        assert!(xml_to_json("<a>").is_err());
    }

    #[test]
    fn test_find_text_searches_nested() {
        let value = xml_to_json("<H><wsa:Action>x</wsa:Action><Inner><MessageID>urn:1-2</MessageID></Inner></H>")
            .unwrap();
        assert_eq!(find_text(&value, "MessageID"), Some("urn:1-2"));
        assert_eq!(find_text(&value, "RelatesTo"), None);
    }

    #[test]
    fn test_one_or_many() {
        let value = json!({"a": [1, 2], "b": 3});
        assert_eq!(one_or_many(value.get("a")).len(), 2);
        assert_eq!(one_or_many(value.get("b")).len(), 1);
        assert!(one_or_many(value.get("c")).is_empty());
    }
}
