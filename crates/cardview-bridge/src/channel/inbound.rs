use cardview_common::BridgeError;

use crate::events::MessageData;
use crate::message::Envelope;

/// Turn raw event data into a typed envelope.
///
/// Text is parsed as JSON; structured data is validated as-is. Either way
/// the payload must match the shape its `type` demands.
pub fn parse_inbound(data: &MessageData) -> Result<Envelope, BridgeError> {
    match data {
        MessageData::Text(raw) => Envelope::from_json(raw),
        MessageData::Structured(value) => Envelope::from_value(value.clone()),
    }
}
