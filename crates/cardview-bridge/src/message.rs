//! Envelope protocol spoken between the page and the native host.
//!
//! Every message travels as `{"type": ..., "payload": ..., "timestamp": ...}`.
//! The payload shape is fixed by `type`, so decoding goes through
//! [`Message`] rather than an open JSON map.

use cardview_common::{BridgeError, Card};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// The closed set of envelope types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    CardSelected,
    CardAction,
    Navigation,
    Error,
    Ready,
    DataRequest,
    DataResponse,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CardSelected => "CARD_SELECTED",
            Self::CardAction => "CARD_ACTION",
            Self::Navigation => "NAVIGATION",
            Self::Error => "ERROR",
            Self::Ready => "READY",
            Self::DataRequest => "DATA_REQUEST",
            Self::DataResponse => "DATA_RESPONSE",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSelectedPayload {
    pub card_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardActionPayload {
    pub card_id: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationPayload {
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequestPayload {
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataResponsePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
}

/// Serialized as `{}` for READY.
#[derive(Serialize)]
struct EmptyPayload {}

/// A message body, discriminated by its envelope type.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    CardSelected(CardSelectedPayload),
    CardAction(CardActionPayload),
    Navigation(NavigationPayload),
    Error(ErrorPayload),
    Ready,
    DataRequest(DataRequestPayload),
    DataResponse(DataResponsePayload),
}

impl Message {
    pub fn kind(&self) -> MessageType {
        match self {
            Self::CardSelected(_) => MessageType::CardSelected,
            Self::CardAction(_) => MessageType::CardAction,
            Self::Navigation(_) => MessageType::Navigation,
            Self::Error(_) => MessageType::Error,
            Self::Ready => MessageType::Ready,
            Self::DataRequest(_) => MessageType::DataRequest,
            Self::DataResponse(_) => MessageType::DataResponse,
        }
    }

    pub fn card_selected(card_id: impl Into<String>) -> Self {
        Self::CardSelected(CardSelectedPayload {
            card_id: card_id.into(),
        })
    }

    pub fn card_action(card_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self::CardAction(CardActionPayload {
            card_id: card_id.into(),
            action: action.into(),
        })
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self::Error(ErrorPayload {
            error: error.into(),
        })
    }

    pub fn data_request(data_type: impl Into<String>) -> Self {
        Self::DataRequest(DataRequestPayload {
            data_type: data_type.into(),
        })
    }

    /// Decode a raw payload according to `kind`.
    ///
    /// A missing or `null` payload is read as `{}`, so READY and
    /// DATA_RESPONSE accept it while types with required fields reject it.
    pub fn from_parts(kind: MessageType, payload: serde_json::Value) -> Result<Self, BridgeError> {
        let payload = if payload.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            payload
        };

        let mismatch = |e: serde_json::Error| BridgeError::PayloadMismatch {
            kind: kind.to_string(),
            reason: e.to_string(),
        };

        let message = match kind {
            MessageType::CardSelected => {
                Self::CardSelected(serde_json::from_value(payload).map_err(mismatch)?)
            }
            MessageType::CardAction => {
                Self::CardAction(serde_json::from_value(payload).map_err(mismatch)?)
            }
            MessageType::Navigation => {
                Self::Navigation(serde_json::from_value(payload).map_err(mismatch)?)
            }
            MessageType::Error => Self::Error(serde_json::from_value(payload).map_err(mismatch)?),
            MessageType::Ready => Self::Ready,
            MessageType::DataRequest => {
                Self::DataRequest(serde_json::from_value(payload).map_err(mismatch)?)
            }
            MessageType::DataResponse => {
                Self::DataResponse(serde_json::from_value(payload).map_err(mismatch)?)
            }
        };
        Ok(message)
    }
}

/// Wire form used for decoding before the payload is typed.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: MessageType,
    #[serde(default)]
    payload: serde_json::Value,
    #[serde(default)]
    timestamp: i64,
}

/// A typed message plus the time (ms since the Unix epoch) it was sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEnvelope")]
pub struct Envelope {
    pub message: Message,
    pub timestamp: i64,
}

impl Envelope {
    /// Wrap a message, stamping it with the current time.
    pub fn new(message: Message) -> Self {
        Self {
            message,
            timestamp: now_millis(),
        }
    }

    pub fn with_timestamp(message: Message, timestamp: i64) -> Self {
        Self { message, timestamp }
    }

    pub fn kind(&self) -> MessageType {
        self.message.kind()
    }

    /// Parse an envelope from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw).map_err(|e| BridgeError::Parse(e.to_string()))
    }

    /// Parse an envelope from an already-structured value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, BridgeError> {
        serde_json::from_value(value).map_err(|e| BridgeError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, BridgeError> {
        serde_json::to_string(self).map_err(|e| BridgeError::Parse(e.to_string()))
    }
}

impl TryFrom<RawEnvelope> for Envelope {
    type Error = BridgeError;

    fn try_from(raw: RawEnvelope) -> Result<Self, Self::Error> {
        Ok(Self {
            message: Message::from_parts(raw.kind, raw.payload)?,
            timestamp: raw.timestamp,
        })
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 3)?;
        state.serialize_field("type", &self.kind())?;
        match &self.message {
            Message::CardSelected(p) => state.serialize_field("payload", p)?,
            Message::CardAction(p) => state.serialize_field("payload", p)?,
            Message::Navigation(p) => state.serialize_field("payload", p)?,
            Message::Error(p) => state.serialize_field("payload", p)?,
            Message::Ready => state.serialize_field("payload", &EmptyPayload {})?,
            Message::DataRequest(p) => state.serialize_field("payload", p)?,
            Message::DataResponse(p) => state.serialize_field("payload", p)?,
        }
        state.serialize_field("timestamp", &self.timestamp)?;
        state.end()
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_names_are_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&MessageType::DataResponse).unwrap(),
            "\"DATA_RESPONSE\""
        );
        assert_eq!(MessageType::CardSelected.as_str(), "CARD_SELECTED");
        assert_eq!(MessageType::Ready.to_string(), "READY");
    }

    #[test]
    fn card_selected_wire_shape() {
        let env = Envelope::with_timestamp(Message::card_selected("card-003"), 1700000000000);
        let value: serde_json::Value = serde_json::to_value(&env).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "CARD_SELECTED",
                "payload": { "cardId": "card-003" },
                "timestamp": 1700000000000i64
            })
        );
    }

    #[test]
    fn ready_serializes_empty_payload() {
        let env = Envelope::with_timestamp(Message::Ready, 5);
        let json = env.to_json().unwrap();
        assert_eq!(json, r#"{"type":"READY","payload":{},"timestamp":5}"#);
    }

    #[test]
    fn card_action_and_data_request_field_names() {
        let value =
            serde_json::to_value(Envelope::new(Message::card_action("card-001", "block"))).unwrap();
        assert_eq!(value["payload"], json!({ "cardId": "card-001", "action": "block" }));

        let value = serde_json::to_value(Envelope::new(Message::data_request("cards"))).unwrap();
        assert_eq!(value["payload"], json!({ "dataType": "cards" }));

        let value = serde_json::to_value(Envelope::new(Message::error("boom"))).unwrap();
        assert_eq!(value["payload"], json!({ "error": "boom" }));
    }

    #[test]
    fn new_envelope_is_stamped() {
        let before = now_millis();
        let env = Envelope::new(Message::Ready);
        let after = now_millis();
        assert!(env.timestamp >= before && env.timestamp <= after);
    }

    #[test]
    fn parses_data_response_with_cards() {
        let raw = r##"{
            "type": "DATA_RESPONSE",
            "payload": { "cards": [{
                "id": "card-009",
                "lastFourDigits": "0001",
                "cardholderName": "Ana Souza",
                "expirationMonth": 1,
                "expirationYear": 2030,
                "brand": "amex",
                "status": "pending",
                "limit": 1000,
                "availableLimit": 900,
                "isVirtual": false
            }] },
            "timestamp": 42
        }"##;
        let env = Envelope::from_json(raw).unwrap();
        assert_eq!(env.timestamp, 42);
        match env.message {
            Message::DataResponse(DataResponsePayload { cards: Some(cards) }) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].id, "card-009");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn data_response_without_cards() {
        let env = Envelope::from_json(r#"{"type":"DATA_RESPONSE","payload":{},"timestamp":1}"#)
            .unwrap();
        assert_eq!(env.message, Message::DataResponse(DataResponsePayload { cards: None }));
    }

    #[test]
    fn missing_payload_and_timestamp_default() {
        let env = Envelope::from_json(r#"{"type":"READY"}"#).unwrap();
        assert_eq!(env.message, Message::Ready);
        assert_eq!(env.timestamp, 0);
    }

    #[test]
    fn navigation_params_are_optional() {
        let env = Envelope::from_json(
            r#"{"type":"NAVIGATION","payload":{"route":"/invoice","params":{"month":10}},"timestamp":3}"#,
        )
        .unwrap();
        match env.message {
            Message::Navigation(nav) => {
                assert_eq!(nav.route, "/invoice");
                assert_eq!(nav.params.unwrap()["month"], json!(10));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = Envelope::from_json(r#"{"type":"EXEC","payload":{},"timestamp":1}"#).unwrap_err();
        assert!(matches!(err, BridgeError::Parse(_)));
    }

    #[test]
    fn payload_shape_is_enforced() {
        let err = Envelope::from_json(r#"{"type":"CARD_SELECTED","payload":{"id":"x"}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("CARD_SELECTED"));

        assert!(Envelope::from_json(r#"{"type":"CARD_ACTION","payload":null}"#).is_err());
    }

    #[test]
    fn malformed_card_rejects_whole_envelope() {
        let raw = r#"{"type":"DATA_RESPONSE","payload":{"cards":[{"id":"x"}]}}"#;
        assert!(Envelope::from_json(raw).is_err());
    }

    #[test]
    fn from_value_accepts_structured_input() {
        let env = Envelope::from_value(json!({
            "type": "ERROR",
            "payload": { "error": "session expired" },
            "timestamp": 9
        }))
        .unwrap();
        assert_eq!(env.message, Message::error("session expired"));
    }

    #[test]
    fn non_json_text_is_a_parse_error() {
        assert!(matches!(
            Envelope::from_json("definitely not json"),
            Err(BridgeError::Parse(_))
        ));
    }
}
