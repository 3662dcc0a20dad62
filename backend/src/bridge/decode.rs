//! Completion decoding
//!
//! Turns the model's completion text into display text plus a rubric
//! snapshot. Missing or non-boolean rubric flags become `false`; a missing
//! reply is an error.

use crate::bridge::error::BridgeError;
use crate::bridge::BridgeReply;
use crate::session::models::{RubricStage, RubricState};
use serde_json::Value;

/// Field holding the in-character reply
pub const MESSAGE_FIELD: &str = "message";

/// Field holding the stage map
pub const RUBRIC_FIELD: &str = "rubric";

/// Remove a surrounding fenced code block (```` ``` ```` or ```` ```json ````), if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop only the info string ("json", "JSON", ...); the body may start on the fence line
    let body = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn parse_object(text: &str) -> Result<Value, BridgeError> {
    let stripped = strip_code_fence(text);
    match serde_json::from_str::<Value>(stripped) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            // Model sometimes wraps the object in prose; try the outermost braces once.
            let (Some(start), Some(end)) = (stripped.find('{'), stripped.rfind('}')) else {
                return Err(BridgeError::Decode(format!(
                    "completion is not JSON: {}",
                    first_err
                )));
            };
            if start >= end {
                return Err(BridgeError::Decode(format!(
                    "completion is not JSON: {}",
                    first_err
                )));
            }
            serde_json::from_str::<Value>(&stripped[start..=end])
                .map_err(|e| BridgeError::Decode(format!("completion is not JSON: {}", e)))
        }
    }
}

/// Read the stage map, coercing anything absent or non-boolean to `false`
pub fn rubric_from_value(value: Option<&Value>) -> RubricState {
    let mut rubric = RubricState::default();
    let Some(map) = value.and_then(Value::as_object) else {
        return rubric;
    };
    for stage in RubricStage::ALL {
        let complete = map
            .get(stage.key())
            .and_then(Value::as_bool)
            .unwrap_or(false);
        rubric.set(stage, complete);
    }
    rubric
}

/// Decode a mid-conversation completion
pub fn decode_turn(text: &str) -> Result<BridgeReply, BridgeError> {
    let value = parse_object(text)?;
    let object = value
        .as_object()
        .ok_or_else(|| BridgeError::Decode("completion is not a JSON object".to_string()))?;

    let display_text = object
        .get(MESSAGE_FIELD)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            BridgeError::Decode(format!("completion has no \"{}\" text", MESSAGE_FIELD))
        })?
        .to_string();

    Ok(BridgeReply {
        display_text,
        rubric_state: rubric_from_value(object.get(RUBRIC_FIELD)),
    })
}

/// Decode a closing completion: plain text, rubric forced complete
pub fn decode_closing(text: &str) -> Result<BridgeReply, BridgeError> {
    let display_text = text.trim();
    if display_text.is_empty() {
        return Err(BridgeError::Decode(
            "closing completion is empty".to_string(),
        ));
    }
    Ok(BridgeReply {
        display_text: display_text.to_string(),
        rubric_state: RubricState::all_complete(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"message": "Fair question.", "rubric": {"S": true, "O": false, "L": true, "V": false, "E": false}}"#;

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```\n"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json {\"a\":1} ```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(
            strip_code_fence("```json {\n\"a\": {\"b\": 1}\n}\n```"),
            "{\n\"a\": {\"b\": 1}\n}"
        );
    }

    #[test]
    fn test_decode_turn_well_formed() {
        let reply = decode_turn(BODY).unwrap();
        assert_eq!(reply.display_text, "Fair question.");
        assert!(reply.rubric_state.get(RubricStage::SpotPain));
        assert!(reply.rubric_state.get(RubricStage::LimitRisk));
        assert_eq!(reply.rubric_state.completed_count(), 2);
    }

    #[test]
    fn test_fenced_decodes_like_unwrapped() {
        let fenced = format!("```json\n{}\n```", BODY);
        assert_eq!(decode_turn(&fenced).unwrap(), decode_turn(BODY).unwrap());

        let inline = format!("```json {} ```", BODY);
        assert_eq!(decode_turn(&inline).unwrap(), decode_turn(BODY).unwrap());

        let pretty = "{\n  \"message\": \"Fine.\",\n  \"rubric\": {\"S\": true}\n}";
        let open_on_fence_line = "```json {\n  \"message\": \"Fine.\",\n  \"rubric\": {\"S\": true}\n}\n```";
        assert_eq!(
            decode_turn(open_on_fence_line).unwrap(),
            decode_turn(pretty).unwrap()
        );
    }

    #[test]
    fn test_rubric_coercion() {
        let reply = decode_turn(
            r#"{"message": "ok", "rubric": {"S": "yes", "O": 1, "V": true, "extra": true}}"#,
        )
        .unwrap();
        assert!(!reply.rubric_state.get(RubricStage::SpotPain));
        assert!(!reply.rubric_state.get(RubricStage::OutlineOutcome));
        assert!(!reply.rubric_state.get(RubricStage::LimitRisk));
        assert!(reply.rubric_state.get(RubricStage::ValuePack));
        assert!(!reply.rubric_state.get(RubricStage::ExecuteCallToAction));

        let no_rubric = decode_turn(r#"{"message": "ok"}"#).unwrap();
        assert_eq!(no_rubric.rubric_state, RubricState::default());

        let bad_rubric = decode_turn(r#"{"message": "ok", "rubric": [true]}"#).unwrap();
        assert_eq!(bad_rubric.rubric_state, RubricState::default());
    }

    #[test]
    fn test_decode_turn_recovers_object_inside_prose() {
        let text = format!("Here you go:\n{}\nHope that helps.", BODY);
        assert_eq!(decode_turn(&text).unwrap().display_text, "Fair question.");
    }

    #[test]
    fn test_decode_turn_rejects_bad_shapes() {
        assert!(matches!(
            decode_turn("just words"),
            Err(BridgeError::Decode(_))
        ));
        assert!(matches!(decode_turn("[1, 2]"), Err(BridgeError::Decode(_))));
        assert!(matches!(
            decode_turn(r#"{"rubric": {"S": true}}"#),
            Err(BridgeError::Decode(_))
        ));
        assert!(matches!(
            decode_turn(r#"{"message": "   "}"#),
            Err(BridgeError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_closing() {
        let reply = decode_closing("  Nice work today.  ").unwrap();
        assert_eq!(reply.display_text, "Nice work today.");
        assert!(reply.rubric_state.is_complete());
        assert!(decode_closing("\n").is_err());
    }
}
