use serde::Deserialize;
use serde_json::Value;

use crate::error::ReviewError;
use crate::models::{Model, resolve_model};
use crate::personas::{self, Persona};

// Body as it arrives. model and stream are loose: a non-string model falls
// back to the default and stream follows JS truthiness, so only a body that
// does not parse (or has non-string code/persona) is invalid JSON.
#[derive(Deserialize, Debug, Default)]
struct IncomingReview {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    persona: Option<String>,
    #[serde(default)]
    model: Option<Value>,
    #[serde(default)]
    stream: Option<Value>,
}

// A review request that passed every check
#[derive(Debug, Clone)]
pub struct ValidatedReview {
    pub code: String,
    pub persona: &'static Persona,
    pub model: &'static Model,
    pub stream: bool,
}

// Parse and check a raw /review body.
// Order: JSON shape, required fields, persona, code size. Pure, no side effects.
pub fn validate_review(body: &[u8], max_code_chars: usize) -> Result<ValidatedReview, ReviewError> {
    let request: IncomingReview = serde_json::from_slice(body).map_err(ReviewError::InvalidJson)?;

    let code = request.code.filter(|c| !c.is_empty());
    let persona_id = request.persona.filter(|p| !p.is_empty());
    let (Some(code), Some(persona_id)) = (code, persona_id) else {
        return Err(ReviewError::MissingField);
    };

    let persona = personas::find(&persona_id).ok_or(ReviewError::UnknownPersona(persona_id))?;

    if code.chars().count() > max_code_chars {
        return Err(ReviewError::PayloadTooLarge {
            limit: max_code_chars,
        });
    }

    Ok(ValidatedReview {
        code,
        persona,
        model: resolve_model(request.model.as_ref().and_then(Value::as_str)),
        stream: request.stream.as_ref().is_some_and(is_truthy),
    })
}

// false, null, 0, NaN and "" are falsy; everything else is truthy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
