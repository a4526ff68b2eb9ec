//! Request and analysis data models. Nothing here outlives a request.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;

/// Fallback for any profile field the front end did not fill in.
pub const NOT_SPECIFIED: &str = "No especificado";

/// Wire name of the caller identifier.
pub const CALLER_ID_FIELD: &str = "wp_user_id";

/// A founder's self-description as submitted by the questionnaire.
///
/// Free-text fields are never rejected; absent or blank values become
/// [`NOT_SPECIFIED`]. Only the caller identifier is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FounderProfile {
    pub punto_de_partida: String,
    pub personalidad_fundador: String,
    pub pasiones_fundador: String,
    pub recursos_fundador: String,
    pub estilo_vida_deseado: String,
    pub wp_user_id: String,
}

impl FounderProfile {
    /// Builds a profile from a raw JSON payload.
    ///
    /// Rejects anything that is not a non-empty object, and objects whose
    /// `wp_user_id` is missing, null or blank. Numeric ids are accepted and
    /// normalized to strings.
    pub fn from_payload(payload: &Value) -> Result<Self, AppError> {
        let fields = match payload.as_object() {
            Some(map) if !map.is_empty() => map,
            Some(_) | None => {
                return Err(AppError::Validation("No se recibieron datos".to_string()))
            }
        };

        let wp_user_id = caller_id(fields).ok_or_else(|| {
            AppError::Validation(format!("Falta el identificador de usuario '{CALLER_ID_FIELD}'"))
        })?;

        Ok(FounderProfile {
            punto_de_partida: text_field(fields, "punto_de_partida"),
            personalidad_fundador: text_field(fields, "personalidad_fundador"),
            pasiones_fundador: text_field(fields, "pasiones_fundador"),
            recursos_fundador: text_field(fields, "recursos_fundador"),
            estilo_vida_deseado: text_field(fields, "estilo_vida_deseado"),
            wp_user_id,
        })
    }
}

fn caller_id(fields: &Map<String, Value>) -> Option<String> {
    match fields.get(CALLER_ID_FIELD)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", "),
        _ => NOT_SPECIFIED.to_string(),
    }
}

/// One synthesized business concept.
///
/// Every field is optional: the model does not always comply, and the
/// renderer substitutes placeholders instead of failing the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessIdea {
    #[serde(default, deserialize_with = "lenient_text")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub descripcion: Option<String>,
    /// Ocean colour (blue/red), revenue potential and lifestyle fit.
    #[serde(default, deserialize_with = "lenient_text")]
    pub viabilidad_mercado: Option<String>,
    /// Fit with personality, passions and skills; names one skill to develop.
    #[serde(default, deserialize_with = "lenient_text")]
    pub viabilidad_personal: Option<String>,
    /// Nominally 1–5. Not clamped here; see `render::clamp_rating`.
    #[serde(default, deserialize_with = "lenient_rating")]
    pub calificacion: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub razon_calificacion: Option<String>,
}

impl BusinessIdea {
    /// Names of the fields the model left out.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let text = [
            ("nombre", &self.nombre),
            ("descripcion", &self.descripcion),
            ("viabilidad_mercado", &self.viabilidad_mercado),
            ("viabilidad_personal", &self.viabilidad_personal),
            ("razon_calificacion", &self.razon_calificacion),
        ];
        let mut missing: Vec<&'static str> = text
            .iter()
            .filter(|(_, v)| v.as_deref().map_or(true, |s| s.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();
        if self.calificacion.is_none() {
            missing.push("calificacion");
        }
        missing
    }
}

/// Flattens whatever the model put in a text slot into one line of prose.
/// Nested objects become `clave: valor; ...`, lists are comma-joined.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(flatten_text))
}

fn flatten_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .filter_map(|(k, v)| flatten_text(v).map(|v| format!("{k}: {v}")))
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
    }
}

/// Accepts `4`, `4.4` (rounded) or `"4"`; anything else becomes `None`.
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.round() as i64))
        }
        _ => None,
    })
}

/// Output of the synthesizer: an ordered idea list, or an empty list plus an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ideas: Vec<BusinessIdea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    pub fn failed(message: impl Into<String>) -> Self {
        AnalysisResult {
            ideas: Vec::new(),
            error: Some(message.into()),
        }
    }
}
