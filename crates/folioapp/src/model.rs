//! # Data Model
//!
//! Three types carry the whole subsystem:
//!
//! - [`Field`]: one input, its declared constraints and its current UI state.
//! - [`Form`]: an ordered collection of fields (document order matters for focus).
//! - [`Draft`]: the persisted snapshot of a form's values.
//!
//! Validity is session state. It is recomputed every time a form is rendered
//! and never written to storage; only a field's `value` survives a reload.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{FolioError, Result};

/// Prefix for every draft record in the key-value store.
pub const DRAFT_KEY_PREFIX: &str = "draft-";

/// Declared input kind. Anything that is not an email, URL or file input
/// (textareas, selects, plain inputs) is `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Url,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    #[default]
    Unvalidated,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub value: String,
    #[serde(skip)]
    pub validity: Validity,
    #[serde(skip)]
    pub error: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            value: String::new(),
            validity: Validity::Unvalidated,
            error: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email)
    }

    pub fn url(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Url)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::File)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn is_file(&self) -> bool {
        self.kind == FieldKind::File
    }

    pub fn is_invalid(&self) -> bool {
        self.validity == Validity::Invalid
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    #[serde(default = "generated_form_id")]
    pub id: String,
    #[serde(default)]
    pub autosave: bool,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Forms rendered without an identifier still get one, but it changes on every
/// render, so their drafts are never found again.
fn generated_form_id() -> String {
    format!("form-{}", Utc::now().timestamp_millis())
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            autosave: false,
            fields: Vec::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(generated_form_id())
    }

    pub fn with_autosave(mut self) -> Self {
        self.autosave = true;
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub(crate) fn require_field_mut(&mut self, name: &str) -> Result<&mut Field> {
        let form = self.id.clone();
        self.field_mut(name)
            .ok_or_else(|| FolioError::FieldNotFound {
                form,
                field: name.to_string(),
            })
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.value.as_str())
    }

    /// Current name → value pairs, file inputs excluded.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter(|f| !f.is_file())
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}

/// Saved snapshot of one form. Serialized as a flat JSON object, no envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub form_id: String,
    pub values: BTreeMap<String, String>,
}

impl Draft {
    pub fn from_form(form: &Form) -> Self {
        Self {
            form_id: form.id.clone(),
            values: form.values(),
        }
    }

    pub fn key(&self) -> String {
        draft_key(&self.form_id)
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.values)?)
    }

    /// Decodes a stored record.
    ///
    /// The top level must be a JSON object. Numbers and booleans become their
    /// textual form (inputs only ever hold strings); nulls, arrays and nested
    /// objects are dropped.
    pub fn decode(form_id: &str, raw: &str) -> Result<Self> {
        let parsed: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| FolioError::DraftDecode {
                key: draft_key(form_id),
                reason: e.to_string(),
            })?;

        let serde_json::Value::Object(map) = parsed else {
            return Err(FolioError::DraftDecode {
                key: draft_key(form_id),
                reason: "expected a JSON object".to_string(),
            });
        };

        let values = map
            .into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::String(s) => Some((name, s)),
                serde_json::Value::Number(n) => Some((name, n.to_string())),
                serde_json::Value::Bool(b) => Some((name, b.to_string())),
                _ => None,
            })
            .collect();

        Ok(Self {
            form_id: form_id.to_string(),
            values,
        })
    }

    /// Copies stored values into matching non-file fields.
    /// Returns how many fields were assigned.
    pub fn apply_to(&self, form: &mut Form) -> usize {
        let mut applied = 0;
        for (name, value) in &self.values {
            if let Some(field) = form.field_mut(name) {
                if !field.is_file() {
                    field.value = value.clone();
                    applied += 1;
                }
            }
        }
        applied
    }
}

pub fn draft_key(form_id: &str) -> String {
    format!("{}{}", DRAFT_KEY_PREFIX, form_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_form() -> Form {
        Form::new("contact")
            .with_field(Field::text("name").with_value("Ana"))
            .with_field(Field::email("email").with_value("ana@example.com"))
            .with_field(Field::file("avatar").with_value("C:\\fakepath\\me.png"))
    }

    #[test]
    fn values_skip_file_inputs() {
        let values = contact_form().values();
        assert_eq!(values.len(), 2);
        assert_eq!(values["name"], "Ana");
        assert!(!values.contains_key("avatar"));
    }

    #[test]
    fn draft_key_uses_prefix() {
        assert_eq!(draft_key("contact"), "draft-contact");
        assert_eq!(Draft::from_form(&contact_form()).key(), "draft-contact");
    }

    #[test]
    fn encode_is_a_flat_object() {
        let encoded = Draft::from_form(&contact_form()).encode().unwrap();
        assert_eq!(encoded, r#"{"email":"ana@example.com","name":"Ana"}"#);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            Draft::decode("contact", "{\"name\": \"An"),
            Err(FolioError::DraftDecode { .. })
        ));
        assert!(matches!(
            Draft::decode("contact", "[1, 2]"),
            Err(FolioError::DraftDecode { .. })
        ));
    }

    #[test]
    fn decode_coerces_scalars_and_drops_nested() {
        let draft =
            Draft::decode("contact", r#"{"age": 42, "ok": true, "tags": ["a"], "x": null}"#)
                .unwrap();
        assert_eq!(draft.values.len(), 2);
        assert_eq!(draft.values["age"], "42");
        assert_eq!(draft.values["ok"], "true");
    }

    #[test]
    fn apply_ignores_unknown_keys_and_files() {
        let mut form = contact_form();
        let draft = Draft::decode(
            "contact",
            r#"{"name": "Bia", "avatar": "evil.png", "removed_field": "x"}"#,
        )
        .unwrap();

        let applied = draft.apply_to(&mut form);
        assert_eq!(applied, 1);
        assert_eq!(form.value("name"), Some("Bia"));
        assert_eq!(form.value("email"), Some("ana@example.com"));
        assert_eq!(form.value("avatar"), Some("C:\\fakepath\\me.png"));
    }

    #[test]
    fn form_without_id_gets_generated_one() {
        let form: Form = serde_json::from_str(r#"{"fields": []}"#).unwrap();
        assert!(form.id.starts_with("form-"));
        assert!(Form::anonymous().id.starts_with("form-"));
    }

    #[test]
    fn field_state_is_not_deserialized() {
        let field: Field =
            serde_json::from_str(r#"{"name": "email", "kind": "email", "required": true}"#)
                .unwrap();
        assert_eq!(field.validity, Validity::Unvalidated);
        assert!(field.error.is_none());
        assert!(field.value.is_empty());
    }
}
