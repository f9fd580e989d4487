//! Schema - Declared shapes for flow inputs and outputs
//!
//! A [`Schema`] is an ordered list of required fields. Text fields must be
//! non-blank strings, enum fields one of a fixed set of literals, and object
//! fields recurse. Validation never coerces or fills defaults: the first
//! unsatisfied field is reported and the value is rejected.
//!
//! Field descriptions are not used for validation. They are forwarded to the
//! generation service as hints alongside the response shape.

use serde_json::Value;

use crate::domain::errors::SchemaViolation;

/// Type of a declared field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Non-blank string
    Text,
    /// One of the listed string literals
    Enum(&'static [&'static str]),
    /// Nested object with its own schema
    Object(Schema),
}

impl FieldKind {
    fn expected(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Enum(_) => "string",
            FieldKind::Object(_) => "object",
        }
    }
}

/// A single required field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

/// Declared shape of a JSON object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required non-blank text field
    pub fn text(mut self, name: &'static str, description: &'static str) -> Self {
        self.fields.push(FieldSpec {
            name,
            kind: FieldKind::Text,
            description,
        });
        self
    }

    /// Add a required field restricted to `allowed`
    pub fn enumeration(
        mut self,
        name: &'static str,
        allowed: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        self.fields.push(FieldSpec {
            name,
            kind: FieldKind::Enum(allowed),
            description,
        });
        self
    }

    /// Add a required nested object
    pub fn object(mut self, name: &'static str, schema: Schema, description: &'static str) -> Self {
        self.fields.push(FieldSpec {
            name,
            kind: FieldKind::Object(schema),
            description,
        });
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Check `value` field by field, in declaration order
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at(value, None)
    }

    fn validate_at(&self, value: &Value, prefix: Option<&str>) -> Result<(), SchemaViolation> {
        let object = value.as_object().ok_or_else(|| SchemaViolation::NotAnObject {
            path: prefix.unwrap_or("$").to_string(),
        })?;

        for spec in &self.fields {
            let path = match prefix {
                Some(p) => format!("{}.{}", p, spec.name),
                None => spec.name.to_string(),
            };

            let field = match object.get(spec.name) {
                Some(Value::Null) | None => return Err(SchemaViolation::Missing { field: path }),
                Some(v) => v,
            };

            match &spec.kind {
                FieldKind::Text => {
                    let text = field.as_str().ok_or_else(|| SchemaViolation::WrongType {
                        field: path.clone(),
                        expected: spec.kind.expected(),
                    })?;
                    if text.trim().is_empty() {
                        return Err(SchemaViolation::Empty { field: path });
                    }
                }
                FieldKind::Enum(allowed) => {
                    let text = field.as_str().ok_or_else(|| SchemaViolation::WrongType {
                        field: path.clone(),
                        expected: spec.kind.expected(),
                    })?;
                    if !allowed.iter().any(|a| *a == text) {
                        return Err(SchemaViolation::NotAllowed {
                            field: path,
                            allowed: allowed.join(", "),
                            actual: text.to_string(),
                        });
                    }
                }
                FieldKind::Object(inner) => {
                    if !field.is_object() {
                        return Err(SchemaViolation::WrongType {
                            field: path,
                            expected: spec.kind.expected(),
                        });
                    }
                    inner.validate_at(field, Some(&path))?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outline_schema() -> Schema {
        Schema::new()
            .text("characters", "Main characters")
            .text("setting", "Setting")
            .text("plot", "Plot")
            .text("moral", "Moral")
    }

    fn idea_schema() -> Schema {
        Schema::new()
            .text("storyIdeaChinese", "Idea in Traditional Chinese")
            .enumeration("language", &["en", "zh"], "Language")
            .object("outline", outline_schema(), "Outline")
    }

    #[test]
    fn test_conforming_value_passes() {
        let value = json!({
            "storyIdeaChinese": "一隻勇敢的小龍",
            "language": "zh",
            "outline": {"characters": "Leo", "setting": "castle", "plot": "lost", "moral": "courage"},
            "extra": 42
        });
        assert!(idea_schema().validate(&value).is_ok());
    }

    #[test]
    fn test_missing_field_is_named() {
        let value = json!({"language": "en", "outline": {}});
        let err = idea_schema().validate(&value).unwrap_err();
        assert_eq!(err, SchemaViolation::Missing { field: "storyIdeaChinese".into() });
    }

    #[test]
    fn test_null_counts_as_missing() {
        let value = json!({"storyIdeaChinese": null});
        let err = idea_schema().validate(&value).unwrap_err();
        assert_eq!(err.field(), "storyIdeaChinese");
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let value = json!({"storyIdeaChinese": "   ", "language": "en"});
        let err = idea_schema().validate(&value).unwrap_err();
        assert_eq!(err, SchemaViolation::Empty { field: "storyIdeaChinese".into() });
    }

    #[test]
    fn test_enum_outside_allowed_set() {
        let value = json!({"storyIdeaChinese": "idea", "language": "fr"});
        let err = idea_schema().validate(&value).unwrap_err();
        assert!(matches!(err, SchemaViolation::NotAllowed { ref actual, .. } if actual == "fr"));
    }

    #[test]
    fn test_nested_field_uses_dotted_path() {
        let value = json!({
            "storyIdeaChinese": "idea",
            "language": "en",
            "outline": {"characters": "Leo", "setting": "forest", "plot": "sun vanished"}
        });
        let err = idea_schema().validate(&value).unwrap_err();
        assert_eq!(err.field(), "outline.moral");
    }

    #[test]
    fn test_wrong_types() {
        let err = idea_schema()
            .validate(&json!({"storyIdeaChinese": 7}))
            .unwrap_err();
        assert!(matches!(err, SchemaViolation::WrongType { expected: "string", .. }));

        let err = idea_schema()
            .validate(&json!({"storyIdeaChinese": "x", "language": "en", "outline": "text"}))
            .unwrap_err();
        assert!(matches!(err, SchemaViolation::WrongType { expected: "object", .. }));

        let err = idea_schema().validate(&json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(err, SchemaViolation::NotAnObject { path: "$".into() });
    }
}
