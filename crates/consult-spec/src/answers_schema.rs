use serde_json::{Map, Value, json};

use crate::spec::{QuestionKind, QuestionnaireSpec};

/// JSON Schema describing the answers document of a questionnaire.
///
/// Only group fields flagged `required` are required; every other control may
/// be left unset.
pub fn generate(spec: &QuestionnaireSpec) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for question in &spec.questions {
        let schema = match &question.kind {
            QuestionKind::Select { options } | QuestionKind::Radio { options } => json!({
                "type": ["string", "null"],
                "enum": options.iter().map(|option| Value::String(option.clone()))
                    .chain(std::iter::once(Value::Null))
                    .collect::<Vec<_>>(),
            }),
            QuestionKind::Checkbox { options } => json!({
                "type": "array",
                "items": { "type": "string", "enum": options },
                "uniqueItems": true,
            }),
            QuestionKind::Textarea { .. } => json!({ "type": "string" }),
            QuestionKind::Group { fields } => {
                let mut field_properties = Map::new();
                let mut field_required = Vec::new();
                for field in fields {
                    let mut field_schema = json!({ "type": "string" });
                    if field.required {
                        field_schema["minLength"] = json!(1);
                        field_required.push(Value::String(field.id.clone()));
                    }
                    field_properties.insert(field.id.clone(), field_schema);
                }
                if !field_required.is_empty() {
                    required.push(Value::String(question.id.clone()));
                }
                json!({
                    "type": "object",
                    "properties": field_properties,
                    "required": field_required,
                    "additionalProperties": false,
                })
            }
        };

        let mut schema = schema;
        schema["title"] = Value::String(question.label.clone());
        properties.insert(question.id.clone(), schema);
    }

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": spec.title,
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// JSON Schema of the questionnaire definition itself.
pub fn spec_schema() -> Result<Value, serde_json::Error> {
    serde_json::to_value(schemars::schema_for!(QuestionnaireSpec))
}
