use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

use crate::errors::ApiError;

/// An uploaded file.
#[derive(Debug, Clone)]
pub struct FileData {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub enum FieldValue {
    Value(Value),
    Files(Vec<FileData>),
}

/// An ordered request payload. Sent as multipart when it holds any file,
/// as a JSON object otherwise.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: Vec<(String, FieldValue)>,
}

/// A payload ready to attach to a request.
pub enum EncodedBody {
    Json(Value),
    Multipart(Form),
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields
            .push((key.to_string(), FieldValue::Value(value.into())));
        self
    }

    pub fn file(self, key: &str, file: FileData) -> Self {
        self.files(key, vec![file])
    }

    pub fn files(mut self, key: &str, files: Vec<FileData>) -> Self {
        self.fields.push((key.to_string(), FieldValue::Files(files)));
        self
    }

    pub fn has_files(&self) -> bool {
        self.fields
            .iter()
            .any(|(_, value)| matches!(value, FieldValue::Files(_)))
    }

    pub fn encode(self) -> Result<EncodedBody, ApiError> {
        if !self.has_files() {
            let object: Map<String, Value> = self
                .fields
                .into_iter()
                .filter_map(|(key, value)| match value {
                    FieldValue::Value(v) => Some((key, v)),
                    FieldValue::Files(_) => None,
                })
                .collect();
            return Ok(EncodedBody::Json(Value::Object(object)));
        }

        let mut form = Form::new();
        for (key, value) in self.fields {
            match value {
                FieldValue::Value(Value::String(s)) => form = form.text(key, s),
                FieldValue::Value(other) => form = form.text(key, other.to_string()),
                FieldValue::Files(files) => {
                    let keys = file_keys(&key, files.len());
                    for (name, file) in keys.into_iter().zip(files) {
                        form = form.part(name, file_part(file)?);
                    }
                }
            }
        }
        Ok(EncodedBody::Multipart(form))
    }
}

/// A single file goes under its own key; several become `key_0`, `key_1`, ...
fn file_keys(key: &str, count: usize) -> Vec<String> {
    if count == 1 {
        return vec![key.to_string()];
    }
    (0..count).map(|index| format!("{}_{}", key, index)).collect()
}

fn file_part(file: FileData) -> Result<Part, ApiError> {
    Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.content_type)
        .map_err(|e| ApiError::Request(format!("invalid content type: {}", e)))
}
