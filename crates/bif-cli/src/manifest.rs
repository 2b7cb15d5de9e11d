/// JSON manifest shared by `bif encode` (input) and `bif decode --json`
/// (output), so a decoded buffer can be edited and re-encoded.
///
/// ```json
/// {
///   "fields": [
///     { "type": "blob", "name": "name", "content": "Johnny" },
///     { "type": "blob", "name": "raw",  "content_hex": "00ff" },
///     { "type": "blob", "name": "bio",  "content_file": "bio.txt" },
///     { "type": "int",  "name": "age",  "value": 32 }
///   ],
///   "omit_final_newline": true
/// }
/// ```
use bif_types::{Field, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub fields: Vec<ManifestField>,

    /// Leave the `\n` off a trailing int field.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub omit_final_newline: bool,
}

/// One field entry. Blobs take exactly one of `content` (UTF-8 text),
/// `content_hex`, or `content_file` (relative to the manifest).
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ManifestField {
    Blob {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_hex: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_file: Option<String>,
    },
    Int {
        name: String,
        value: i64,
    },
}

impl Manifest {
    /// Describe `record` in insertion order. Blob bodies that are valid
    /// UTF-8 become `content`; anything else becomes `content_hex`.
    pub fn from_record(record: &Record) -> Self {
        let fields = record
            .iter()
            .map(|field| match field {
                Field::Blob(blob) => {
                    let (content, content_hex) = match blob.as_str() {
                        Ok(text) => (Some(text.to_string()), None),
                        Err(_) => (None, Some(hex::encode(&blob.bytes))),
                    };
                    ManifestField::Blob {
                        name: blob.name.clone(),
                        content,
                        content_hex,
                        content_file: None,
                    }
                }
                Field::Int(int) => ManifestField::Int {
                    name: int.name.clone(),
                    value: int.value,
                },
            })
            .collect();
        Self {
            fields,
            omit_final_newline: false,
        }
    }
}
