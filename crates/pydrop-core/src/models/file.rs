use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored file: blob in the storage backend plus its metadata row.
///
/// `uploaded_at` is assigned by the database on insert, never by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: Uuid,
    pub owner_id: String,
    pub file_name: String,
    pub storage_key: String,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

/// Input for creating a file record after a successful blob write.
/// The id is generated by the orchestrator so the storage key can embed it.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub id: Uuid,
    pub owner_id: String,
    pub file_name: String,
    pub storage_key: String,
    pub size_bytes: i64,
}

/// Public API representation of a stored file (camelCase on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: Uuid,
    pub file_name: String,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<StoredFile> for FileResponse {
    fn from(file: StoredFile) -> Self {
        FileResponse {
            id: file.id,
            file_name: file.file_name,
            size_bytes: file.size_bytes,
            uploaded_at: file.uploaded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_file() -> StoredFile {
        StoredFile {
            id: Uuid::new_v4(),
            owner_id: "user-123".to_string(),
            file_name: "main.py".to_string(),
            storage_key: format!("user-123/{}_main.py", Uuid::new_v4()),
            size_bytes: 42,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_file_response_from_stored_file() {
        let file = stored_file();
        let id = file.id;
        let uploaded_at = file.uploaded_at;

        let response = FileResponse::from(file);

        assert_eq!(response.id, id);
        assert_eq!(response.file_name, "main.py");
        assert_eq!(response.size_bytes, 42);
        assert_eq!(response.uploaded_at, uploaded_at);
    }

    /// The wire contract is camelCase: id, fileName, sizeBytes, uploadedAt.
    #[test]
    fn test_file_response_serializes_camel_case() {
        let response = FileResponse::from(stored_file());
        let json = serde_json::to_value(&response).expect("serialize");

        assert!(json.get("fileName").is_some());
        assert!(json.get("sizeBytes").is_some());
        assert!(json.get("uploadedAt").is_some());
        assert!(json.get("file_name").is_none());
        assert_eq!(json.get("sizeBytes").and_then(|v| v.as_i64()), Some(42));
    }
}
