use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Full record returned right after an upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Object key, e.g. `uploads/file-1716899123456-421097.png`
    pub id: String,
    /// Client-supplied filename; not persisted beyond this response
    pub original_name: String,
    pub filename: String,
    pub mimetype: String,
    pub size: u64,
    pub upload_date: DateTime<Utc>,
    /// Static public object URL
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileUploadResponse {
    pub message: String,
    pub file: UploadedFile,
}

/// List-view record, built from the backend's object listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub id: String,
    pub filename: String,
    pub size: u64,
    pub upload_date: Option<DateTime<Utc>>,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileListResponse {
    pub files: Vec<FileInfo>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteFileResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn uploaded_file_serializes_with_camel_case_keys() {
        let file = UploadedFile {
            id: "uploads/file-1-2.png".to_string(),
            original_name: "cat.png".to_string(),
            filename: "uploads/file-1-2.png".to_string(),
            mimetype: "image/png".to_string(),
            size: 42,
            upload_date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            url: "https://b.s3.us-east-1.amazonaws.com/uploads/file-1-2.png".to_string(),
        };

        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["originalName"], "cat.png");
        assert_eq!(value["uploadDate"], "2024-05-01T12:00:00Z");
        assert_eq!(value["id"], "uploads/file-1-2.png");
    }

    #[test]
    fn list_entry_carries_optional_upload_date() {
        let info = FileInfo {
            id: "uploads/file-1-2.pdf".to_string(),
            filename: "uploads/file-1-2.pdf".to_string(),
            size: 10,
            upload_date: None,
            url: "https://b.s3.us-east-1.amazonaws.com/uploads/file-1-2.pdf".to_string(),
        };

        let value = serde_json::to_value(&info).unwrap();
        assert!(value["uploadDate"].is_null());
    }
}
