use file_manager_api::{AppConfig, AppState, StorageGateway};
use std::sync::Arc;

/// Build an AppState against dummy credentials.
///
/// The S3 client is constructed offline; tests exercising validation and
/// routing never issue a backend call, so no bucket has to exist.
pub async fn setup_test_app() -> AppState {
    let mut config = AppConfig::default();
    config.storage.access_key_id = "test-access-key".to_string();
    config.storage.secret_access_key = "test-secret-key".to_string();
    config.storage.region = "us-east-1".to_string();
    config.storage.bucket = "test-bucket".to_string();

    let gateway = StorageGateway::new(&config.storage)
        .await
        .expect("Failed to build storage gateway");

    AppState {
        gateway,
        config: Arc::new(config),
    }
}

pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Hand-rolled multipart/form-data body for upload tests
pub fn multipart_body(parts: &[(&str, Option<&str>, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content_type, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", name).as_bytes(),
            ),
        }
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
