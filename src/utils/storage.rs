use crate::types::StorageContext;
use axum_typed_multipart::FieldData;
use std::path::Path;
use tempfile::NamedTempFile;
use ulid::Ulid;

#[derive(Debug)]
pub enum Error {
    SaveFailed,
}

pub const CV_FOLDER: &str = "cvs";
pub const PHOTO_FOLDER: &str = "photos";

/// Keeps only the final path component and the characters that are safe in a URL.
pub fn sanitize_file_name(raw: &str) -> String {
    let base = Path::new(raw)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    let cleaned = base
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect::<String>();

    match cleaned.trim_matches('.') {
        "" => String::from("file"),
        name => name.to_string(),
    }
}

/// Copies an uploaded temp file into `<uploads_dir>/<folder>/` and returns its public path.
pub async fn save(
    storage: &StorageContext,
    folder: &str,
    file: &FieldData<NamedTempFile>,
) -> Result<String, Error> {
    let original_name = file.metadata.file_name.clone().unwrap_or_default();
    let file_name = format!("{}_{}", Ulid::new(), sanitize_file_name(&original_name));
    let dir = storage.uploads_dir.join(folder);

    tokio::fs::create_dir_all(&dir).await.map_err(|err| {
        tracing::error!("Failed to create upload folder {:?}: {}", dir, err);
        Error::SaveFailed
    })?;

    tokio::fs::copy(file.contents.path(), dir.join(&file_name))
        .await
        .map_err(|err| {
            tracing::error!("Failed to save uploaded file {}: {}", file_name, err);
            Error::SaveFailed
        })?;

    Ok(format!("/{}/{}", folder, file_name))
}

/// Deletes a file previously returned by `save`. Failures are only logged.
pub async fn remove(storage: &StorageContext, public_path: &str) {
    let relative = Path::new(public_path.trim_start_matches('/'));
    if relative
        .components()
        .any(|component| !matches!(component, std::path::Component::Normal(_)))
    {
        tracing::warn!("Refusing to remove upload outside storage: {}", public_path);
        return;
    }

    if let Err(err) = tokio::fs::remove_file(storage.uploads_dir.join(relative)).await {
        tracing::warn!("Failed to remove upload {}: {}", public_path, err);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum_typed_multipart::FieldMetadata;
    use std::io::Write;

    #[test]
    fn strips_directories_and_unsafe_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("mon cv (final).pdf"), "mon_cv__final_.pdf");
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name(".."), "file");
    }

    #[tokio::test]
    async fn saves_upload_under_folder() {
        let root = tempfile::tempdir().unwrap();
        let storage = StorageContext {
            uploads_dir: root.path().to_path_buf(),
        };

        let mut contents = NamedTempFile::new().unwrap();
        contents.write_all(b"%PDF-1.4").unwrap();

        let mut metadata = FieldMetadata::default();
        metadata.file_name = Some("cv.pdf".to_string());
        let field = FieldData { metadata, contents };

        let public_path = save(&storage, CV_FOLDER, &field).await.unwrap();

        assert!(public_path.starts_with("/cvs/"));
        assert!(public_path.ends_with("_cv.pdf"));

        let stored = root.path().join(public_path.trim_start_matches('/'));
        assert_eq!(std::fs::read(stored).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn removes_saved_uploads_only_inside_storage() {
        let root = tempfile::tempdir().unwrap();
        let storage = StorageContext {
            uploads_dir: root.path().join("uploads"),
        };
        let outside = root.path().join("keep.txt");
        std::fs::write(&outside, b"keep").unwrap();

        let field = FieldData {
            metadata: FieldMetadata::default(),
            contents: NamedTempFile::new().unwrap(),
        };
        let public_path = save(&storage, PHOTO_FOLDER, &field).await.unwrap();
        let stored = storage.uploads_dir.join(public_path.trim_start_matches('/'));
        assert!(stored.exists());

        remove(&storage, &public_path).await;
        assert!(!stored.exists());

        remove(&storage, "/../keep.txt").await;
        assert!(outside.exists());
    }
}
