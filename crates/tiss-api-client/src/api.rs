//! Domain methods for the storage gateway client.

use bytes::Bytes;
use tiss_core::models::{ListResponse, PresignedUploadGrant, PresignedUploadRequest, UploadMetadata};
use tiss_core::AppError;
use validator::Validate;

use crate::upload::LocalFile;
use crate::{journey, ApiClient};

/// Upper bound on pages fetched by [`ApiClient::list_all_files`].
pub const MAX_LIST_PAGES: usize = 100;

/// Percent-encode each path segment of a key, keeping the slashes.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl ApiClient {
    /// List the first page of objects in the bucket.
    ///
    /// Pagination markers are returned untouched; following them is up to the
    /// caller (see [`ApiClient::list_all_files`]).
    #[tracing::instrument(skip(self), fields(bucket = %self.bucket_name()))]
    pub async fn list_files(&self) -> Result<ListResponse, AppError> {
        self.list_page(None).await
    }

    /// List one page, starting after `marker` when given.
    pub async fn list_page(&self, marker: Option<&str>) -> Result<ListResponse, AppError> {
        let mut query = vec![("bucket_name", self.bucket_name().to_string())];
        if let Some(m) = marker {
            query.push(("marker", m.to_string()));
        }

        let page: ListResponse = self.get("/list", &query, journey::LIST_FILES).await?;
        tracing::debug!(
            objects = page.objects.len(),
            is_truncated = page.is_truncated,
            "Listed bucket page"
        );
        Ok(page)
    }

    /// List every page by following `next_marker` while the listing is truncated.
    ///
    /// Stops after [`MAX_LIST_PAGES`]; the returned listing then keeps
    /// `is_truncated` and the marker of the first page not fetched.
    #[tracing::instrument(skip(self), fields(bucket = %self.bucket_name()))]
    pub async fn list_all_files(&self) -> Result<ListResponse, AppError> {
        let mut combined = self.list_page(None).await?;
        let mut pages = 1;

        while let Some(marker) = combined.continuation().map(str::to_string) {
            if pages >= MAX_LIST_PAGES {
                tracing::warn!(pages, "Stopped following bucket pagination at page limit");
                return Ok(combined);
            }

            let page = self.list_page(Some(&marker)).await?;
            pages += 1;

            if page.continuation() == Some(marker.as_str()) {
                tracing::warn!(marker = %marker, "Gateway repeated pagination marker; stopping");
                combined.objects.extend(page.objects);
                combined.is_truncated = false;
                combined.next_marker = None;
                break;
            }

            combined.objects.extend(page.objects);
            combined.is_truncated = page.is_truncated;
            combined.next_marker = page.next_marker;
        }

        tracing::info!(
            objects = combined.objects.len(),
            pages,
            "Listed all bucket pages"
        );
        Ok(combined)
    }

    /// Download URL for a key. Pure string template, no request is made.
    pub fn download_url(&self, key: &str) -> String {
        self.build_url(&format!(
            "/download/{}/{}",
            urlencoding::encode(self.bucket_name()),
            encode_key(key)
        ))
    }

    /// Download an object's contents.
    #[tracing::instrument(skip(self))]
    pub async fn download_file(&self, key: &str) -> Result<Bytes, AppError> {
        let url = self.download_url(key);
        let data = self.get_bytes(&url, journey::DOWNLOAD_FILE).await?;
        tracing::info!(bytes = data.len(), "Downloaded object");
        Ok(data)
    }

    /// Presigned URL request for a local file, using the client's upload options.
    pub fn presigned_request_for(&self, file: &LocalFile) -> PresignedUploadRequest {
        let options = self.upload_options();
        PresignedUploadRequest {
            bucket_name: self.bucket_name().to_string(),
            key: file.name.clone(),
            content_type: file.content_type.clone(),
            expires: options.expires_secs,
            metadata: UploadMetadata {
                department: options.department.clone(),
                author: options.author.clone(),
                version: options.version.clone(),
            },
        }
    }

    /// Ask the gateway for a presigned upload URL.
    #[tracing::instrument(skip(self, request), fields(key = %request.key))]
    pub async fn request_presigned_url(
        &self,
        request: &PresignedUploadRequest,
    ) -> Result<PresignedUploadGrant, AppError> {
        request.validate()?;

        let grant: PresignedUploadGrant = self
            .post_json("/presigned-url", request, journey::PRESIGNED_URL)
            .await?;

        if grant.upload_url.trim().is_empty() {
            return Err(AppError::InvalidResponse(
                "Presigned URL response has an empty upload_url".to_string(),
            ));
        }

        tracing::debug!(key = %grant.key, expires_at = ?grant.expires_at, "Presigned URL granted");
        Ok(grant)
    }

    /// Upload a file directly to storage.
    ///
    /// The file is checked against the upload policy first. Then a presigned
    /// URL is requested and the raw bytes are PUT to it. If either check or
    /// the URL request fails, no PUT is attempted. Success requires HTTP 200
    /// on the PUT.
    #[tracing::instrument(skip(self, file), fields(file_name = %file.name, size = file.data.len()))]
    pub async fn upload_file(&self, file: &LocalFile) -> Result<PresignedUploadGrant, AppError> {
        self.upload_policy().validate(&file.selected())?;

        let request = self.presigned_request_for(file);
        let grant = self.request_presigned_url(&request).await?;

        self.put_raw(&grant.upload_url, &file.content_type, file.data.clone())
            .await?;

        tracing::info!(key = %grant.key, "Upload completed");
        Ok(grant)
    }
}
