//! Caller-side publication records and the image host seam.
//!
//! A publication is created from a form draft: fields imported from a DOCX
//! file, plus images that were uploaded to an external host while the
//! draft was being edited. Persistence and the host's HTTP API live
//! outside this crate; [`ImageHost`] is the boundary.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::fields::ExtractionResult;

/// Provider name recorded for images stored on the hosted service.
pub const DEFAULT_PROVIDER: &str = "imagekit";

/// Folder used for uploads when the request does not name one.
pub const DEFAULT_FOLDER: &str = "/publications";

/// Folder used for images uploaded from an unsaved draft.
pub const DRAFT_FOLDER: &str = "/publications/draft";

/// Folder used for images attached before the publication has an id.
pub const TEMP_FOLDER: &str = "/publications/temp";

/// Alt text used when the uploaded file has no usable name.
const DEFAULT_ALT: &str = "imagen";

/// Form state for a publication that has not been created yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationDraft {
    /// Title (required before saving)
    pub title: Option<String>,

    /// Abstract
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    /// Body (required before saving)
    pub content: Option<String>,

    /// Publication date
    pub publication_date: Option<NaiveDate>,

    /// Author foreign key
    pub author_id: Option<u64>,

    /// Publication type foreign key
    pub publication_type_id: Option<u64>,

    /// Images uploaded while editing
    pub images: Vec<ImageDraft>,
}

impl PublicationDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy imported fields into the draft.
    ///
    /// Only `title` and `content` are filled, and only when the imported
    /// value is non-empty; the abstract stays under manual control.
    /// Returns `true` if any field changed.
    pub fn apply_extraction(&mut self, fields: &ExtractionResult) -> bool {
        let mut changed = false;
        if let Some(title) = fields.title.as_ref().filter(|t| !t.is_empty()) {
            self.title = Some(title.clone());
            changed = true;
        }
        if !fields.content.is_empty() {
            self.content = Some(fields.content.clone());
            changed = true;
        }
        changed
    }

    /// Names of required fields that are still missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        let mut missing = Vec::new();
        if blank(&self.title) {
            missing.push("title");
        }
        if blank(&self.content) {
            missing.push("content");
        }
        if self.publication_date.is_none() {
            missing.push("publication_date");
        }
        if self.author_id.is_none() {
            missing.push("author_id");
        }
        if self.publication_type_id.is_none() {
            missing.push("publication_type_id");
        }
        missing
    }

    /// Image rows to create once the publication exists.
    pub fn image_records(&self) -> Vec<ImageRecord> {
        image_records(&self.images)
    }
}

/// A request to store a local file on the image host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Local file to upload
    pub path: PathBuf,

    /// File name sent to the host
    pub file_name: String,

    /// Target folder on the host
    pub folder: String,
}

impl UploadRequest {
    /// Create a request for `path`, named after its file name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            folder: DEFAULT_FOLDER.to_string(),
        }
    }

    /// Override the file name (e.g. the client's original name).
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Set the target folder.
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Target the folder of a publication: `/publications/{id}`, or the
    /// temp folder when the publication is not saved yet.
    pub fn for_publication(self, publication_id: Option<u64>) -> Self {
        match publication_id {
            Some(id) => self.with_folder(format!("{}/{}", DEFAULT_FOLDER, id)),
            None => self.with_folder(TEMP_FOLDER),
        }
    }
}

/// What the image host reports for a stored file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Host-side file id, needed for deletion
    pub file_id: Option<String>,
    /// Public URL
    pub url: Option<String>,
    /// Width in pixels
    pub width: Option<u32>,
    /// Height in pixels
    pub height: Option<u32>,
    /// Size in bytes
    pub size: Option<u64>,
    /// MIME type
    pub mime: Option<String>,
    /// Stored file name
    pub name: Option<String>,
    /// Full host response
    pub raw: Value,
}

impl UploadedImage {
    /// Map a host upload response.
    ///
    /// The MIME type falls back to `fileType` when `mime` is absent.
    pub fn from_raw(raw: Value) -> Self {
        let string = |key: &str| raw.get(key).and_then(Value::as_str).map(String::from);
        let uint = |key: &str| raw.get(key).and_then(Value::as_u64);

        Self {
            file_id: string("fileId"),
            url: string("url"),
            width: uint("width").and_then(|v| u32::try_from(v).ok()),
            height: uint("height").and_then(|v| u32::try_from(v).ok()),
            size: uint("size"),
            mime: string("mime").or_else(|| string("fileType")),
            name: string("name"),
            raw,
        }
    }
}

/// Storage service for publication images.
///
/// Implementations talk to the hosted service; failures are reported as
/// [`Error::Upload`] carrying the host's message.
pub trait ImageHost: Send + Sync {
    /// Upload a local file.
    fn upload(&self, request: &UploadRequest) -> Result<UploadedImage>;

    /// Delete a previously uploaded file.
    fn delete(&self, file_id: &str) -> Result<()>;
}

/// Upload a draft image and turn the response into an [`ImageDraft`].
pub fn upload_draft(host: &dyn ImageHost, request: &UploadRequest) -> Result<ImageDraft> {
    let mut draft = ImageDraft::default();
    upload_into(host, request, &mut draft)?;
    Ok(draft)
}

/// Upload a file and record the result on an existing draft.
///
/// Alt text and caption typed into the draft are kept.
pub fn upload_into(
    host: &dyn ImageHost,
    request: &UploadRequest,
    draft: &mut ImageDraft,
) -> Result<()> {
    let uploaded = host.upload(request)?;
    if uploaded.url.is_none() {
        return Err(Error::Upload(format!(
            "host returned no URL for {}",
            request.file_name
        )));
    }
    log::debug!(
        "Uploaded {} to {} as {:?}",
        request.path.display(),
        request.folder,
        uploaded.file_id
    );
    draft.apply_upload(&uploaded);
    Ok(())
}

/// An image attached to a draft, before the publication exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageDraft {
    /// Host-side file id
    pub file_id: Option<String>,
    /// Public URL; drafts without one are not saved
    pub url: Option<String>,
    /// Storage provider
    pub provider: Option<String>,
    /// Width in pixels
    pub width: Option<u32>,
    /// Height in pixels
    pub height: Option<u32>,
    /// Size in bytes
    pub size: Option<u64>,
    /// MIME type
    pub mime: Option<String>,
    /// Alt text
    pub alt: Option<String>,
    /// Caption
    pub caption: Option<String>,
    /// Explicit display position
    pub sort_order: Option<i32>,
    /// Raw host response
    pub metadata: Option<Value>,
}

impl ImageDraft {
    /// Build a draft from an upload response.
    ///
    /// The alt text is the stem of the stored file name.
    pub fn from_upload(uploaded: &UploadedImage) -> Self {
        let mut draft = Self::default();
        draft.apply_upload(uploaded);
        draft
    }

    /// Copy an upload response onto this draft.
    ///
    /// Host fields are overwritten. The alt text is only derived from the
    /// stored file name when the draft has none.
    pub fn apply_upload(&mut self, uploaded: &UploadedImage) {
        self.file_id = uploaded.file_id.clone();
        self.url = uploaded.url.clone();
        self.provider = Some(DEFAULT_PROVIDER.to_string());
        self.width = uploaded.width;
        self.height = uploaded.height;
        self.size = uploaded.size;
        self.mime = uploaded.mime.clone();
        self.metadata = Some(uploaded.raw.clone());

        if self.alt.as_deref().map_or(true, |a| a.trim().is_empty()) {
            self.alt = Some(default_alt(uploaded.name.as_deref()));
        }
    }
}

fn default_alt(name: Option<&str>) -> String {
    name.and_then(|name| Path::new(name).file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| DEFAULT_ALT.to_string())
}

/// An image row linked to a saved publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Host-side file id
    pub file_id: Option<String>,
    /// Public URL
    pub url: String,
    /// Storage provider
    pub provider: String,
    /// Width in pixels
    pub width: Option<u32>,
    /// Height in pixels
    pub height: Option<u32>,
    /// Size in bytes
    pub size: Option<u64>,
    /// MIME type
    pub mime: Option<String>,
    /// Alt text
    pub alt: Option<String>,
    /// Caption
    pub caption: Option<String>,
    /// Display position
    pub sort_order: i32,
    /// Raw host response
    pub metadata: Option<Value>,
}

/// Turn draft images into rows for a newly created publication.
///
/// Drafts that never finished uploading (no URL) are skipped. A draft
/// without an explicit `sort_order` gets its position among the kept
/// drafts.
pub fn image_records(drafts: &[ImageDraft]) -> Vec<ImageRecord> {
    drafts
        .iter()
        .filter_map(|draft| {
            let url = draft.url.as_ref().filter(|u| !u.is_empty())?;
            Some((draft, url.clone()))
        })
        .enumerate()
        .map(|(position, (draft, url))| ImageRecord {
            file_id: draft.file_id.clone(),
            url,
            provider: draft
                .provider
                .clone()
                .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
            width: draft.width,
            height: draft.height,
            size: draft.size,
            mime: draft.mime.clone(),
            alt: draft.alt.clone(),
            caption: draft.caption.clone(),
            sort_order: draft
                .sort_order
                .unwrap_or_else(|| i32::try_from(position).unwrap_or(i32::MAX)),
            metadata: draft.metadata.clone(),
        })
        .collect()
}
