//! Host download boundary
//!
//! The encoder never saves images itself; it hands a [`DownloadLink`] to a
//! [`DownloadHost`]. [`FsDownloadHost`] is the host used outside a browser.

use crate::error::DownloadError;
use crate::models::DataUri;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Filename used when the caller supplies none
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "qrcode.png";

/// A downloadable image: target filename plus its data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    /// Suggested filename
    pub filename: String,
    /// Image data URI
    pub href: String,
}

/// Build a link without triggering anything
pub fn create_download_link(data_uri: &str, filename: Option<&str>) -> DownloadLink {
    DownloadLink {
        filename: filename.unwrap_or(DEFAULT_DOWNLOAD_FILENAME).to_string(),
        href: data_uri.to_string(),
    }
}

/// Something able to deliver a download to the user
pub trait DownloadHost {
    /// Deliver `link`
    fn trigger_download(&self, link: &DownloadLink) -> Result<(), DownloadError>;
}

/// Hand a rendered image to `host`, defaulting the filename to `qrcode.png`
pub fn download_qr_image<H>(host: &H, data_uri: &str, filename: Option<&str>) -> Result<(), DownloadError>
where
    H: DownloadHost + ?Sized,
{
    let link = create_download_link(data_uri, filename);
    host.trigger_download(&link)
}

/// Writes downloads as files into a directory
#[derive(Debug, Clone)]
pub struct FsDownloadHost {
    dir: PathBuf,
}

impl FsDownloadHost {
    /// Host writing into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn target_path(&self, filename: &str) -> Result<PathBuf, DownloadError> {
        let plain = Path::new(filename)
            .file_name()
            .is_some_and(|name| name == filename);
        if !plain {
            return Err(DownloadError::InvalidFilename(filename.to_string()));
        }
        Ok(self.dir.join(filename))
    }
}

impl DownloadHost for FsDownloadHost {
    fn trigger_download(&self, link: &DownloadLink) -> Result<(), DownloadError> {
        let target = self.target_path(&link.filename)?;
        let image = DataUri::parse(&link.href).ok_or(DownloadError::InvalidDataUri)?;

        let mut staged = StagedFile::create(&target)?;
        staged.write_all(&image.data)?;
        staged.commit()?;

        tracing::info!(
            path = %target.display(),
            mime = %image.mime,
            bytes = image.data.len(),
            "download written"
        );
        Ok(())
    }
}

/// Temporary sibling of the target, removed on drop unless committed
struct StagedFile {
    staging: PathBuf,
    target: PathBuf,
    file: Option<fs::File>,
}

impl StagedFile {
    fn create(target: &Path) -> std::io::Result<Self> {
        let mut name = target.file_name().unwrap_or_default().to_os_string();
        name.push(".part");
        let staging = target.with_file_name(name);
        let file = fs::File::create(&staging)?;
        Ok(Self {
            staging,
            target: target.to_path_buf(),
            file: Some(file),
        })
    }

    fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.write_all(bytes),
            None => Err(std::io::Error::other("staged file already closed")),
        }
    }

    fn commit(mut self) -> std::io::Result<()> {
        if let Some(file) = self.file.take() {
            file.sync_all()?;
        }
        fs::rename(&self.staging, &self.target)?;
        self.staging.clear();
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        self.file.take();
        if !self.staging.as_os_str().is_empty() {
            let _ = fs::remove_file(&self.staging);
        }
    }
}
