use crate::error::{Result, SheetError};
use crate::extractor::ReceiptImage;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub media_type: &'static str,
}

impl ImageInfo {
    fn from_path(path: &Path) -> Option<Self> {
        let media_type = media_type_for(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Some(Self {
            path: path.to_path_buf(),
            file_name,
            media_type,
        })
    }

    /// Reads the file into memory for upload.
    pub fn load(&self) -> Result<ReceiptImage> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| SheetError::ImageLoad(format!("{}: {}", self.path.display(), e)))?;
        Ok(ReceiptImage {
            file_name: self.file_name.clone(),
            media_type: self.media_type.to_string(),
            bytes,
        })
    }
}

/// MIME type of a supported image, judged by extension.
pub fn media_type_for(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type())
        .filter(|mime| mime.starts_with("image/"))
}

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(SheetError::FolderNotFound(folder.display().to_string()));
    }

    let mut images: Vec<ImageInfo> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| ImageInfo::from_path(e.path()))
        .collect();

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    debug!("{} images in {}", images.len(), folder.display());

    Ok(images)
}

/// Expands files and folders into the images to process, keeping argument order.
///
/// Explicit files that are not images are skipped with a warning.
pub fn collect_images(paths: &[PathBuf]) -> Result<Vec<ImageInfo>> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_dir() {
            images.extend(scan_folder(path)?);
        } else if path.is_file() {
            match ImageInfo::from_path(path) {
                Some(info) => images.push(info),
                None => warn!("skipping {}: not a supported image", path.display()),
            }
        } else {
            return Err(SheetError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(images)
}
