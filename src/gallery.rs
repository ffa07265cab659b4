use anyhow::Context;
use std::path::{Path, PathBuf};

/// Images per gallery row
pub const GALLERY_COLUMNS: usize = 2;

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "gif", "webp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub path: PathBuf,
    /// File name, shown under the image
    pub caption: String,
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// List the sample images in `dir`, sorted by file name
pub fn load_gallery(dir: &Path) -> anyhow::Result<Vec<GalleryEntry>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read sample directory {}", dir.display()))?;

    let mut gallery = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || !is_image(&path) {
            continue;
        }
        let caption = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        gallery.push(GalleryEntry { path, caption });
    }

    gallery.sort_by(|a, b| a.caption.cmp(&b.caption));
    Ok(gallery)
}

/// Split entries into rows of `GALLERY_COLUMNS`; the last row may be short
pub fn gallery_rows(entries: &[GalleryEntry]) -> impl Iterator<Item = &[GalleryEntry]> {
    entries.chunks(GALLERY_COLUMNS)
}
