//! Source descriptors built from viewer source strings
//!
//! - `dir:<path>`: dynamic, resolves to the first image in the folder
//! - anything else: literal, or dynamic when a resolve delay is configured

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use lumen_core::SourceDescriptor;

/// File extensions treated as images when scanning a folder
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Build the descriptor for one configured source
pub fn descriptor_for(source: &str, delay: Option<Duration>) -> SourceDescriptor {
    if let Some(dir) = source.strip_prefix("dir:") {
        let dir = dir.to_string();
        return SourceDescriptor::dynamic(move || {
            let dir = dir.clone();
            async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                first_image_in(Path::new(&dir))
            }
        });
    }

    match delay {
        Some(delay) => {
            let reference = source.to_string();
            SourceDescriptor::dynamic(move || {
                let reference = reference.clone();
                async move {
                    tokio::time::sleep(delay).await;
                    Ok(reference)
                }
            })
        }
        None => SourceDescriptor::literal(source),
    }
}

/// First image file in a folder, by name
fn first_image_in(dir: &Path) -> Result<String> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read image folder: {:?}", dir))?;

    let mut images: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .collect();
    images.sort();

    match images.into_iter().next() {
        Some(path) => Ok(path.display().to_string()),
        None => bail!("No images in folder {:?}", dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::resolve::resolve;
    use lumen_core::Outcome;

    #[test]
    fn test_plain_source_is_literal() {
        assert_eq!(descriptor_for("a.png", None), SourceDescriptor::literal("a.png"));
        assert!(!descriptor_for("a.png", Some(Duration::from_millis(5))).is_literal());
    }

    #[tokio::test]
    async fn test_dir_source_picks_first_image() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("b.PNG"), b"x").unwrap();
        std::fs::write(dir.path().join("c.jpg"), b"x").unwrap();

        let source = format!("dir:{}", dir.path().display());
        let outcome = resolve(&descriptor_for(&source, None)).await;
        let expected = dir.path().join("b.PNG").display().to_string();
        assert_eq!(outcome.reference(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_empty_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = format!("dir:{}", dir.path().display());

        let outcome = resolve(&descriptor_for(&source, None)).await;
        assert!(matches!(outcome, Outcome::Failed(_)));
    }
}
