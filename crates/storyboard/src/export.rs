//! Writing a finished story board to disk.

use serde::Serialize;
use std::path::{Path, PathBuf};
use storyboard_core::StoryBoard;
use storyboard_error::{StorageError, StorageErrorKind, StoryboardResult};
use tracing::{debug, info, instrument};

/// File extension matching an encoded image's signature.
///
/// # Examples
///
/// ```
/// use storyboard::image_extension;
///
/// assert_eq!(image_extension(&[0xFF, 0xD8, 0xFF, 0xE0]), "jpg");
/// assert_eq!(image_extension(b"\x89PNG\r\n\x1a\n"), "png");
/// assert_eq!(image_extension(b"???"), "bin");
/// ```
pub fn image_extension(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "jpg",
        [0x89, b'P', b'N', b'G', ..] => "png",
        [b'G', b'I', b'F', b'8', ..] => "gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "webp",
        _ => "bin",
    }
}

fn image_file_name(index: usize, bytes: &[u8]) -> String {
    format!("image_{:02}.{}", index + 1, image_extension(bytes))
}

/// Render the board as Markdown, each story point followed by its image.
///
/// Text and images are paired by position. When the counts differ the
/// unpaired entries are still rendered.
pub fn render_markdown(board: &StoryBoard) -> String {
    let points = board.story_text().story_points();
    let images = board.story_images();

    let mut out = format!("# {}\n\n", board.story_text().title());
    for index in 0..points.len().max(images.len()) {
        if let Some(point) = points.get(index) {
            out.push_str(point.trim());
            out.push_str("\n\n");
        }
        if let Some(image) = images.get(index) {
            out.push_str(&format!(
                "![Illustration {}]({})\n\n",
                index + 1,
                image_file_name(index, image)
            ));
        }
    }
    out
}

/// Machine-readable description of a written board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    /// Story title
    pub title: String,
    /// Story text, one entry per accepted segment
    pub story_points: Vec<String>,
    /// Image files written, in story order
    pub images: Vec<PathBuf>,
    /// Markdown file written
    pub markdown: PathBuf,
}

/// Write `story.md` and one file per image into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if `dir` is not a directory or a file cannot be written.
#[instrument(skip(board), fields(dir = %dir.as_ref().display()))]
pub fn write_story_board(board: &StoryBoard, dir: impl AsRef<Path>) -> StoryboardResult<BoardSummary> {
    let dir = dir.as_ref();

    if dir.exists() && !dir.is_dir() {
        return Err(StorageError::new(StorageErrorKind::InvalidPath(
            dir.display().to_string(),
        ))
        .into());
    }
    std::fs::create_dir_all(dir).map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryCreation(format!(
            "{}: {}",
            dir.display(),
            e
        )))
    })?;

    let mut images = Vec::with_capacity(board.story_images().len());
    for (index, bytes) in board.story_images().iter().enumerate() {
        let path = dir.join(image_file_name(index, bytes));
        write_file(&path, bytes)?;
        debug!(path = %path.display(), size = bytes.len(), "Wrote image");
        images.push(path);
    }

    let markdown = dir.join("story.md");
    write_file(&markdown, render_markdown(board).as_bytes())?;

    info!(images = images.len(), "Story board written");
    Ok(BoardSummary {
        title: board.story_text().title().clone(),
        story_points: board.story_text().story_points().clone(),
        images,
        markdown,
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    std::fs::write(path, contents).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_core::StoryText;

    #[test]
    fn test_markdown_pairs_by_position() {
        let board = StoryBoard::new(
            StoryText::untitled(vec!["One.".into(), "Two.".into()]),
            vec![vec![0xFF, 0xD8, 0xFF, 0x00]],
        );
        let markdown = render_markdown(&board);

        assert!(markdown.starts_with("# Story\n\n"));
        let one = markdown.find("One.").unwrap();
        let image = markdown.find("![Illustration 1](image_01.jpg)").unwrap();
        let two = markdown.find("Two.").unwrap();
        assert!(one < image && image < two);
        assert!(!markdown.contains("Illustration 2"));
    }

    #[test]
    fn test_markdown_keeps_extra_images() {
        let board = StoryBoard::new(StoryText::untitled(vec![]), vec![b"x".to_vec(), b"y".to_vec()]);
        let markdown = render_markdown(&board);
        assert!(markdown.contains("image_02.bin"));
    }
}
