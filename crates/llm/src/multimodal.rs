//! Layout of a single user turn mixing text and images.
//!
//! Two layouts are supported. With a tag, the text is split on every
//! occurrence of the tag and the images are placed at the split points in
//! order. Without one, all images come first followed by the whole text.

use crate::{Content, ContentBlock};

/// Build the content blocks of one user turn.
///
/// `images` must already be resolved URLs (see [`crate::image::resolve`]).
/// Without images the result is a single text block, or nothing for empty
/// text.
pub fn build<S: AsRef<str>>(text: &str, images: &[S], tag: Option<&str>) -> Vec<ContentBlock> {
    match tag.map(str::trim).filter(|t| !t.is_empty()) {
        Some(tag) if !images.is_empty() => interleaved(text, images, tag),
        _ => images_first(text, images),
    }
}

/// Content for one user turn: plain text when no images are attached.
pub fn user_content<S: AsRef<str>>(text: &str, images: &[S], tag: Option<&str>) -> Content {
    if images.is_empty() {
        Content::Text(text.to_owned())
    } else {
        Content::Blocks(build(text, images, tag))
    }
}

/// How many images the layout can place, or `None` when all of them are.
///
/// With a non-blank tag only one image per tag occurrence is used.
pub fn image_slots(text: &str, tag: Option<&str>) -> Option<usize> {
    tag.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|tag| text.matches(tag).count())
}

fn interleaved<S: AsRef<str>>(text: &str, images: &[S], tag: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::with_capacity(images.len() * 2 + 1);
    let mut segments = text.split(tag);
    let mut points = 0;

    if let Some(first) = segments.next() {
        push_text(&mut blocks, first);
    }
    for (j, segment) in segments.enumerate() {
        if let Some(image) = images.get(j) {
            blocks.push(ContentBlock::image(image.as_ref()));
        }
        push_text(&mut blocks, segment);
        points = j + 1;
    }

    if images.len() > points {
        tracing::debug!(
            "dropping {} image(s) beyond {points} tag occurrence(s)",
            images.len() - points
        );
    }
    blocks
}

fn images_first<S: AsRef<str>>(text: &str, images: &[S]) -> Vec<ContentBlock> {
    let mut blocks: Vec<_> = images
        .iter()
        .map(|image| ContentBlock::image(image.as_ref()))
        .collect();
    if !text.is_empty() {
        blocks.push(ContentBlock::text(text));
    }
    blocks
}

fn push_text(blocks: &mut Vec<ContentBlock>, segment: &str) {
    if !segment.trim().is_empty() {
        blocks.push(ContentBlock::text(segment));
    }
}
