//! Markdown link renderer.
//!
//! Images become `![name](url)`, files become `[name](url)`, text is
//! passed through unchanged.

use crate::domain::flash::{Fragment, FragmentKind};
use crate::ports::{FragmentRenderer, RenderError};

/// Renders attachments as Markdown links to their external reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownLinkRenderer;

impl MarkdownLinkRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl FragmentRenderer for MarkdownLinkRenderer {
    fn render(&self, fragment: &Fragment) -> Result<String, RenderError> {
        let kind = fragment.kind();
        if kind == FragmentKind::Text {
            return Ok(fragment.content().to_string());
        }

        let reference = fragment
            .reference()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(RenderError::MissingReference { kind })?;

        // Whitespace or a closing paren would end the link target early.
        if reference.contains(char::is_whitespace) || reference.contains(')') {
            return Err(RenderError::UnsupportedReference {
                reference: reference.to_string(),
            });
        }

        let name = fragment.filename().unwrap_or(match kind {
            FragmentKind::Image => "image",
            _ => "file",
        });

        Ok(match kind {
            FragmentKind::Image => format!("![{}]({})", name, reference),
            _ => format!("[{}]({})", name, reference),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_image_as_embedded_link() {
        let out = MarkdownLinkRenderer::new()
            .render(&Fragment::image("https://cdn/x.jpg", "x.jpg"))
            .unwrap();
        assert_eq!(out, "![x.jpg](https://cdn/x.jpg)");
    }

    #[test]
    fn renders_file_as_plain_link() {
        let out = MarkdownLinkRenderer::new()
            .render(&Fragment::file("a.pdf", Some("https://cdn/a.pdf".to_string())))
            .unwrap();
        assert_eq!(out, "[a.pdf](https://cdn/a.pdf)");
    }

    #[test]
    fn text_passes_through() {
        let out = MarkdownLinkRenderer::new().render(&Fragment::text("hi #x")).unwrap();
        assert_eq!(out, "hi #x");
    }

    #[test]
    fn file_without_reference_fails() {
        let err = MarkdownLinkRenderer::new()
            .render(&Fragment::file("a.pdf", None))
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingReference {
                kind: FragmentKind::File
            }
        );
    }

    #[test]
    fn reference_with_space_is_unsupported() {
        let err = MarkdownLinkRenderer::new()
            .render(&Fragment::image("C:/my pics/a.png", "a.png"))
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedReference { .. }));
    }
}
