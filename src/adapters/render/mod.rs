//! Fragment renderer adapters.

mod markdown_link;

pub use markdown_link::MarkdownLinkRenderer;
