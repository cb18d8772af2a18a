//! Markup utilities: reading HTML pages, navigating the parsed tree and
//! extracting text.

mod html;
mod text;
mod utils;

pub use html::{html_to_xhtml, parse_markup};
pub use text::{normalise_whitespace, text_content, text_content_excluding};
pub use utils::{
    element_by_id, find_child, find_children, find_descendant, find_descendants, get_tag_name,
    has_class, non_empty_attribute,
};
