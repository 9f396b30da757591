//! Helper functions shared by the page composer and templates

mod html;
mod url;

pub use html::*;
pub use url::*;
