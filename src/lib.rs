#![forbid(unsafe_code)]

//! Building blocks for `update_localizations`: read a Studio link, load the
//! title and description, authorize against YouTube and push the metadata out
//! to every supported localization.

pub mod config;
pub mod error;
pub mod files;
pub mod languages;
pub mod oauth;
pub mod prompt;
pub mod security;
pub mod video_id;
pub mod youtube;

#[cfg(test)]
mod test_support;
