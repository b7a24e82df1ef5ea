//! Spar Def - Definition-file parsing and path resolution
//!
//! Character and stage definitions are ini-style text files with ordered
//! `[section]` blocks of `key = value` lines. This crate provides:
//! - `parse_sections` - ordered ini section parser
//! - `Filesystem` - existence/search resolver contract, with the on-disk
//!   implementation `DiskFs`
//! - `resolve_with_base` - resolve a file named by a definition relative to
//!   the definition's own directory first

mod fs;
mod ini;

pub use fs::{resolve_with_base, DiskFs, Filesystem};
pub use ini::{first_section, parse_sections, IniSection};
