//! Rebuild a four-level taxonomy (Area > Broad > Major > Detailed) from
//! labeled spreadsheet rows and export it as nested JSON.
//!
//! Layers, inner to outer: [`domain`] (tree and builder), [`application`]
//! (export service, JSON rendering), [`infrastructure`] (workbook reading,
//! filesystem, wiring) and [`cli`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
