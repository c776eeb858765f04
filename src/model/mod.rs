//! Model layer
//!
//! - `browser` / `upload` - the two request orchestrators
//! - `outcome` - classification shared by both
//! - `schema` - wire payloads
//! - `modal` / `ui` - presentation state

pub mod browser;
pub mod modal;
pub mod outcome;
pub mod schema;
pub mod ui;
pub mod upload;

pub use browser::TableBrowser;
pub use upload::{SchemaUpload, UploadStatus};
