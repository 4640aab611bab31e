//! slotwatch-browser — the browsing collaborator.
//!
//! [`HttpBrowser`] keeps one cookie-carrying HTTP session for the whole run.
//! Each fetch visits the entry page to establish the session, then the
//! target calendar page, and reads the document status, the `<body id>`
//! marker and the heading from what came back.
//!
//! No JavaScript is executed; the booking pages are server-rendered.

pub mod page;
pub mod session;
pub mod status;

pub use page::PageRead;
pub use session::{ENTRY_URL, HttpBrowser, TARGET_URL};
pub use status::StatusCell;
