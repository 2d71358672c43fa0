//! HTTP server for the habit gallery.
//!
//! Accepts multipart submissions (a short reflection plus a habit scorecard
//! image and a six-panel comic image), lists stored works, and serves the
//! stored images back.
//!
//! | Route | Method | Purpose |
//! |---|---|---|
//! | `/upload` | POST | store one submission (201 / 400 / 500) |
//! | `/works` | GET | list every stored work with image URLs |
//! | `/uploads/*filename` | GET | raw image bytes (404 if absent or outside root) |
//! | `/` | GET | landing page |
//! | `/static/*` | GET | site assets |
//! | `/v1/health`, `/v1/info` | GET | liveness and server info |

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::{ServerConfig, DEFAULT_MAX_UPLOAD_SIZE};
pub use error::{ErrorBody, ServerError, ServerResult};
pub use server::GalleryServer;
pub use state::AppState;
