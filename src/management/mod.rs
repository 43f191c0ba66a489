mod auth;
mod workspace;

pub use auth::TokenManager;
pub use workspace::clean_output_dir;
pub use workspace::ensure_output_dir;
