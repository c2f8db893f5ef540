//! Static site generation for mdsite.
//!
//! Copies the static assets directory, then renders every content file
//! through the page template into a mirrored tree of `.html` files.

mod builder;
mod copy;
mod scanner;
mod template;

pub use builder::{BuildConfig, BuildError, BuildReport, SiteBuilder, generate_page};
pub use copy::copy_dir_recursive;
pub use scanner::{PageRef, Scanner};
pub use template::Template;
