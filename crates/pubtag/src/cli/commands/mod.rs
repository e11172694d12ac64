//! CLI commands

mod changelog;
mod tag;
mod version;

pub use changelog::ChangelogCommand;
pub use tag::TagCommand;
pub use version::VersionCommand;

/// Runtime for the hosting-service calls; each call is awaited in turn
fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
