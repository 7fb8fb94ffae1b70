use crate::cli::{Commands, GlobalFlags};

pub mod config;
pub mod schema;
pub mod sync;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Sync(args) => sync::handle(&args, flags).await,
        Commands::Schema => schema::handle(flags),
        Commands::Config(args) => config::handle(&args, flags),
    }
}
