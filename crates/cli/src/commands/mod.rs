mod check;
mod config;
mod init;
mod update;

pub use check::CheckArgs;
pub use check::handle_check;
pub use config::ConfigArgs;
pub use config::handle_config;
pub use init::InitArgs;
pub use init::handle_init;
pub use update::UpdateArgs;
pub use update::{Change, PlannedUpdate, handle_update, handle_update_with_prompter, plan_updates};
