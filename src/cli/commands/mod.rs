mod check;
mod delete;
mod init;
mod promote;
mod run;

pub use check::cmd_check;
pub use delete::cmd_delete_user;
pub use init::cmd_init;
pub use promote::cmd_promote;
pub use run::cmd_run;
