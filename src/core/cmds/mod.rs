pub mod classify;
pub mod init;
pub mod print;
pub mod run;

pub use classify::execute_classify;
pub use init::execute_init;
pub use print::execute_print;
pub use run::execute_run;
