//! Command implementations.

pub mod forget;
pub mod process;
pub mod profile;
pub mod show;

pub use self::forget::execute_forget;
pub use self::process::execute_process;
pub use self::profile::execute_profile;
pub use self::show::{execute_list, execute_show};
