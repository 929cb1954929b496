mod executor;
mod default_executor;
mod builtin;
mod launcher;
mod redirect;

pub use executor::{ExecOutcome, ExecStatus, Launcher};
pub use default_executor::DefaultExecutor;
pub use builtin::{BuiltinCommand, BuiltinManager};
pub use launcher::ForkLauncher;
pub use redirect::{RedirectHandler, RedirectKind, Redirection, SavedFd};
