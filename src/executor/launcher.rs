use std::convert::Infallible;
use std::ffi::CString;
use std::io::{self, Write};

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{execvp, fork, ForkResult, Pid};

use crate::error::{self, ExecError};
use crate::executor::{ExecOutcome, ExecStatus, Launcher};

/// Launches programs with fork + execvp and waits for them in the
/// foreground.
#[derive(Debug, Default)]
pub struct ForkLauncher;

impl Launcher for ForkLauncher {
    fn launch(&mut self, args: &[String]) -> ExecStatus {
        let argv = to_argv(args)?;

        // The child gets a copy of our buffers; make sure they are empty.
        io::stdout().flush()?;

        // SAFETY: the child only calls execvp, reports, and _exits.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => exec_child(&argv),
            Ok(ForkResult::Parent { child }) => {
                wait_for(child)?;
                Ok(ExecOutcome::Continue)
            }
            Err(e) => Err(ExecError::LaunchFailure(e)),
        }
    }
}

fn to_argv(args: &[String]) -> Result<Vec<CString>, ExecError> {
    if args.is_empty() {
        return Err(ExecError::InvalidArgument("empty command".to_string()));
    }
    args.iter()
        .map(|arg| {
            CString::new(arg.as_bytes()).map_err(|_| {
                ExecError::InvalidArgument(format!("`{}` contains a NUL byte", arg.escape_default()))
            })
        })
        .collect()
}

fn replace_image(argv: &[CString]) -> Result<Infallible, ExecError> {
    execvp(&argv[0], argv).map_err(|source| ExecError::ExecFailure {
        program: argv[0].to_string_lossy().into_owned(),
        source,
    })
}

/// Child side of the fork: becomes the program or exits with status 1.
/// Never returns into shell code.
fn exec_child(argv: &[CString]) -> ! {
    let err = match replace_image(argv) {
        Ok(never) => match never {},
        Err(err) => err,
    };
    error::report(&err);
    // _exit: skip atexit handlers and stdio flushing inherited from the shell.
    unsafe { libc::_exit(1) }
}

/// Blocks until `child` has exited or been killed. Stop notifications and
/// interrupted waits go round again.
fn wait_for(child: Pid) -> Result<WaitStatus, ExecError> {
    loop {
        match waitpid(child, Some(WaitPidFlag::WUNTRACED)) {
            Ok(status @ (WaitStatus::Exited(..) | WaitStatus::Signaled(..))) => return Ok(status),
            Ok(_) | Err(Errno::EINTR) => continue,
            Err(e) => return Err(ExecError::Io(io::Error::from(e))),
        }
    }
}
