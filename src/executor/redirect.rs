use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, RawFd};

use crate::error::{self, ExecError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    Truncate,
    Append,
}

impl RedirectKind {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            ">" => Some(RedirectKind::Truncate),
            ">>" => Some(RedirectKind::Append),
            _ => None,
        }
    }

    pub fn operator(self) -> &'static str {
        match self {
            RedirectKind::Truncate => ">",
            RedirectKind::Append => ">>",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub kind: RedirectKind,
    pub target: String,
}

pub struct RedirectHandler;

impl RedirectHandler {
    /// Finds the first `>` or `>>` in `args` and cuts the list at it.
    ///
    /// On a missing file name `args` is left as it was.
    pub fn detect(args: &mut Vec<String>) -> Result<Option<Redirection>, ExecError> {
        let found = args
            .iter()
            .enumerate()
            .find_map(|(pos, arg)| RedirectKind::from_token(arg).map(|kind| (pos, kind)));
        let Some((pos, kind)) = found else {
            return Ok(None);
        };
        let Some(target) = args.get(pos + 1).cloned() else {
            return Err(ExecError::MalformedRedirection(kind.operator().to_string()));
        };
        args.truncate(pos);
        Ok(Some(Redirection { kind, target }))
    }
}

impl Redirection {
    fn open(&self) -> Result<File, ExecError> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).mode(0o644);
        match self.kind {
            RedirectKind::Truncate => options.truncate(true),
            RedirectKind::Append => options.append(true),
        };
        options.open(&self.target).map_err(|source| self.unavailable(source))
    }

    fn unavailable(&self, source: io::Error) -> ExecError {
        ExecError::RedirectionTargetUnavailable {
            path: self.target.clone(),
            source,
        }
    }

    /// Points `fd` (normally stdout) at the target until the returned guard
    /// drops. Nothing changes on error.
    pub fn install_on(&self, fd: RawFd) -> Result<SavedFd, ExecError> {
        let file = self.open()?;
        if fd == libc::STDOUT_FILENO {
            // Anything still buffered belongs to the old stdout.
            io::stdout().flush()?;
        }

        // Close-on-exec so launched children never inherit the saved slot.
        let saved = unsafe { libc::fcntl(fd, libc::F_DUPFD_CLOEXEC, 3) };
        if saved == -1 {
            return Err(self.unavailable(io::Error::last_os_error()));
        }
        if unsafe { libc::dup2(file.as_raw_fd(), fd) } == -1 {
            let err = io::Error::last_os_error();
            unsafe { libc::close(saved) };
            return Err(self.unavailable(err));
        }

        // `file` closes here; `fd` now holds the only reference we need.
        Ok(SavedFd { target: fd, saved })
    }
}

/// Where a descriptor pointed before redirection. Dropping it puts the
/// descriptor back and closes the saved copy.
#[must_use]
#[derive(Debug)]
pub struct SavedFd {
    target: RawFd,
    saved: RawFd,
}

impl Drop for SavedFd {
    fn drop(&mut self) {
        if self.target == libc::STDOUT_FILENO {
            if let Err(e) = io::stdout().flush() {
                error::report(&e);
            }
        }
        unsafe {
            if libc::dup2(self.saved, self.target) == -1 {
                error::report(&io::Error::last_os_error());
            }
            libc::close(self.saved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, read_to_string};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_without_operator() {
        let mut list = args(&["ls", "-l", "/tmp"]);
        assert_eq!(RedirectHandler::detect(&mut list).unwrap(), None);
        assert_eq!(list, args(&["ls", "-l", "/tmp"]));
    }

    #[test]
    fn test_detect_truncates_at_first_operator() {
        let mut list = args(&["echo", "hi", ">", "out.txt", ">>", "other.txt"]);
        let found = RedirectHandler::detect(&mut list).unwrap();
        assert_eq!(
            found,
            Some(Redirection { kind: RedirectKind::Truncate, target: "out.txt".to_string() })
        );
        assert_eq!(list, args(&["echo", "hi"]));

        let mut list = args(&["ls", ">>", "log.txt", "-a"]);
        let found = RedirectHandler::detect(&mut list).unwrap().unwrap();
        assert_eq!(found.kind, RedirectKind::Append);
        assert_eq!(found.target, "log.txt");
        assert_eq!(list, args(&["ls"]));
    }

    #[test]
    fn test_detect_missing_target() {
        let mut list = args(&["ls", ">"]);
        let err = RedirectHandler::detect(&mut list).unwrap_err();
        assert!(matches!(err, ExecError::MalformedRedirection(ref op) if op == ">"));
        assert_eq!(list, args(&["ls", ">"]));
    }

    #[test]
    fn test_operator_must_be_whole_token() {
        let mut list = args(&["echo", ">out.txt", "a>b"]);
        assert_eq!(RedirectHandler::detect(&mut list).unwrap(), None);
        assert_eq!(list.len(), 3);
    }

    fn redirect(kind: RedirectKind, target: &std::path::Path) -> Redirection {
        Redirection { kind, target: target.to_string_lossy().into_owned() }
    }

    #[test]
    fn test_install_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let victim_path = dir.path().join("victim.txt");
        let target = dir.path().join("out.txt");
        fs::write(&target, "stale content that must go\n").unwrap();
        let mut victim = File::create(&victim_path).unwrap();

        {
            let guard = redirect(RedirectKind::Truncate, &target)
                .install_on(victim.as_raw_fd())
                .unwrap();
            let flags = unsafe { libc::fcntl(guard.saved, libc::F_GETFD) };
            assert!(flags & libc::FD_CLOEXEC != 0);
            victim.write_all(b"redirected\n").unwrap();
        }
        victim.write_all(b"restored\n").unwrap();

        assert_eq!(read_to_string(&target).unwrap(), "redirected\n");
        assert_eq!(read_to_string(&victim_path).unwrap(), "restored\n");
    }

    #[test]
    fn test_append_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("log.txt");
        fs::write(&target, "old\n").unwrap();
        let mut victim = tempfile::tempfile().unwrap();

        {
            let _guard = redirect(RedirectKind::Append, &target)
                .install_on(victim.as_raw_fd())
                .unwrap();
            victim.write_all(b"new\n").unwrap();
        }

        assert_eq!(read_to_string(&target).unwrap(), "old\nnew\n");
    }

    #[test]
    fn test_created_with_owner_rw_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("fresh.txt");
        let victim = tempfile::tempfile().unwrap();

        drop(redirect(RedirectKind::Truncate, &target).install_on(victim.as_raw_fd()).unwrap());

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        // The umask may only remove bits.
        assert_eq!(mode & !0o644, 0);
        assert!(mode & 0o600 == 0o600);
    }

    #[test]
    fn test_unopenable_target_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let victim_path = dir.path().join("victim.txt");
        let mut victim = File::create(&victim_path).unwrap();
        let target = dir.path().join("missing").join("out.txt");

        let err = redirect(RedirectKind::Truncate, &target)
            .install_on(victim.as_raw_fd())
            .unwrap_err();
        assert!(matches!(err, ExecError::RedirectionTargetUnavailable { .. }));

        victim.write_all(b"still here\n").unwrap();
        assert_eq!(read_to_string(&victim_path).unwrap(), "still here\n");
    }
}
