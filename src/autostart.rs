//! Fire-and-forget autostart script
//!
//! Runs `~/.config/vibetile/autostart.sh` once per session. Nothing waits
//! on it; failures are logged and otherwise ignored.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

/// Default script location under the user's config dir
pub fn default_script() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vibetile").join("autostart.sh"))
}

/// Spawn the script with no arguments and return immediately.
///
/// The script shares our stdout and stderr, so its output lands in the
/// session log. Returns whether the process was started. A reaper thread
/// collects the exit status so the child doesn't linger as a zombie.
pub fn launch(script: &Path) -> bool {
    let child = Command::new(script).stdin(Stdio::null()).spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(e) => {
            warn!("Autostart {} not started: {}", script.display(), e);
            return false;
        }
    };

    debug!("Autostart {} started (pid {})", script.display(), child.id());

    let name = script.display().to_string();
    let reaper = thread::Builder::new()
        .name("autostart-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => debug!("Autostart {} exited: {}", name, status),
            Err(e) => debug!("Autostart {} wait failed: {}", name, e),
        });

    if let Err(e) = reaper {
        warn!("Autostart reaper thread failed to start: {}", e);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use std::time::{Duration, Instant};

    fn script(body: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new().suffix(".sh").tempfile().unwrap();
        writeln!(file, "#!/bin/sh\n{body}").unwrap();
        let path = file.into_temp_path();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_launch_does_not_wait() {
        let path = script("sleep 5");

        let start = Instant::now();
        assert!(launch(&path));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_launch_inherits_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("fds");
        let path = script(&format!(
            "readlink /proc/$$/fd/1 /proc/$$/fd/2 /proc/$$/fd/0 > {0}.tmp && mv {0}.tmp {0}",
            out.display()
        ));

        assert!(launch(&path));

        let deadline = Instant::now() + Duration::from_secs(5);
        while !out.exists() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
        }

        let fds = std::fs::read_to_string(&out).unwrap();
        let fds: Vec<_> = fds.lines().collect();
        let ours = |fd: u32| {
            std::fs::read_link(format!("/proc/self/fd/{fd}"))
                .unwrap()
                .display()
                .to_string()
        };
        assert_eq!(fds, [ours(1), ours(2), "/dev/null".to_string()]);
    }

    #[test]
    fn test_launch_missing_script_is_ignored() {
        assert!(!launch(Path::new("/nonexistent/vibetile/autostart.sh")));
    }

    #[test]
    fn test_launch_non_executable_is_ignored() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!launch(file.path()));
    }

    #[test]
    fn test_default_script_location() {
        if let Some(path) = default_script() {
            assert!(path.ends_with("vibetile/autostart.sh"));
        }
    }
}
