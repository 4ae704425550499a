// Tue Oct 13 2026 - Alex

use std::env;
use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

pub struct ProcessUtils;

impl ProcessUtils {
    /// Resolves `name` against `PATH`. Names containing a separator are checked as-is.
    pub fn find_executable(name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        which::which(name).ok()
    }

    /// Same lookup against an explicit search path instead of the process `PATH`.
    pub fn find_executable_in(name: &str, path_var: Option<OsString>) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let cwd = env::current_dir().ok()?;
        which::which_in(name, path_var, cwd).ok()
    }

    pub fn is_available(name: &str) -> bool {
        Self::find_executable(name).is_some()
    }

    /// Drains a child pipe on its own thread so a chatty tool never blocks on a full pipe.
    pub fn spawn_reader<R>(mut pipe: R) -> JoinHandle<String>
    where
        R: Read + Send + 'static,
    {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    }

    pub fn join_reader(handle: Option<JoinHandle<String>>) -> String {
        handle
            .and_then(|h| h.join().ok())
            .unwrap_or_default()
    }
}
