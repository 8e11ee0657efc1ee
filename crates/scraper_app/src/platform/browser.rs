//! Hands page links to the desktop's default browser.

use std::io;
use std::process::{Command, Stdio};

/// Opens `url` with the platform opener. Output of the opener is discarded so
/// it cannot draw over the terminal UI.
pub(crate) fn open_url(url: &str) -> io::Result<()> {
    browser_command(url)?
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

/// Only web links are handed over; anything else could name a local program.
fn browser_command(url: &str) -> io::Result<Command> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a web link: {url}"),
        ));
    }

    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("explorer");
        command.arg(url);
        Ok(command)
    }

    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("open");
        command.arg(url);
        Ok(command)
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        Ok(command)
    }
}
