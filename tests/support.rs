use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// How the stub answers entry creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Accept,
    Reject,
}

/// Spawn a lightweight archiving API stub for tests.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server(mode: EntryMode) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream, mode));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn read_head(stream: &mut TcpStream) -> Option<(String, String, usize, Vec<u8>)> {
    let mut data = Vec::new();
    let mut buffer = [0u8; 2048];
    let header_end = loop {
        let read = stream.read(&mut buffer).ok()?;
        if read == 0 {
            return None;
        }
        data.extend_from_slice(buffer.get(..read)?);
        if let Some(pos) = data.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos;
        }
    };
    let head = String::from_utf8_lossy(data.get(..header_end)?).into_owned();
    let mut request_line = head.lines().next()?.split_whitespace();
    let method = request_line.next()?.to_owned();
    let target = request_line.next()?;
    let path = target.split('?').next()?.to_owned();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let body = data.get(header_end.checked_add(4)?..)?.to_vec();
    Some((method, path, content_length, body))
}

fn handle_client(mut stream: TcpStream, mode: EntryMode) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    drop(stream.set_read_timeout(Some(Duration::from_secs(5))));
    let Some((method, path, content_length, mut body)) = read_head(&mut stream) else {
        return;
    };
    let mut buffer = [0u8; 2048];
    while body.len() < content_length {
        match stream.read(&mut buffer) {
            Ok(0) | Err(_) => break,
            Ok(read) => body.extend_from_slice(buffer.get(..read).unwrap_or_default()),
        }
    }

    let (status, payload) = match (method.as_str(), path.as_str(), mode) {
        ("POST", "/oauth/v2/token", _) => ("200 OK", r#"{"access_token":"e2e-token"}"#),
        ("POST", "/api/entries", EntryMode::Accept) => (
            "200 OK",
            r#"{"id":1,"title":"stub","content":"<p>stub article body</p><img src=\"a.png\">"}"#,
        ),
        ("POST", "/api/entries", EntryMode::Reject) => {
            ("500 Internal Server Error", r#"{"error":"unavailable"}"#)
        }
        ("GET", "/api/search", _) => ("404 Not Found", r#"{"error":"no search"}"#),
        _ => ("200 OK", r#"{"ok":true}"#),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `archbench` binary in `dir` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_archbench<I, S>(dir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = archbench_bin()?;
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "error")
        .env_remove("ARCHBENCH_LOG")
        .env_remove("ARCHBENCH_URL")
        .env_remove("ARCHBENCH_API_KEY")
        .env_remove("ARCHBENCH_CLIENT_ID")
        .env_remove("ARCHBENCH_CLIENT_SECRET")
        .env_remove("ARCHBENCH_USERNAME")
        .env_remove("ARCHBENCH_PASSWORD")
        .output()
        .map_err(|err| format!("run archbench failed: {}", err))
}

fn archbench_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_archbench").map_or_else(
        || Err("CARGO_BIN_EXE_archbench missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
