//! Demo server.
//!
//! Commands (request payload, optionally NUL-terminated):
//! - `ping` / `pong`: reply `pong` / `pango`
//! - `empty`: no reply (the client receives an empty response)
//! - `fail`: handler reports failure
//! - `sleep`: wait five seconds, then reply `slept`
//! - `set_nonblocking` / `set_blocking`: switch the serve loop's readiness mode
//! - `shutdown`: stop after this request
//! - anything else is echoed back
//!
//! Usage: `cargo run --example echo_server -- /tmp/seqsock.sock`
//! Set `RUST_LOG=debug` to see per-request logs.

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use seqsock::{Connection, Handler, ServeMode, ServeState, Server, ServerConfig, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    None,
    Polling,
    Blocking,
    Shutdown,
}

struct DemoHandler {
    control: Control,
}

impl Handler for DemoHandler {
    fn handle(&mut self, conn: &mut Connection, request: &[u8]) -> Status {
        let command = request.strip_suffix(b"\0").unwrap_or(request);
        self.control = Control::None;

        tracing::info!("Request: {:?}", String::from_utf8_lossy(command));

        match command {
            b"ping" => conn.respond(b"pong\0").into(),
            b"pong" => conn.respond(b"pango\0").into(),
            b"empty" => Status::OK,
            b"fail" => Status::FAILURE,
            b"sleep" => {
                std::thread::sleep(Duration::from_secs(5));
                conn.respond(b"slept\0").into()
            }
            b"set_nonblocking" => {
                self.control = Control::Polling;
                conn.respond(b"ok\0").into()
            }
            b"set_blocking" => {
                self.control = Control::Blocking;
                conn.respond(b"ok\0").into()
            }
            b"shutdown" => {
                self.control = Control::Shutdown;
                Status::OK
            }
            _ => conn.respond(request).into(),
        }
    }

    fn next_state(&mut self, current: ServeState) -> ServeState {
        match self.control {
            Control::None => current,
            Control::Polling => current.with_mode(ServeMode::polling()),
            Control::Blocking => current.with_mode(ServeMode::Blocking),
            Control::Shutdown => current.stop(),
        }
    }
}

/// `RUST_LOG` when set and valid, otherwise `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> seqsock::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/seqsock.sock".to_string());

    let mut server = Server::open(&path, ServerConfig::default())?;
    let mut handler = DemoHandler {
        control: Control::None,
    };

    server.serve(&mut handler)?;
    server.close();
    Ok(())
}
