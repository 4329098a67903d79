//! Integration tests for seqsock.
//!
//! These tests run a real server and real clients over seqpacket sockets
//! in a temporary directory.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use socket2::{Domain, SockAddr, Socket, Type};

use seqsock::protocol::{recv_frame, send_frame};
use seqsock::transport::MAX_ADDRESS_LEN;
use seqsock::{
    Client, Connection, Handler, Result, SeqsockError, ServeMode, ServeState, Server, ServerConfig,
    Status,
};

fn socket_path(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

/// Connect a bare seqpacket socket, for tests that drive the wire directly.
fn raw_client(path: &Path) -> Socket {
    let socket = Socket::new(Domain::UNIX, Type::SEQPACKET, None).unwrap();
    socket.connect(&SockAddr::unix(path).unwrap()).unwrap();
    socket
}

fn echo(conn: &mut Connection, request: &[u8]) -> Status {
    conn.respond(request).into()
}

/// Process `count` connections on a background thread.
fn spawn_server<H>(mut server: Server, count: usize, mut handler: H) -> JoinHandle<Vec<Result<Status>>>
where
    H: Handler + Send + 'static,
{
    thread::spawn(move || {
        (0..count)
            .map(|_| {
                server.wait()?;
                server.process_one(&mut handler)
            })
            .collect()
    })
}

/// Test a basic echo exchange.
#[test]
fn test_echo_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "echo.sock");
    let server = Server::open(&path, ServerConfig::default()).unwrap();
    let handle = spawn_server(server, 1, echo);

    let reply = seqsock::request(&path, b"hello", 1024).unwrap();
    assert_eq!(&reply[..], b"hello");

    let results = handle.join().unwrap();
    assert_eq!(results[0].as_ref().unwrap(), &Status::OK);
}

/// Test that a silent handler still produces an empty response.
#[test]
fn test_auto_empty_response() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "silent.sock");
    let server = Server::open(&path, ServerConfig::default()).unwrap();
    let handle = spawn_server(server, 1, |_conn: &mut Connection, _req: &[u8]| -> Status {
        Status::OK
    });

    let reply = seqsock::request(&path, b"anything", 1024).unwrap();
    assert!(reply.is_empty());

    assert!(handle.join().unwrap()[0].is_ok());
}

/// Test that exactly one response frame is sent when the handler responds.
#[test]
fn test_single_response_then_close() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "single.sock");
    let server = Server::open(&path, ServerConfig::default()).unwrap();
    let handle = spawn_server(server, 1, |conn: &mut Connection, _req: &[u8]| -> Status {
        conn.respond(b"a").into()
    });

    let mut conn = raw_client(&path);
    send_frame(&mut conn, b"req").unwrap();
    assert_eq!(recv_frame(&mut conn, 1024).unwrap().payload(), b"a");

    // No trailing empty frame: the next read sees the server close.
    let err = recv_frame(&mut conn, 1024).unwrap_err();
    assert!(matches!(err, SeqsockError::ConnectionClosed));

    handle.join().unwrap();
}

/// Test that the client reads only the first of two responses.
#[test]
fn test_double_respond_first_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "double.sock");
    let server = Server::open(&path, ServerConfig::default()).unwrap();
    let handle = spawn_server(server, 1, |conn: &mut Connection, _req: &[u8]| -> Status {
        let _ = conn.respond(b"first");
        let _ = conn.respond(b"second");
        Status::OK
    });

    let reply = seqsock::request(&path, b"x", 1024).unwrap();
    assert_eq!(&reply[..], b"first");

    handle.join().unwrap();
}

/// Test a handler that replies with a NUL-terminated string.
#[test]
fn test_ping_pong_includes_terminator() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "ping.sock");
    let server = Server::open(&path, ServerConfig::default()).unwrap();
    let handle = spawn_server(server, 1, |conn: &mut Connection, req: &[u8]| -> Status {
        if req.starts_with(b"ping") {
            conn.respond(b"pong\0").into()
        } else {
            Status::FAILURE
        }
    });

    let reply = seqsock::request(&path, b"ping\0", 1024).unwrap();
    assert_eq!(reply.len(), 5);
    assert_eq!(&reply[..], b"pong\0");

    handle.join().unwrap();
}

/// Test that a failing handler's status reaches the server and the client
/// still gets an empty response.
#[test]
fn test_failing_handler() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "fail.sock");
    let server = Server::open(&path, ServerConfig::default()).unwrap();
    let handle = spawn_server(server, 1, |_conn: &mut Connection, _req: &[u8]| -> Status {
        Status::FAILURE
    });

    let reply = seqsock::request(&path, b"fail", 1024).unwrap();
    assert!(reply.is_empty());

    let results = handle.join().unwrap();
    let status = *results[0].as_ref().unwrap();
    assert_eq!(status.code(), -1);
    assert!(status.is_failure());
}

/// Test that an oversize request is rejected without invoking the handler.
#[test]
fn test_oversize_request_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "oversize.sock");
    let server = Server::open(&path, ServerConfig::default()).unwrap();
    let handle = spawn_server(server, 1, |_conn: &mut Connection, _req: &[u8]| -> Status {
        panic!("handler must not run for an oversize request")
    });

    let payload = vec![0u8; 5000];
    assert!(seqsock::request(&path, &payload, 1024).is_err());

    let results = handle.join().unwrap();
    assert!(results[0].as_ref().unwrap_err().is_message_too_large());
}

/// Test that an oversize response is rejected by the client.
#[test]
fn test_oversize_response_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "big-reply.sock");
    let server = Server::open(&path, ServerConfig::default()).unwrap();
    let handle = spawn_server(server, 1, |conn: &mut Connection, _req: &[u8]| -> Status {
        conn.respond(&[7u8; 2048]).into()
    });

    let err = seqsock::request(&path, b"x", 1024).unwrap_err();
    assert!(err.is_message_too_large());

    handle.join().unwrap();
}

/// Test that consecutive requests see only their own data.
#[test]
fn test_sequential_requests_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "seq.sock");
    let server = Server::open(&path, ServerConfig::default()).unwrap();
    let handle = spawn_server(server, 2, echo);

    let client = Client::new(&path).unwrap();
    assert_eq!(&client.request(b"first request").unwrap()[..], b"first request");
    assert_eq!(&client.request(b"2nd").unwrap()[..], b"2nd");

    let results = handle.join().unwrap();
    assert!(results.iter().all(|r| r.is_ok()));
}

/// Test the address length boundary on both sides.
#[test]
fn test_address_length_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().as_os_str().len() + 1;
    assert!(prefix < MAX_ADDRESS_LEN, "temp dir path too long for this test");

    let at_limit = dir.path().join("s".repeat(MAX_ADDRESS_LEN - prefix));
    assert_eq!(at_limit.as_os_str().len(), MAX_ADDRESS_LEN);
    let server = Server::open(&at_limit, ServerConfig::default()).unwrap();
    let handle = spawn_server(server, 1, echo);
    assert_eq!(&seqsock::request(&at_limit, b"edge", 64).unwrap()[..], b"edge");
    handle.join().unwrap();

    let too_long = dir.path().join("s".repeat(MAX_ADDRESS_LEN - prefix + 1));
    let err = Server::open(&too_long, ServerConfig::default()).unwrap_err();
    assert!(matches!(err, SeqsockError::AddressTooLong { .. }));

    let err = seqsock::request(&too_long, b"edge", 64).unwrap_err();
    assert!(matches!(err, SeqsockError::AddressTooLong { .. }));
}

/// Test non-blocking readiness before and after a peer connects.
#[test]
fn test_poll_readiness() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "poll.sock");
    let mut server = Server::open(&path, ServerConfig::default()).unwrap();

    assert!(!server.poll().unwrap());

    let mut conn = raw_client(&path);
    send_frame(&mut conn, b"polled").unwrap();
    assert!(server.poll().unwrap());

    let mut handler = echo;
    server.process_one(&mut handler).unwrap();
    assert_eq!(recv_frame(&mut conn, 64).unwrap().payload(), b"polled");
    assert!(!server.poll().unwrap());
}

/// Test MsgPack helpers end to end.
#[test]
fn test_msgpack_round_trip() {
    #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
    struct Sum {
        a: i64,
        b: i64,
    }

    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "msgpack.sock");
    let server = Server::open(&path, ServerConfig::default()).unwrap();
    let handle = spawn_server(server, 1, |conn: &mut Connection, req: &[u8]| -> Status {
        match seqsock::codec::MsgPackCodec::decode::<Sum>(req) {
            Ok(sum) => conn.respond_msgpack(&(sum.a + sum.b)).into(),
            Err(_) => Status::FAILURE,
        }
    });

    let total: i64 = Client::new(&path)
        .unwrap()
        .request_msgpack(&Sum { a: 40, b: 2 })
        .unwrap();
    assert_eq!(total, 42);

    handle.join().unwrap();
}

/// Handler that switches to polling on request and stops on "shutdown".
#[derive(Default)]
struct Controlled {
    seen: Vec<Vec<u8>>,
    modes: Vec<ServeMode>,
}

impl Handler for Controlled {
    fn handle(&mut self, conn: &mut Connection, request: &[u8]) -> Status {
        self.seen.push(request.to_vec());
        match request {
            b"fail" => Status::FAILURE,
            b"shutdown" => Status::OK,
            _ => conn.respond(b"ok\0").into(),
        }
    }

    fn next_state(&mut self, current: ServeState) -> ServeState {
        self.modes.push(current.mode);
        match self.seen.last().map(Vec::as_slice) {
            Some(b"set_nonblocking") => current.with_mode(ServeMode::polling()),
            Some(b"set_blocking") => current.with_mode(ServeMode::Blocking),
            Some(b"shutdown") => current.stop(),
            _ => current,
        }
    }
}

/// Test the serve loop: mode switching, failure tolerance and shutdown.
#[test]
fn test_serve_loop_until_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(&dir, "serve.sock");
    let mut server = Server::open(&path, ServerConfig::default()).unwrap();

    let handle = thread::spawn(move || {
        let mut handler = Controlled::default();
        let result = server.serve(&mut handler);
        (result, handler)
    });

    let client = Client::new(&path).unwrap();
    assert_eq!(&client.request(b"set_nonblocking").unwrap()[..], b"ok\0");
    assert_eq!(&client.request(b"hello").unwrap()[..], b"ok\0");
    assert!(client.request(b"fail").unwrap().is_empty());
    assert_eq!(&client.request(b"set_blocking").unwrap()[..], b"ok\0");
    assert!(client.request(b"shutdown").unwrap().is_empty());

    let (result, handler) = handle.join().unwrap();
    result.unwrap();

    assert_eq!(handler.seen.len(), 5);
    assert_eq!(
        handler.modes,
        vec![
            ServeMode::Blocking,
            ServeMode::polling(),
            ServeMode::polling(),
            ServeMode::polling(),
            ServeMode::Blocking,
        ]
    );

    // Server dropped with the thread: socket file is gone.
    assert!(!path.exists());
}
