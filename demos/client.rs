//! Demo client.
//!
//! Sends one NUL-terminated command to the demo server and prints the reply.
//!
//! Usage: `cargo run --example client -- /tmp/seqsock.sock ping`

use seqsock::Client;

fn main() -> seqsock::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "/tmp/seqsock.sock".to_string());
    let command = args.next().unwrap_or_else(|| "ping".to_string());

    let mut request = command.into_bytes();
    request.push(0);

    let client = Client::new(&path)?.max_response_size(1024);
    let reply = client.request(&request)?;

    if reply.is_empty() {
        println!("(empty response)");
    } else {
        let text = reply.strip_suffix(b"\0").unwrap_or(&reply[..]);
        println!("{}", String::from_utf8_lossy(text));
    }

    Ok(())
}
