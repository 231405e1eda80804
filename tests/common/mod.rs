//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use generic_proxy::config::{FetchConfig, GenericProxyConfig};
use generic_proxy::{HttpServer, Shutdown};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// What the mock origin sends back.
#[derive(Debug, Clone)]
pub struct OriginReply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub delay: Duration,
    /// Pause between body chunks; zero sends the body in one write.
    pub chunk_delay: Duration,
    pub chunk_size: usize,
    pub declare_length: bool,
}

#[allow(dead_code)]
impl OriginReply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
            delay: Duration::ZERO,
            chunk_delay: Duration::ZERO,
            chunk_size: 1,
            declare_length: true,
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Send the head at once, then the body `chunk_size` bytes at a time.
    pub fn trickle(mut self, chunk_size: usize, chunk_delay: Duration) -> Self {
        self.chunk_size = chunk_size.max(1);
        self.chunk_delay = chunk_delay;
        self
    }

    /// Omit Content-Length; the body ends when the connection closes.
    pub fn without_length(mut self) -> Self {
        self.declare_length = false;
        self
    }

    fn head(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {} Mock\r\n", self.status);
        for (name, value) in &self.headers {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }
        if self.declare_length {
            head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        }
        head.push_str("Connection: close\r\n\r\n");
        head.into_bytes()
    }

    async fn write_to(&self, socket: &mut TcpStream) -> std::io::Result<()> {
        if self.chunk_delay.is_zero() {
            let mut bytes = self.head();
            bytes.extend_from_slice(&self.body);
            return socket.write_all(&bytes).await;
        }

        socket.write_all(&self.head()).await?;
        socket.flush().await?;
        for chunk in self.body.chunks(self.chunk_size) {
            tokio::time::sleep(self.chunk_delay).await;
            socket.write_all(chunk).await?;
            socket.flush().await?;
        }
        Ok(())
    }
}

/// Request heads received by a mock origin, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<String>>>);

#[allow(dead_code)]
impl Captured {
    pub fn requests(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

async fn read_head(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Start a programmable mock origin on an ephemeral port.
pub async fn start_origin<F, Fut>(f: F) -> (SocketAddr, Captured)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = OriginReply> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Captured::default();
    let f = Arc::new(f);

    let log = captured.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        log.0.lock().unwrap().push(head);

                        let reply = f().await;
                        tokio::time::sleep(reply.delay).await;
                        let _ = reply.write_to(&mut socket).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, captured)
}

/// Start a mock origin that always sends the same reply.
#[allow(dead_code)]
pub async fn start_fixed_origin(reply: OriginReply) -> (SocketAddr, Captured) {
    start_origin(move || {
        let reply = reply.clone();
        async move { reply }
    })
    .await
}

/// Start the proxy host on an ephemeral port.
///
/// The server stops when the returned [`Shutdown`] is triggered or dropped.
pub async fn start_proxy(fetch: FetchConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = GenericProxyConfig::default();
    config.listener.bind_address = addr.to_string();
    config.fetch = fetch;

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    (addr, shutdown)
}

/// Proxy URL for `target`, percent-encoded the way callers are expected to.
pub fn proxied(proxy: SocketAddr, target: &str) -> String {
    format!(
        "http://{}/generic_proxy/{}",
        proxy,
        utf8_percent_encode(target, NON_ALPHANUMERIC)
    )
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
