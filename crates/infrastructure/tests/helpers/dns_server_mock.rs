#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockTransport {
    Udp,
    Tcp,
}

type Responder = dyn Fn(&[u8], MockTransport) -> Vec<Vec<u8>> + Send + Sync;

/// Loopback resolver answering UDP and TCP on the same port.
///
/// The responder returns `None` to stay silent for that query.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start<F>(responder: F) -> Result<Self, std::io::Error>
    where
        F: Fn(&[u8], MockTransport) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        Self::start_on(SocketAddr::from(([127, 0, 0, 1], 0)), move |query, transport| {
            responder(query, transport).into_iter().collect()
        })
        .await
    }

    /// Binds `addr` and sends every message the responder returns, in order.
    /// Over TCP only the first one is written.
    pub async fn start_on<F>(addr: SocketAddr, responder: F) -> Result<Self, std::io::Error>
    where
        F: Fn(&[u8], MockTransport) -> Vec<Vec<u8>> + Send + Sync + 'static,
    {
        let socket = UdpSocket::bind(addr).await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let responder: Arc<Responder> = Arc::new(responder);
        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_count = Arc::clone(&udp_queries);
        let tcp_count = Arc::clone(&tcp_queries);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_count.fetch_add(1, Ordering::SeqCst);
                            for response in responder(&buf[..len], MockTransport::Udp) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    result = listener.accept() => {
                        if let Ok((mut stream, _)) = result {
                            tcp_count.fetch_add(1, Ordering::SeqCst);
                            let responder = Arc::clone(&responder);
                            tokio::spawn(async move {
                                let Ok(len) = stream.read_u16().await else {
                                    return;
                                };
                                let mut query = vec![0u8; len as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                if let Some(response) = responder(&query, MockTransport::Tcp).first() {
                                    let _ = stream.write_u16(response.len() as u16).await;
                                    let _ = stream.write_all(response).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Never answers.
    pub async fn silent() -> Result<Self, std::io::Error> {
        Self::start(|_, _| None).await
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
