//! Printer adapters for sending ESC/POS data

use crate::error::{PrintError, PrintResult};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Default raw printing port
pub const DEFAULT_PORT: u16 = 9100;

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Network printer (TCP port 9100)
///
/// Most thermal printers accept raw ESC/POS on port 9100.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        Self::from_addr(&format!("{host}:{port}"))
    }

    /// Create from an address string
    ///
    /// Accepts `"192.168.0.150:9100"` or a bare host, which gets port 9100.
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr = addr.trim();
        let parsed: SocketAddr = match addr.parse() {
            Ok(a) => a,
            Err(_) => format!("{addr}:{DEFAULT_PORT}")
                .parse()
                .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {addr}")))?,
        };

        Ok(Self {
            addr: parsed,
            timeout: Duration::from_secs(5),
        })
    }

    /// Set connect/write timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(data), fields(addr = %self.addr, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");

        let mut stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))?;

        tokio::time::timeout(self.timeout, async {
            stream.write_all(data).await?;
            stream.flush().await?;
            stream.shutdown().await?;
            Ok::<_, std::io::Error>(())
        })
        .await
        .map_err(|_| PrintError::Timeout(format!("Write timeout: {}", self.addr)))??;

        info!("Print job sent");
        Ok(())
    }

    #[instrument(fields(addr = %self.addr))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);

        match tokio::time::timeout(check_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}
