// ABOUTME: The byte-stream transport contract and its TCP implementation
// ABOUTME: An external collaborator per spec §1; only TCP and the connect timeout live here

use crate::error::SmppError;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, ToSocketAddrs};

/// Anything the session engine can frame PDUs over. Blanket-implemented for
/// any async byte stream — `TcpStream` and, in tests, `tokio::io::DuplexStream`
/// both qualify with no wrapper type needed (spec §6 Transport contract).
pub trait Transport: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> Transport for T {}

/// Opens a TCP connection within `connect_timeout`, failing with
/// `SmppError::Timeout` if the deadline passes first (spec §6 `open()`).
pub async fn connect_tcp<A: ToSocketAddrs>(
    addr: A,
    connect_timeout: Duration,
) -> Result<TcpStream, SmppError> {
    match tokio::time::timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(e)) => Err(SmppError::Transport(e)),
        Err(_) => Err(SmppError::Timeout),
    }
}
