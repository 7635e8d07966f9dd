pub mod tcp;
pub mod udp;

pub use tcp::TcpDnsListener;
pub use udp::UdpDnsListener;

use dotproxy_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;

/// Receive buffer for one UDP datagram.
pub const UDP_RECV_BUFFER_SIZE: usize = 4096;

const TCP_BACKLOG: i32 = 1024;

fn bind_error(address: SocketAddr, error: io::Error) -> DomainError {
    DomainError::BindFailed {
        address: address.to_string(),
        reason: error.to_string(),
    }
}

fn new_socket(address: SocketAddr, ty: Type, protocol: Protocol) -> io::Result<Socket> {
    let domain = if address.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, ty, Some(protocol))?;
    if address.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    Ok(socket)
}

pub(crate) fn create_udp_socket(address: SocketAddr) -> Result<tokio::net::UdpSocket, DomainError> {
    let bind = || -> io::Result<tokio::net::UdpSocket> {
        let socket = new_socket(address, Type::DGRAM, Protocol::UDP)?;
        socket.bind(&address.into())?;
        socket.set_nonblocking(true)?;
        let std_socket: std::net::UdpSocket = socket.into();
        tokio::net::UdpSocket::from_std(std_socket)
    };

    bind().map_err(|e| bind_error(address, e))
}

pub(crate) fn create_tcp_listener(
    address: SocketAddr,
) -> Result<tokio::net::TcpListener, DomainError> {
    let bind = || -> io::Result<tokio::net::TcpListener> {
        let socket = new_socket(address, Type::STREAM, Protocol::TCP)?;
        socket.bind(&address.into())?;
        socket.listen(TCP_BACKLOG)?;
        socket.set_nonblocking(true)?;
        let std_listener: std::net::TcpListener = socket.into();
        tokio::net::TcpListener::from_std(std_listener)
    };

    bind().map_err(|e| bind_error(address, e))
}
