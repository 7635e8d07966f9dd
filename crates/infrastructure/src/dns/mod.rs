pub mod codec;
pub mod forwarding;
pub mod listener;
pub mod names;
pub mod proxy;
pub mod resolver;
pub mod server;
pub mod transport;

pub use codec::HickoryMessageCodec;
pub use listener::{TcpDnsListener, UdpDnsListener};
pub use proxy::DnsProxy;
pub use resolver::TlsUpstreamResolver;
pub use server::DnsServerHandler;
pub use transport::{DnsTransport, TlsTransport, TransportResponse};
