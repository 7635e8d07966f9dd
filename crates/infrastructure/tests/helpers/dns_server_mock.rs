#![allow(dead_code)]
use dotproxy_domain::config::UpstreamTarget;
use dotproxy_infrastructure::dns::transport::tcp::{
    read_with_length_prefix, send_with_length_prefix,
};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::{rdata, RData, Record};
use hickory_proto::serialize::binary::BinEncodable;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_rustls::TlsAcceptor;

/// What the mock upstream answers to every query.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// NOERROR with one answer per address, owner name taken from the query.
    Addresses(Vec<(IpAddr, u32)>),
    /// Empty answer section with the given response code.
    Rcode(ResponseCode),
    /// A valid answer whose ID does not match the query.
    WrongId(IpAddr),
}

/// In-process DNS-over-TLS server with a self-signed certificate for
/// `127.0.0.1`. Counts accepted TCP connections.
pub struct MockTlsDnsServer {
    addr: SocketAddr,
    certificate: CertificateDer<'static>,
    connections: Arc<AtomicUsize>,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockTlsDnsServer {
    pub async fn start(reply: MockReply) -> Result<Self, std::io::Error> {
        let certified = rcgen::generate_simple_self_signed(vec![
            "127.0.0.1".to_string(),
            "localhost".to_string(),
        ])
        .unwrap();
        let certificate = certified.cert.der().clone();
        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(
            certified.key_pair.serialize_der(),
        ));

        let server_config = rustls::ServerConfig::builder()
            .with_no_client_auth()
            .with_single_cert(vec![certificate.clone()], key)
            .unwrap();
        let acceptor = TlsAcceptor::from(Arc::new(server_config));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let connections = Arc::new(AtomicUsize::new(0));
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let conn_counter = connections.clone();
        let query_counter = queries.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((stream, _)) = accepted else { continue };
                        conn_counter.fetch_add(1, Ordering::SeqCst);

                        let acceptor = acceptor.clone();
                        let reply = reply.clone();
                        let query_counter = query_counter.clone();
                        tokio::spawn(async move {
                            let Ok(mut tls) = acceptor.accept(stream).await else { return };
                            let Ok(query) = read_with_length_prefix(&mut tls).await else { return };
                            query_counter.fetch_add(1, Ordering::SeqCst);

                            if let Some(response) = Self::build_response(&query, &reply) {
                                let _ = send_with_length_prefix(&mut tls, &response).await;
                            }
                            let _ = tls.shutdown().await;
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            certificate,
            connections,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn target(&self) -> UpstreamTarget {
        UpstreamTarget::new("127.0.0.1", self.addr.port())
    }

    /// Client config trusting only this server's certificate.
    pub fn client_config(&self) -> Arc<rustls::ClientConfig> {
        let mut roots = rustls::RootCertStore::empty();
        roots.add(self.certificate.clone()).unwrap();

        Arc::new(
            rustls::ClientConfig::builder()
                .with_root_certificates(roots)
                .with_no_client_auth(),
        )
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn build_response(query_bytes: &[u8], reply: &MockReply) -> Option<Vec<u8>> {
        let query = Message::from_vec(query_bytes).ok()?;
        let question = query.queries().first()?.clone();

        let id = match reply {
            MockReply::WrongId(_) => query.id().wrapping_add(1),
            _ => query.id(),
        };

        let mut response = Message::new(id, MessageType::Response, OpCode::Query);
        response.set_recursion_desired(query.recursion_desired());
        response.set_recursion_available(true);

        let addresses = match reply {
            MockReply::Addresses(addresses) => addresses.clone(),
            MockReply::WrongId(address) => vec![(*address, 60)],
            MockReply::Rcode(code) => {
                response.set_response_code(*code);
                Vec::new()
            }
        };

        for (address, ttl) in addresses {
            let rdata = match address {
                IpAddr::V4(ipv4) => RData::A(rdata::A(ipv4)),
                IpAddr::V6(ipv6) => RData::AAAA(rdata::AAAA(ipv6)),
            };
            response.add_answer(Record::from_rdata(question.name().clone(), ttl, rdata));
        }
        response.add_query(question);

        response.to_vec().ok()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockTlsDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
