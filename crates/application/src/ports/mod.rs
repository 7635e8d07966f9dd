mod dns_resolver;
mod message_codec;

pub use dns_resolver::DnsResolver;
pub use message_codec::MessageCodec;
