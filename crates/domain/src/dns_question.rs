use super::{RecordClass, RecordType};
use std::fmt;
use std::sync::Arc;

/// A question as parsed from the wire.
///
/// `name` keeps the client's spelling (case included) without the trailing
/// root dot, so it can be echoed back byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl Question {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType, class: RecordClass) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
        }
    }

    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} {}", self.name, self.class, self.record_type)
    }
}
