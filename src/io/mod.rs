mod adapter;
mod backend;
mod convert;
mod urls;
mod wire;

pub use adapter::{PersistenceAdapter, PersistenceError, RequestTicket, SaveSnapshot, Tagged};
pub use backend::{BackendError, BackendResult, ResumeBackend};
pub use convert::{load_document_str, parse_raw_document_str};
pub use urls::{normalize_url, normalize_url_fields};
pub use wire::{RawDocument, RawItem, RawSection, SaveRequest};
