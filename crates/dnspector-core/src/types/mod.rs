mod dns;
mod record;
mod source;
mod whois;
mod zone;

pub use dns::*;
pub use record::*;
pub use source::*;
pub use whois::*;
pub use zone::*;
