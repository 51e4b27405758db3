mod api_key;
mod link;

pub use api_key::ApiKey;
pub use link::{Link, LinkMetadata, NewLink};
