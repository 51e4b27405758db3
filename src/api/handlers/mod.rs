mod bulk;
mod expand;
mod health;
mod links;
mod redirect;
mod shorten;

pub use bulk::bulk_handler;
pub use expand::expand_handler;
pub use health::health_handler;
pub use links::{delete_link_handler, list_links_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
