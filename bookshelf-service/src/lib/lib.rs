pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::book;
pub use domain::session;
pub use domain::user;
pub use outbound::repositories;
