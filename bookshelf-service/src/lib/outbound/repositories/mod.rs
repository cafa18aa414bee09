pub mod book;
pub mod memory;
pub mod user;

pub use book::PostgresBookRepository;
pub use memory::InMemoryBookRepository;
pub use memory::InMemoryUserRepository;
pub use user::PostgresUserRepository;
