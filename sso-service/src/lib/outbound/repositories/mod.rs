pub mod app;
pub mod memory;
pub mod user;

pub use app::PostgresAppRepository;
pub use memory::InMemoryCredentialStore;
pub use user::PostgresUserRepository;
