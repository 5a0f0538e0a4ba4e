//! Repository traits and their in-memory implementations.

pub mod address;
pub mod consultant;
pub mod order;
pub mod product;
pub mod user;

pub use address::{AddressRepository, MockAddressRepository};
pub use consultant::{ConsultantRepository, MockConsultantRepository};
pub use order::{MockOrderRepository, OrderRepository};
pub use product::{MockProductRepository, ProductRepository};
pub use user::{MockUserRepository, UserRepository};
