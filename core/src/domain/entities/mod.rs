//! Domain entities representing core business objects.

pub mod address;
pub mod consultant;
pub mod order;
pub mod product;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use address::{Address, NewAddress};
pub use consultant::{ConsultantMessage, SearchLogEntry};
pub use order::{
    CustomerOrder, CustomerSummary, NewOrder, NewOrderItem, Order, OrderDetails, OrderItem,
    OrderStatus, OrderWithItems,
};
pub use product::{NewProduct, Product, ProductPatch};
pub use token::Claims;
pub use user::{NewUser, Role, User, UserPatch};
