//! Business services containing domain logic and use cases.

pub mod address;
pub mod auth;
pub mod cache;
pub mod catalog;
pub mod chat;
pub mod consultant;
pub mod notification;
pub mod order;
pub mod password;
pub mod search;
pub mod token;

// Re-export commonly used types
pub use address::AddressService;
pub use auth::{
    AuthService, AuthServiceConfig, Authorizer, Identity, Profile, ProfileUpdate,
    RegisterCommand, Rejection,
};
pub use cache::TtlCache;
pub use catalog::CatalogService;
pub use chat::{ChatCompletion, ChatMessage, ChatReply, ChatRequest, ChatRole, MockChatCompletion};
pub use consultant::ConsultantService;
pub use notification::{Notification, NotificationHub, Subscription};
pub use order::{OrderService, PlaceOrder};
pub use password::PasswordHasher;
pub use search::{FuzzyHit, ProductSummary, SearchHit, SearchService};
pub use token::{TokenService, TokenServiceConfig};
