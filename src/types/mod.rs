// Public modules
pub mod document;
pub mod message;
pub mod phase;
pub mod proxy_request;
pub mod proxy_response;
pub mod sender;
pub mod theme;

// Re-exports
pub use document::Document;
pub use message::Message;
pub use phase::Phase;
pub use proxy_request::ProxyRequest;
pub use proxy_response::ProxyResponse;
pub use sender::Sender;
pub use theme::Theme;
