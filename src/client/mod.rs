mod client;
mod request;
mod response;

pub use client::RestClient;
pub use request::RestRequest;
