//! HTTP module for the suite
//!
//! Request construction and a single-attempt client for the service under test.

mod builder;
mod client;

pub use builder::{BodyEncoding, RequestBuilder};
pub use client::{HttpClient, HttpRequest, HttpResponse};
