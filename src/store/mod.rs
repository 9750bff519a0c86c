//! [`RemoteStore`](crate::engine::RemoteStore) implementations.

pub mod http;
