//! Access to the distribution server
//!
//! The reconciler only needs two things from the network: a yes/no
//! reachability probe and a way to stream a resource into a local
//! writer. [`Remote`] captures exactly that so the reconciliation logic
//! can be exercised without a server.

use std::io::Write;

use crate::error::Result;

pub mod http;

pub use http::HttpRemote;

/// Minimal view of the distribution server
pub trait Remote {
    /// True iff a GET on `url` answers with status 200
    ///
    /// Transport failures (DNS, refused connection, timeout) are
    /// reported as `false`, never as an error.
    fn probe(&self, url: &str) -> bool;

    /// Stream the body of `url` into `dest`, returning the bytes written
    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64>;
}
