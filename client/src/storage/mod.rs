//! Browser persistence for the editor.
//!
//! SYSTEM CONTEXT
//! ==============
//! `idb` implements [`editor::store::Store`] on IndexedDB through a small
//! inline JavaScript shim; records cross the boundary as JSON text. `codec`
//! holds the pure pieces of that bridge (batch encoding, error mapping) so
//! they can be tested on the host.

pub mod codec;
#[cfg(feature = "csr")]
pub mod idb;
