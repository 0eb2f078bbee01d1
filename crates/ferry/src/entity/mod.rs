//! Domain types shared by the transfer engine and the tracker clients.

pub mod issue;
pub mod label;
pub mod prelude;
pub mod repo_ref;
pub mod visibility;
