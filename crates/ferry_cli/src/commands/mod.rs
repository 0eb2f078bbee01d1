pub(crate) mod meta;

#[cfg(feature = "github")]
pub(crate) mod transfer;
