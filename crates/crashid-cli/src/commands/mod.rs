pub mod canonicalize;
pub mod fingerprint;
pub mod inspect;
