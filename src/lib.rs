//! # Gatehouse (Shared-PIN Static Site Gate)
//!
//! `gatehouse` is a small HTTP service that sits in front of a static site
//! and keeps it behind a shared PIN. Visitors without the auth cookie are
//! redirected to an unlock page; submitting the correct PIN sets the cookie
//! and everything after that is plain static file serving.
//!
//! ## Access model
//!
//! There is exactly one credential: a PIN shared by all legitimate users,
//! configured once per deployment (`GATEHOUSE_PIN`). A successful unlock
//! sets a bare `auth=1` cookie. The cookie is a marker, not a token: it has
//! no payload, no expiry and no signature, and any client holding it can
//! replay it indefinitely. That trade-off is deliberate for a low-stakes
//! gate and is preserved exactly; do not "harden" the cookie check without
//! revisiting the redirect contract.
//!
//! Three path classes bypass the cookie check so the unlock flow itself
//! stays reachable: the unlock page, the PIN submission endpoint, and the
//! asset prefix. Everything else requires the cookie or is answered with a
//! `302` to the unlock page.
//!
//! ## Content delivery
//!
//! The static site is loaded from a directory into an in-memory store at
//! startup and served with a one-hour browser cache directive. Paths with
//! no matching file fall back to the root `index.html` so client-side
//! routing keeps working after a hard reload.

pub mod api;
pub mod assets;
pub mod cli;
pub mod gate;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
