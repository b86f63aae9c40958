//! Output generation for the rendered digest.
//!
//! - [`html`]: builds the inline-styled HTML email body from a
//!   [`Digest`](crate::models::Digest)

pub mod html;
