//! Confirmation adapters.
//!
//! - `static_confirmation` - Fixed answer, for tests and `--yes`
//! - `stdin` - Interactive y/N question on the terminal

mod static_confirmation;
mod stdin;

pub use static_confirmation::StaticConfirmation;
pub use stdin::StdinConfirmation;
