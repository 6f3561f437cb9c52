//! String-based convenience API for quick experimentation.

pub use crate::eval::{Bindings, bindings};
pub use crate::expr::Expression;
pub use crate::ui::{diff, differentiate, evaluate, parse, parse_binding};
