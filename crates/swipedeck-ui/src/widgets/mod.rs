mod card_stack;
mod card_view;

pub use card_stack::*;
pub use card_view::*;
