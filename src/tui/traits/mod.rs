//! Contracts shared by interactive TUI components.
//!
//! Components own their own state and turn key events into actions. The App
//! applies those actions to the pages, so no component ever touches a store.
//!
//! ```text
//! KeyEvent ─▶ App (modal, global keys) ─▶ focused component
//!                                              │
//!                                     TableAction / FilterAction
//!                                              │
//!                                  App applies to Page<T> ◀─┘
//! ```

mod interactive;

pub use interactive::{Handled, Interactive};
