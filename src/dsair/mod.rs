//! The dsair module contains the components responsible for the core gateway
//! command protocol: the typed field encoder, the frame header/trailer layout
//! and the per-variant subbody composition.

pub mod command;
pub mod encoder;
pub mod frame;

pub use command::*;
pub use encoder::*;
pub use frame::*;
