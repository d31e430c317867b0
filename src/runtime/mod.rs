//! Runtime: dynamic values, the operator library, and the unit executor
//!
//! Everything generated code touches while running lives here. The
//! [`value::Value`] type is the universal operand; [`ops`] holds the pure
//! operator functions dispatch lands on; [`console::Console`] carries the
//! `show`/`ask` side effects; [`unit::Executable`] interprets compiled
//! bodies.

pub mod code;
pub mod console;
pub mod errors;
pub mod ops;
pub mod unit;
pub mod value;

pub use code::{CodeBody, Instr};
pub use console::Console;
pub use errors::RuntimeError;
pub use unit::{EmployeeUnit, Executable, OfficeUnit};
pub use value::Value;
