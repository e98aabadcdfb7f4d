//! Domain value types stored as user-defined column types.
//!
//! # Responsibility
//! - Define the six value payloads and their nullable cells.
//! - Keep parse/render/encode/decode behavior behind one shared contract.
//!
//! # Invariants
//! - Values are immutable; every operation returns a new cell.
//! - A null operand short-circuits to a null result.
//! - Validation happens at construction (`parse`, `decode`, constructors).

pub mod cell;
pub mod color;
pub mod email;
pub mod geo;
pub mod kind;
pub mod money;
pub mod quantity;
pub mod vector;
