//! Interfaces between the core and the outside world: the ledger line
//! format and the interactive terminal shell.

pub mod line;
pub mod shell;
