#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod calculator;
pub mod keypad;
pub mod screen;

pub use calculator::{
    sanitize_number, CalcError, CalculatorEngine, CalculatorState, Command, Operator, Readout,
};
