#![allow(non_snake_case)]
pub mod state_estimator;
pub mod consistency;
pub mod simulator;
pub mod history;
pub mod plotting;
