//! Drill client: the session controller plus its network, storage and
//! presentation seams.

pub mod backend;
pub mod commands;
pub mod controller;
pub mod feedback;
pub mod session;
pub mod storage;
pub mod terminal;
pub mod view;
