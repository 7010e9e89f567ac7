pub mod backend;
pub mod controller;
pub mod dispatcher;
pub mod events;
pub mod io;
pub mod listener;
pub mod profile;
pub mod render;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;
