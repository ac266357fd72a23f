pub mod game;
pub mod practice;
pub mod record;
