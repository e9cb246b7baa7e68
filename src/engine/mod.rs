// Engine modules: fixed-timestep loop, input, physics

pub mod game_loop;
pub mod input;
pub mod physics;
