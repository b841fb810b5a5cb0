// Copyright @yucwang 2021

pub mod input;
pub mod integrator;
pub mod primitive;
pub mod session;
pub mod session_loader;
