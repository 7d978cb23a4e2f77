// Game-side modules: the character stage and its scene scripts

pub mod stage;
