pub mod alpha_channel;
pub mod background;
pub mod color;
pub mod components;
pub mod morphology;
pub mod pipeline;
pub mod refine;
