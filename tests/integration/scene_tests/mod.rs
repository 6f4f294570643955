mod attitude;
mod disturbance;
mod hover;
mod reset;
