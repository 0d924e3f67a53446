pub mod affine;
pub mod bobbing;
pub mod color;
pub mod field;
pub mod view;
