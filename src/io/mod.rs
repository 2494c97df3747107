pub mod fshape;
pub mod reactivity_csv;
