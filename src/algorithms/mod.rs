pub mod common;
pub mod join;
pub mod mass;
pub mod motifs;
pub mod ostinato;
