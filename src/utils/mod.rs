pub mod links;

pub use links::VideoReference;
