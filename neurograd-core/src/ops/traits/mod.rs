pub mod numeric;

pub use numeric::NeuroFloat;
