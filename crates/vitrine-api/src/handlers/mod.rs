pub mod location;

pub use location::serve_location;
