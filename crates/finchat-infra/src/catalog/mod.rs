//! Service catalog backends.

pub mod yaml;

pub use yaml::YamlCatalogSource;
