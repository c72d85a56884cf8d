//! Domain models for the catalog API.

pub mod category;
pub mod product;

pub use category::{Category, CreateCategoryInput};
pub use product::{
    CreateProductInput, NewProduct, Product, ProductFilter, ProductPage, ProductSummary,
    ProductWithCategory, ProductsByCategory, UpdateProductInput,
};
