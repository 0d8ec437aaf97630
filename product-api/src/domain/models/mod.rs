pub mod product;

pub use product::{CreateProductRequest, NewProduct, Product, UpdateProductRequest};
