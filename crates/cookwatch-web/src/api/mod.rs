pub mod pages;
pub mod series;
