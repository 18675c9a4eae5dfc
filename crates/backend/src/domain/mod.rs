pub mod a001_shop;
pub mod a002_shop_remainder;
