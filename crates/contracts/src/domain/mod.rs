pub mod a002_shop_remainder;
