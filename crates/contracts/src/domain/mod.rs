pub mod a001_delivery;
