pub mod edition;
