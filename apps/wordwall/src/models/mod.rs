pub mod wall;
