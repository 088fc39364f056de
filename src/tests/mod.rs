mod config;
mod shape;
